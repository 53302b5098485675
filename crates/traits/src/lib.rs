pub mod metrics;
pub mod store;

pub use metrics::{FixedAdvanceMetrics, MetricsError, TextMetricsProvider};
pub use store::{DocumentStore, InMemoryDocumentStore, SharedStoreData, StoreError};
