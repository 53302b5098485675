//! # carelabel-core
//!
//! The editing layer of the care-label engine:
//! - **migrator**: moves overflowing text into a new container beside its source
//! - **session**: the explicit context a save runs in (validate, budget, wrap, resolve)
//! - **persist**: the JSON shape blocks are written to a document store in
//! - **error**: the error taxonomy surfaced to the editor
//!
//! Nothing here keeps ambient state. Every operation receives the document it
//! works on and leaves it untouched when it fails.

// Re-export foundation crates
pub use carelabel_document as document;
pub use carelabel_layout as layout;
pub use carelabel_style as style;
pub use carelabel_traits as traits;
pub use carelabel_types as types;

pub mod error;
pub mod migrator;
pub mod persist;
pub mod session;

pub use error::EngineError;
pub use migrator::{ContainerMigrator, MigrationError};
pub use persist::{PersistedBlock, persist_container, store_key};
pub use session::{EditSession, SaveOutcome, SaveReport, SaveWarning, SplitCommit, SplitPreview};
