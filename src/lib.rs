//! # carelabel
//!
//! Text layout and region-overflow engine for garment care-label documents.
//!
//! A label is a set of containers, each split into regions that host typed
//! content blocks. Saving a block wraps its text to the region, splits it at
//! the height boundary and applies the block's overflow option: truncate,
//! shrink, or keep flowing into a new container beside the source.
//!
//! ```no_run
//! use carelabel::{EditSession, LabelDocument, LayoutConfig, TextLayoutEngine};
//!
//! let mut document = LabelDocument::new();
//! let session = EditSession::new(&mut document, TextLayoutEngine::estimating(LayoutConfig::default()));
//! assert!(session.document().containers.is_empty());
//! ```

pub mod error;

// Re-export the workspace crates
pub use carelabel_document as document;
pub use carelabel_layout as layout;
pub use carelabel_style as style;
pub use carelabel_traits as traits;
pub use carelabel_types as types;

pub use error::CareLabelError;

pub use carelabel_core::{
    ContainerMigrator, EditSession, EngineError, MigrationError, PersistedBlock, SaveOutcome,
    SaveReport, SaveWarning, SplitCommit, SplitPreview, persist_container, store_key,
};
pub use carelabel_document::{
    BlockLayout, CompositionPayload, Container, ContentBlock, ContentKind, LabelDocument,
    MaterialShare, Provenance, Region, TextPayload,
};
pub use carelabel_layout::{
    BlockText, LayoutConfig, RegionSpaceLedger, ShapingMetrics, SpaceReport, SplitResult,
    TextLayoutEngine, WrapResult,
};
pub use carelabel_style::{
    Alignment, BreakSymbol, FontSizeUnit, Length, LineBreakConfig, OverflowOption, Padding,
    Typography,
};
pub use carelabel_traits::{
    DocumentStore, FixedAdvanceMetrics, InMemoryDocumentStore, TextMetricsProvider,
};
pub use carelabel_types::{BlockId, ContainerId, Rect, RegionId, Size};
