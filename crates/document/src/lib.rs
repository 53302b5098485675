//! Label document model.
//!
//! A document is an ordered list of containers ("mothers"); each container owns
//! regions, and each region hosts typed content blocks. Everything here is
//! plain data with serde support; layout decisions live in the layout crate.

use carelabel_style::StyleError;
use carelabel_types::{BlockId, ContainerId, RegionId};
use thiserror::Error;

pub mod block;
pub mod composition;
pub mod container;
pub mod document;

pub use block::{BlockLayout, ContentBlock, ContentKind, TextPayload};
pub use composition::{CompositionPayload, MaterialShare};
pub use container::{Container, Provenance, Region};
pub use document::{DUPLICATE_GAP_MM, LabelDocument};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    #[error("Container '{0}' not found.")]
    ContainerNotFound(ContainerId),
    #[error("Region '{region}' not found in container '{container}'.")]
    RegionNotFound {
        container: ContainerId,
        region: RegionId,
    },
    #[error("Block '{block}' not found in region '{region}'.")]
    BlockNotFound { region: RegionId, block: BlockId },
    #[error("Invalid composition: {0}")]
    InvalidComposition(String),
    #[error(transparent)]
    Style(#[from] StyleError),
}
