//! Defines the error taxonomy surfaced by editing operations.

use crate::migrator::MigrationError;
use carelabel_document::DocumentError;
use carelabel_layout::LayoutError;
use carelabel_style::StyleError;
use carelabel_traits::StoreError;
use carelabel_types::ContainerId;
use thiserror::Error;

/// Every failure leaves the document as it was before the call.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error(
        "Not enough space in region: {requested_percent:.2}% requested, {remaining_percent:.2}% remaining."
    )]
    OverBudget {
        remaining_percent: f64,
        requested_percent: f64,
    },
    #[error("Could not create overflow container, please retry (container '{0}' no longer exists).")]
    MigrationSourceMissing(ContainerId),
    #[error("Document error: {0}")]
    Document(DocumentError),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<DocumentError> for EngineError {
    fn from(e: DocumentError) -> Self {
        match e {
            DocumentError::Style(StyleError::InvalidConfiguration(message)) => {
                EngineError::InvalidConfiguration(message)
            }
            DocumentError::InvalidComposition(message) => {
                EngineError::InvalidConfiguration(format!("composition: {}", message))
            }
            other => EngineError::Document(other),
        }
    }
}

impl From<LayoutError> for EngineError {
    fn from(e: LayoutError) -> Self {
        match e {
            LayoutError::OverBudget {
                remaining_percent,
                requested_percent,
            } => EngineError::OverBudget {
                remaining_percent,
                requested_percent,
            },
            LayoutError::InvalidConfiguration(message) => EngineError::InvalidConfiguration(message),
        }
    }
}

impl From<MigrationError> for EngineError {
    fn from(e: MigrationError) -> Self {
        match e {
            MigrationError::SourceMissing(id) => EngineError::MigrationSourceMissing(id),
            MigrationError::Document(e) => e.into(),
        }
    }
}

impl EngineError {
    /// Whether the editor can fix the input and try again without reloading.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, EngineError::MigrationSourceMissing(_))
    }
}
