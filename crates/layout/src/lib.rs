//! Text layout and overflow algorithms for care-label content blocks.
//!
//! Everything here is a synchronous, side-effect free computation over the
//! document model: measuring, wrapping, fitting lines into a block's content
//! area and accounting for the area blocks take up inside a region.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error(
        "Block needs {requested_percent:.2}% of the region but only {remaining_percent:.2}% remains."
    )]
    OverBudget {
        remaining_percent: f64,
        requested_percent: f64,
    },
    #[error("Invalid layout configuration: {0}")]
    InvalidConfiguration(String),
}

pub mod algorithms;
pub mod config;
pub mod content_area;
pub mod engine;
pub mod fonts;
pub mod text;

pub use self::algorithms::overflow::{ShrinkOutcome, SplitResult, resolve};
pub use self::algorithms::space::{RegionSpaceLedger, SpaceReport};
pub use self::config::LayoutConfig;
pub use self::content_area::ContentArea;
pub use self::engine::{BlockText, TextLayoutEngine};
pub use self::fonts::ShapingMetrics;
pub use self::text::measure::{Measurement, TextMeasurer};
pub use self::text::wrapper::{LineBreaker, WrapResult};

#[cfg(test)]
mod test_utils;
