use thiserror::Error;

pub mod dimension;
pub mod font;
pub mod line_break;
pub mod overflow;
pub mod parsers;
pub mod text;

pub use dimension::{Length, LengthUnit, Padding};
pub use font::{FontSizeUnit, Typography};
pub use line_break::{BreakSymbol, LineBreakConfig};
pub use overflow::OverflowOption;
pub use parsers::StyleParseError;
pub use text::{Alignment, HorizontalAlign, VerticalAlign};

/// Rejection of a block configuration at the dialog boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub(crate) fn require(condition: bool, message: impl FnOnce() -> String) -> Result<(), StyleError> {
    if condition {
        Ok(())
    } else {
        Err(StyleError::InvalidConfiguration(message()))
    }
}
