use serde::{Deserialize, Serialize};

/// What to do with wrapped lines that do not fit the block height.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OverflowOption {
    /// Keep the lines that fit and drop the rest with a warning.
    #[default]
    Truncate,
    /// Reduce the font size until everything fits or the size floor is reached.
    Shrink,
    /// Split at the last fitting line and move the rest into a new container.
    KeepFlowing,
}
