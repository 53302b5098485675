use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum HorizontalAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum VerticalAlign {
    Top,
    #[default]
    Center,
    Bottom,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub struct Alignment {
    #[serde(default)]
    pub horizontal: HorizontalAlign,
    #[serde(default)]
    pub vertical: VerticalAlign,
}

impl HorizontalAlign {
    /// Offset of a line of `content` width inside `available` width.
    pub fn offset(self, content: f64, available: f64) -> f64 {
        let free = (available - content).max(0.0);
        match self {
            HorizontalAlign::Left => 0.0,
            HorizontalAlign::Center => free / 2.0,
            HorizontalAlign::Right => free,
        }
    }
}

impl VerticalAlign {
    /// Offset of a text block of `content` height inside `available` height.
    pub fn offset(self, content: f64, available: f64) -> f64 {
        let free = (available - content).max(0.0);
        match self {
            VerticalAlign::Top => 0.0,
            VerticalAlign::Center => free / 2.0,
            VerticalAlign::Bottom => free,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets() {
        assert_eq!(HorizontalAlign::Center.offset(6.0, 10.0), 2.0);
        assert_eq!(HorizontalAlign::Right.offset(6.0, 10.0), 4.0);
        assert_eq!(VerticalAlign::Bottom.offset(12.0, 10.0), 0.0);
    }
}
