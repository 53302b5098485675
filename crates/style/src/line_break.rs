use crate::{StyleError, require};
use serde::{Deserialize, Serialize};

/// The user-facing manual line-break marker.
///
/// `"\n"` and the two-character escape `"\\n"` both mean a real newline; any
/// other symbol is matched literally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct BreakSymbol(String);

impl BreakSymbol {
    /// Symbols offered by the block editors.
    pub const PRESETS: [&'static str; 5] = ["\\n", "<br>", "|", "/", "\\"];

    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    pub fn newline() -> Self {
        Self::new("\\n")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The literal separator used to split and join text.
    pub fn separator(&self) -> &str {
        match self.0.as_str() {
            "\\n" | "\n" => "\n",
            other => other,
        }
    }

    pub fn split<'s, 't>(&'s self, text: &'t str) -> std::str::Split<'t, &'s str> {
        text.split(self.separator())
    }

    pub fn join<S: AsRef<str>>(&self, lines: &[S]) -> String {
        let separator = self.separator();
        let mut out = String::new();
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            out.push_str(line.as_ref());
        }
        out
    }
}

impl Default for BreakSymbol {
    fn default() -> Self {
        Self::newline()
    }
}

fn default_line_spacing() -> f64 {
    1.2
}

fn default_line_width_percent() -> f64 {
    100.0
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineBreakConfig {
    #[serde(default)]
    pub symbol: BreakSymbol,
    /// Multiplier applied to the font size to get the line height.
    #[serde(default = "default_line_spacing")]
    pub line_spacing: f64,
    /// Share of the padded block width that lines may use, 10..=100.
    #[serde(default = "default_line_width_percent", alias = "lineWidth")]
    pub line_width_percent: f64,
}

impl Default for LineBreakConfig {
    fn default() -> Self {
        Self {
            symbol: BreakSymbol::default(),
            line_spacing: default_line_spacing(),
            line_width_percent: default_line_width_percent(),
        }
    }
}

impl LineBreakConfig {
    pub fn validate(&self) -> Result<(), StyleError> {
        require(!self.symbol.separator().is_empty(), || {
            "line break symbol must not be empty".to_string()
        })?;
        require(self.line_spacing.is_finite() && self.line_spacing >= 0.5, || {
            format!("line spacing must be at least 0.5, got {}", self.line_spacing)
        })?;
        require((10.0..=100.0).contains(&self.line_width_percent), || {
            format!(
                "line width must be between 10% and 100%, got {}%",
                self.line_width_percent
            )
        })
    }
}
