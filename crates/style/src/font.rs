use crate::{StyleError, parsers, require};
use carelabel_types::units::{PX_PER_MM, PX_PER_PT, pt_to_px, px_to_mm};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontSizeUnit {
    #[default]
    Px,
    Pt,
    Mm,
}

impl FontSizeUnit {
    /// Converts a size in this unit to pixels.
    pub fn to_px(self, size: f64) -> f64 {
        match self {
            FontSizeUnit::Px => size,
            FontSizeUnit::Pt => pt_to_px(size),
            FontSizeUnit::Mm => size * PX_PER_MM,
        }
    }

    /// Converts a pixel size back into this unit.
    pub fn from_px(self, px: f64) -> f64 {
        match self {
            FontSizeUnit::Px => px,
            FontSizeUnit::Pt => px / PX_PER_PT,
            FontSizeUnit::Mm => px_to_mm(px),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub font_family: String,
    pub font_size: f64,
    #[serde(default)]
    pub font_size_unit: FontSizeUnit,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 14.0,
            font_size_unit: FontSizeUnit::Px,
        }
    }
}

impl Typography {
    pub fn new(font_family: impl Into<String>, font_size: f64, font_size_unit: FontSizeUnit) -> Self {
        Self {
            font_family: font_family.into(),
            font_size,
            font_size_unit,
        }
    }

    /// Builds a typography from a CSS-like size such as `"6pt"` or `"3.5mm"`.
    pub fn from_css(font_family: impl Into<String>, size: &str) -> Result<Self, StyleError> {
        let (font_size, font_size_unit) = parsers::run_parser(parsers::parse_font_size, size)
            .map_err(|e| StyleError::InvalidConfiguration(e.to_string()))?;
        Ok(Self::new(font_family, font_size, font_size_unit))
    }

    pub fn font_size_px(&self) -> f64 {
        self.font_size_unit.to_px(self.font_size)
    }

    pub fn font_size_mm(&self) -> f64 {
        px_to_mm(self.font_size_px())
    }

    /// Returns a copy resized to `px`, expressed in this typography's own unit.
    pub fn with_size_px(&self, px: f64) -> Self {
        Self {
            font_size: self.font_size_unit.from_px(px),
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<(), StyleError> {
        require(!self.font_family.trim().is_empty(), || {
            "font family must not be empty".to_string()
        })?;
        require(self.font_size.is_finite() && self.font_size > 0.0, || {
            format!("font size must be positive, got {}", self.font_size)
        })
    }
}
