//! TextMetricsProvider trait for abstracting text measurement.
//!
//! The layout engine never talks to a rendering surface directly. Anything
//! that can report the rendered width of a string (a shaping engine over real
//! font files, a canvas bridge, a fixed-advance table in tests) implements
//! this trait and is injected into the measurer.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use thiserror::Error;

/// Error type for measurement operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricsError {
    #[error("No metrics available for font family '{family}'")]
    Unavailable { family: String },

    #[error("Measurement failed for '{text}': {message}")]
    Failed { text: String, message: String },

    #[error("Invalid font data: {0}")]
    InvalidFont(String),
}

/// A source of rendered text widths.
///
/// Implementations must be deterministic for a given font and platform and
/// fast enough to be called once per candidate line.
pub trait TextMetricsProvider: Send + Sync + Debug {
    /// Returns the rendered width of `text` in pixels.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError::Unavailable` if the provider has no metrics for
    /// `font_family`; callers fall back to an estimate.
    fn measure_width_px(
        &self,
        text: &str,
        font_family: &str,
        font_size_px: f64,
    ) -> Result<f64, MetricsError>;

    /// Returns a human-readable name for this provider (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// A provider that assigns every character a fixed advance in em units.
///
/// Widths scale linearly with font size and are exactly additive, which makes
/// wrap boundaries predictable in tests.
#[derive(Debug, Clone)]
pub struct FixedAdvanceMetrics {
    default_advance_em: f64,
    advances: HashMap<char, f64>,
    families: HashSet<String>,
}

impl FixedAdvanceMetrics {
    /// Every character (spaces included) advances by `default_advance_em`.
    pub fn new(default_advance_em: f64) -> Self {
        Self {
            default_advance_em,
            advances: HashMap::new(),
            families: HashSet::new(),
        }
    }

    /// Overrides the advance of a single character.
    pub fn with_advance(mut self, c: char, advance_em: f64) -> Self {
        self.advances.insert(c, advance_em);
        self
    }

    /// Restricts the provider to the given family; other families report
    /// `MetricsError::Unavailable`. With no families registered, all are served.
    pub fn with_family(mut self, family: &str) -> Self {
        self.families.insert(family.to_lowercase());
        self
    }

    fn advance(&self, c: char) -> f64 {
        self.advances
            .get(&c)
            .copied()
            .unwrap_or(self.default_advance_em)
    }
}

impl Default for FixedAdvanceMetrics {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl TextMetricsProvider for FixedAdvanceMetrics {
    fn measure_width_px(
        &self,
        text: &str,
        font_family: &str,
        font_size_px: f64,
    ) -> Result<f64, MetricsError> {
        if !self.families.is_empty() && !self.families.contains(&font_family.to_lowercase()) {
            return Err(MetricsError::Unavailable {
                family: font_family.to_string(),
            });
        }
        let ems: f64 = text.chars().map(|c| self.advance(c)).sum();
        Ok(ems * font_size_px)
    }

    fn name(&self) -> &'static str {
        "FixedAdvanceMetrics"
    }
}
