use crate::LayoutError;
use carelabel_document::DUPLICATE_GAP_MM;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Slack, in millimeters, added to the available width before a candidate
    /// line is rejected. Absorbs provider rounding so a line that measures a
    /// hair over the limit still counts as fitting.
    ///
    /// Every wrapping path uses this one margin. Defaults to `1.0`.
    pub fit_tolerance_mm: f64,

    /// Advance, in em, of every character when no metrics provider can measure
    /// the text. Output produced this way is flagged as approximate.
    ///
    /// Defaults to `0.6`.
    pub fallback_char_width_em: f64,

    /// The smallest font size the shrink strategy will try. Defaults to `4.0`.
    pub min_font_size_px: f64,

    /// How much the shrink strategy reduces the font size per attempt.
    /// Defaults to `0.5`.
    pub shrink_step_px: f64,

    /// Horizontal gap between a container and a copy placed beside it, shared
    /// by manual duplication and overflow migration.
    pub duplicate_gap_mm: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            fit_tolerance_mm: 1.0,
            fallback_char_width_em: 0.6,
            min_font_size_px: 4.0,
            shrink_step_px: 0.5,
            duplicate_gap_mm: DUPLICATE_GAP_MM,
        }
    }
}

impl LayoutConfig {
    /// A configuration that compares widths exactly, without slack.
    pub fn exact() -> Self {
        Self {
            fit_tolerance_mm: 0.0,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        let checks = [
            ("fit tolerance", self.fit_tolerance_mm, self.fit_tolerance_mm >= 0.0),
            (
                "fallback character width",
                self.fallback_char_width_em,
                self.fallback_char_width_em > 0.0,
            ),
            ("minimum font size", self.min_font_size_px, self.min_font_size_px > 0.0),
            ("shrink step", self.shrink_step_px, self.shrink_step_px > 0.0),
            ("duplicate gap", self.duplicate_gap_mm, self.duplicate_gap_mm >= 0.0),
        ];
        for (name, value, ok) in checks {
            if !(ok && value.is_finite()) {
                return Err(LayoutError::InvalidConfiguration(format!(
                    "{} out of range: {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = LayoutConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.duplicate_gap_mm, DUPLICATE_GAP_MM);
        assert_eq!(LayoutConfig::exact().fit_tolerance_mm, 0.0);
    }

    #[test]
    fn test_rejects_zero_step() {
        let config = LayoutConfig {
            shrink_step_px: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidConfiguration(_))
        ));
    }
}
