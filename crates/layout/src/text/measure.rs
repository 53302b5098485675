use crate::LayoutConfig;
use carelabel_style::Typography;
use carelabel_traits::TextMetricsProvider;
use carelabel_types::units::px_to_mm;

/// A measured width and whether it came from the crude estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub width_px: f64,
    pub approximate: bool,
}

impl Measurement {
    pub fn width_mm(&self) -> f64 {
        px_to_mm(self.width_px)
    }
}

/// Measures text through an injected provider, falling back to a
/// `chars × em × size` estimate when there is none or it cannot serve the font.
#[derive(Debug, Clone, Copy)]
pub struct TextMeasurer<'p> {
    provider: Option<&'p dyn TextMetricsProvider>,
    fallback_char_width_em: f64,
}

impl<'p> TextMeasurer<'p> {
    pub fn new(provider: &'p dyn TextMetricsProvider, config: &LayoutConfig) -> Self {
        Self {
            provider: Some(provider),
            fallback_char_width_em: config.fallback_char_width_em,
        }
    }

    /// A measurer with no provider; every measurement is approximate.
    pub fn estimating(config: &LayoutConfig) -> Self {
        Self {
            provider: None,
            fallback_char_width_em: config.fallback_char_width_em,
        }
    }

    pub fn provider_name(&self) -> Option<&'static str> {
        self.provider.map(|p| p.name())
    }

    pub fn measure(&self, text: &str, typography: &Typography) -> Measurement {
        let size_px = typography.font_size_px();
        if let Some(provider) = self.provider {
            match provider.measure_width_px(text, &typography.font_family, size_px) {
                Ok(width_px) => {
                    return Measurement {
                        width_px,
                        approximate: false,
                    };
                }
                Err(e) => {
                    log::debug!("{} could not measure: {}", provider.name(), e);
                }
            }
        }
        Measurement {
            width_px: self.estimate_px(text, size_px),
            approximate: true,
        }
    }

    fn estimate_px(&self, text: &str, size_px: f64) -> f64 {
        text.chars().count() as f64 * self.fallback_char_width_em * size_px
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carelabel_style::FontSizeUnit;
    use carelabel_traits::FixedAdvanceMetrics;

    fn typography() -> Typography {
        Typography::new("Arial", 10.0, FontSizeUnit::Px)
    }

    #[test]
    fn test_provider_measurement_is_exact() {
        let metrics = FixedAdvanceMetrics::new(0.5);
        let measurer = TextMeasurer::new(&metrics, &LayoutConfig::default());
        let m = measurer.measure("abcd", &typography());
        assert_eq!(m.width_px, 20.0);
        assert!(!m.approximate);
    }

    #[test]
    fn test_missing_provider_is_flagged_approximate() {
        let measurer = TextMeasurer::estimating(&LayoutConfig::default());
        let m = measurer.measure("abcd", &typography());
        assert!((m.width_px - 24.0).abs() < 1e-9);
        assert!(m.approximate);
        assert_eq!(measurer.provider_name(), None);
    }

    #[test]
    fn test_unavailable_family_falls_back() {
        let metrics = FixedAdvanceMetrics::new(0.5).with_family("Helvetica");
        let measurer = TextMeasurer::new(&metrics, &LayoutConfig::default());
        let m = measurer.measure("abcd", &typography());
        assert!(m.approximate);
    }
}
