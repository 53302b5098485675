use crate::{LayoutConfig, TextLayoutEngine, TextMeasurer};
use carelabel_style::{FontSizeUnit, Typography};
use carelabel_traits::TextMetricsProvider;

/// 10px Arial: with 0.5em advances every character is exactly 5px wide.
pub fn test_typography() -> Typography {
    Typography::new("Arial", 10.0, FontSizeUnit::Px)
}

/// A measurer over `provider` that compares widths without tolerance.
pub fn exact_measurer(provider: &dyn TextMetricsProvider) -> TextMeasurer<'_> {
    TextMeasurer::new(provider, &LayoutConfig::exact())
}

pub fn exact_engine(provider: &dyn TextMetricsProvider) -> TextLayoutEngine<'_> {
    TextLayoutEngine::new(provider, LayoutConfig::exact())
}
