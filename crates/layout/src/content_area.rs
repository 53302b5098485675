use carelabel_document::BlockLayout;
use carelabel_style::LineBreakConfig;
use carelabel_types::{Size, units::percent_of};

/// The space a block's text may occupy, in millimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentArea {
    /// Outer block size after resolving its width/height rules.
    pub block: Size,
    /// Block size minus padding.
    pub inner: Size,
    /// Width lines may use: the inner width scaled by the line-width percentage.
    pub wrap_width_mm: f64,
}

impl ContentArea {
    pub fn resolve(layout: &BlockLayout, line_break: &LineBreakConfig, region: Size) -> Self {
        let block = layout.resolve_size(region);
        let inner = block.inset(layout.padding.horizontal(), layout.padding.vertical());
        Self {
            block,
            inner,
            wrap_width_mm: percent_of(line_break.line_width_percent, inner.width),
        }
    }

    pub fn available_height_mm(&self) -> f64 {
        self.inner.height
    }
}
