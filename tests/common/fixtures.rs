use carelabel::{
    BlockLayout, Container, ContainerId, ContentBlock, FixedAdvanceMetrics, FontSizeUnit,
    LabelDocument, Length, OverflowOption, Padding, Rect, Region, RegionId, Typography,
};

/// Every character is half an em wide, so a 10px font measures 5px per char.
pub fn half_em_metrics() -> FixedAdvanceMetrics {
    FixedAdvanceMetrics::new(0.5)
}

pub fn typography_px(size: f64) -> Typography {
    Typography::new("Arial", size, FontSizeUnit::Px)
}

/// A multi-line block filling its region with no padding.
pub fn text_block(text: &str, typography: Typography, option: OverflowOption) -> ContentBlock {
    ContentBlock::multi_line(text)
        .with_layout(BlockLayout::default().with_padding(Padding::zero()))
        .with_typography(typography)
        .with_overflow(option)
}

/// A block covering a share of its region, in percent of width and height.
pub fn sized_block(width_pct: f64, height_pct: f64) -> ContentBlock {
    ContentBlock::multi_line("x").with_layout(
        BlockLayout::sized(Length::percent(width_pct), Length::percent(height_pct))
            .with_padding(Padding::zero()),
    )
}

/// A document holding one container with a single empty region.
pub fn single_region_document(
    name: &str,
    bounds: Rect,
    region_size: (f64, f64),
) -> (LabelDocument, ContainerId, RegionId) {
    let region = Region::new("body", Rect::new(0.0, 0.0, region_size.0, region_size.1));
    let region_id = region.id.clone();
    let mut document = LabelDocument::new();
    let container = document.add_container(Container::new(name, bounds).with_region(region));
    (document, container, region_id)
}

/// Numbered lines `"line 1"` .. `"line n"` joined by newlines.
pub fn numbered_lines(n: usize) -> String {
    (1..=n)
        .map(|i| format!("line {}", i))
        .collect::<Vec<_>>()
        .join("\n")
}
