use crate::algorithms::overflow::{ShrinkOutcome, SplitResult, resolve};
use crate::content_area::ContentArea;
use crate::text::measure::TextMeasurer;
use crate::text::wrapper::{LineBreaker, WrapResult};
use crate::{LayoutConfig, LayoutError};
use carelabel_document::{ContentBlock, ContentKind};
use carelabel_style::{BreakSymbol, Typography};
use carelabel_traits::TextMetricsProvider;
use carelabel_types::{Size, units::round6};

/// The laid-out text of one block.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockText {
    pub area: ContentArea,
    pub typography: Typography,
    pub wrap: WrapResult,
    pub split: SplitResult,
    /// A single-line block whose text is wider than its content area.
    pub width_overflow: bool,
}

impl BlockText {
    pub fn approximate(&self) -> bool {
        self.wrap.approximate
    }
}

/// Measures, wraps and splits block text with one shared configuration.
#[derive(Debug, Clone, Copy)]
pub struct TextLayoutEngine<'p> {
    measurer: TextMeasurer<'p>,
    config: LayoutConfig,
}

impl<'p> TextLayoutEngine<'p> {
    pub fn new(provider: &'p dyn TextMetricsProvider, config: LayoutConfig) -> Self {
        Self {
            measurer: TextMeasurer::new(provider, &config),
            config,
        }
    }

    /// An engine without a metrics provider. All output is approximate.
    pub fn estimating(config: LayoutConfig) -> Self {
        Self {
            measurer: TextMeasurer::estimating(&config),
            config,
        }
    }

    /// Like `new`, but rejects an out-of-range configuration.
    pub fn try_new(
        provider: Option<&'p dyn TextMetricsProvider>,
        config: LayoutConfig,
    ) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(match provider {
            Some(provider) => Self::new(provider, config),
            None => Self::estimating(config),
        })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn measurer(&self) -> &TextMeasurer<'p> {
        &self.measurer
    }

    pub fn line_breaker(&self) -> LineBreaker<'_, 'p> {
        LineBreaker::new(&self.measurer, self.config.fit_tolerance_mm)
    }

    pub fn wrap(
        &self,
        text: &str,
        symbol: &BreakSymbol,
        available_width_mm: f64,
        typography: &Typography,
    ) -> WrapResult {
        self.line_breaker()
            .wrap(text, symbol, available_width_mm, typography)
    }

    /// Lays out `block` inside a region of `region` size with its own typography.
    pub fn layout_block(&self, block: &ContentBlock, region: Size) -> BlockText {
        self.layout_with(block, region, &block.typography)
    }

    /// Lays out `block` with `typography` in place of the block's own.
    pub fn layout_with(
        &self,
        block: &ContentBlock,
        region: Size,
        typography: &Typography,
    ) -> BlockText {
        let area = ContentArea::resolve(&block.layout, &block.line_break, region);
        let symbol = &block.line_break.symbol;

        let (wrap, width_overflow) = if block.content.is_pre_wrapped() {
            (pre_wrapped_lines(&block.content, symbol), false)
        } else if let ContentKind::SingleLine(payload) = &block.content {
            self.single_line(&payload.text, symbol, area.wrap_width_mm, typography)
        } else {
            let text = block.source_text();
            (
                self.wrap(&text, symbol, area.wrap_width_mm, typography),
                false,
            )
        };

        let split = resolve(
            &wrap,
            block.line_break.line_spacing,
            typography.font_size_mm(),
            area.available_height_mm(),
        );
        BlockText {
            area,
            typography: typography.clone(),
            wrap,
            split,
            width_overflow,
        }
    }

    /// Steps the font size down until the block's text fits its content area
    /// or the configured minimum is reached.
    pub fn shrink_to_fit(&self, block: &ContentBlock, region: Size) -> ShrinkOutcome {
        let start_px = block.typography.font_size_px();
        let floor_px = self.config.min_font_size_px;
        let mut attempt = 0usize;
        loop {
            let typography = if attempt == 0 {
                block.typography.clone()
            } else {
                block
                    .typography
                    .with_size_px(start_px - attempt as f64 * self.config.shrink_step_px)
            };
            let text = self.layout_with(block, region, &typography);
            attempt += 1;

            let next_px = start_px - attempt as f64 * self.config.shrink_step_px;
            let hit_floor = text.split.has_overflow && round6(next_px) < round6(floor_px);
            if !text.split.has_overflow || hit_floor {
                if hit_floor {
                    log::warn!(
                        "Block {} still overflows at {:.2}px, the smallest allowed size",
                        block.id,
                        typography.font_size_px()
                    );
                } else {
                    log::debug!(
                        "Block {} fits at {:.2}px after {} attempt(s)",
                        block.id,
                        typography.font_size_px(),
                        attempt
                    );
                }
                return ShrinkOutcome {
                    typography,
                    wrap: text.wrap,
                    split: text.split,
                    hit_floor,
                    attempts: attempt,
                };
            }
        }
    }

    fn single_line(
        &self,
        text: &str,
        symbol: &BreakSymbol,
        available_width_mm: f64,
        typography: &Typography,
    ) -> (WrapResult, bool) {
        let line = symbol
            .split(text)
            .flat_map(str::split_whitespace)
            .collect::<Vec<_>>()
            .join(" ");
        if line.is_empty() {
            return (WrapResult::default(), false);
        }
        let measurement = self.measurer.measure(&line, typography);
        let too_wide = round6(measurement.width_mm())
            > round6(available_width_mm + self.config.fit_tolerance_mm);
        if too_wide {
            log::warn!(
                "Single line is {:.2}mm wide, {:.2}mm available",
                measurement.width_mm(),
                available_width_mm
            );
        }
        let wrap = WrapResult {
            lines: vec![line],
            approximate: measurement.approximate,
        };
        (wrap, too_wide)
    }
}

/// Lines of a payload that must not be re-wrapped.
fn pre_wrapped_lines(content: &ContentKind, symbol: &BreakSymbol) -> WrapResult {
    if !content.lines().is_empty() {
        return WrapResult::new(content.lines().to_vec());
    }
    let text = content.source_text(symbol);
    if text.is_empty() {
        return WrapResult::default();
    }
    WrapResult::new(symbol.split(&text).map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{exact_engine, test_typography};
    use carelabel_document::{BlockLayout, TextPayload};
    use carelabel_style::{FontSizeUnit, LineBreakConfig, Padding};
    use carelabel_traits::FixedAdvanceMetrics;
    use carelabel_types::units::px_to_mm;

    fn bare_block(content: ContentKind) -> ContentBlock {
        ContentBlock::new(content)
            .with_layout(BlockLayout::default().with_padding(Padding::zero()))
            .with_typography(test_typography())
    }

    #[test]
    fn test_multi_line_wraps_and_splits() {
        let metrics = FixedAdvanceMetrics::new(0.5);
        let engine = exact_engine(&metrics);
        let block = bare_block(ContentKind::MultiLine(TextPayload::new("aaaa bbbb cccc dddd")));
        // 9 characters per line, line height 12px.
        let region = Size::new(px_to_mm(45.0), px_to_mm(24.0));

        let text = engine.layout_block(&block, region);
        assert_eq!(text.wrap.lines, vec!["aaaa bbbb", "cccc dddd"]);
        assert!(!text.split.has_overflow);
        assert!(!text.approximate());
    }

    #[test]
    fn test_single_line_is_not_wrapped() {
        let metrics = FixedAdvanceMetrics::new(0.5);
        let engine = exact_engine(&metrics);
        let block = bare_block(ContentKind::SingleLine(TextPayload::new("MADE IN\nPORTUGAL")));
        let region = Size::new(px_to_mm(30.0), 20.0);

        let text = engine.layout_block(&block, region);
        assert_eq!(text.wrap.lines, vec!["MADE IN PORTUGAL"]);
        assert!(text.width_overflow);
    }

    #[test]
    fn test_pre_wrapped_lines_are_kept() {
        let metrics = FixedAdvanceMetrics::new(0.5);
        let engine = exact_engine(&metrics);
        let lines = vec!["one two three".to_string(), "four".to_string()];
        let payload = TextPayload::pre_wrapped(lines.clone(), &BreakSymbol::newline());
        let block = bare_block(ContentKind::MultiLine(payload));

        let text = engine.layout_block(&block, Size::new(1.0, 100.0));
        assert_eq!(text.wrap.lines, lines);
    }

    #[test]
    fn test_shrink_until_fit() {
        let metrics = FixedAdvanceMetrics::new(0.5);
        let engine = exact_engine(&metrics);
        let block = bare_block(ContentKind::MultiLine(TextPayload::new("a\nb\nc")))
            .with_line_break(LineBreakConfig {
                line_spacing: 1.0,
                ..Default::default()
            });
        // Three 10px lines need 30px; 27px fits three 9px lines.
        let region = Size::new(50.0, px_to_mm(27.0));

        let outcome = engine.shrink_to_fit(&block, region);
        assert!(!outcome.hit_floor);
        assert!(!outcome.split.has_overflow);
        assert!((outcome.typography.font_size_px() - 9.0).abs() < 1e-9);
        assert_eq!(outcome.attempts, 3);
    }

    #[test]
    fn test_shrink_stops_at_floor() {
        let metrics = FixedAdvanceMetrics::new(0.5);
        let engine = exact_engine(&metrics);
        let block = bare_block(ContentKind::MultiLine(TextPayload::new("a\nb\nc\nd\ne")))
            .with_typography(Typography::new("Arial", 6.0, FontSizeUnit::Px));
        let region = Size::new(50.0, px_to_mm(5.0));

        let outcome = engine.shrink_to_fit(&block, region);
        assert!(outcome.hit_floor);
        assert!(outcome.split.has_overflow);
        assert!((outcome.typography.font_size_px() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = LayoutConfig {
            min_font_size_px: -1.0,
            ..Default::default()
        };
        assert!(TextLayoutEngine::try_new(None, config).is_err());
    }
}
