//! Property tests for wrapping, splitting and region accounting.

mod common;

use carelabel::layout::resolve;
use carelabel::types::units::round6;
use carelabel::{BreakSymbol, LayoutConfig, RegionSpaceLedger, Size, TextLayoutEngine, WrapResult};
use common::fixtures::*;
use proptest::prelude::*;

fn words_of(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .flat_map(|l| l.split_whitespace())
        .map(str::to_string)
        .collect()
}

proptest! {
    #[test]
    fn rewrapping_wrapped_text_is_stable(
        text in "[a-z ]{0,40}(\n[a-z ]{0,40}){0,3}",
        width in 1.0f64..60.0,
        tolerance in 0.0f64..2.0,
    ) {
        let metrics = half_em_metrics();
        let config = LayoutConfig { fit_tolerance_mm: tolerance, ..LayoutConfig::default() };
        let engine = TextLayoutEngine::new(&metrics, config);
        let symbol = BreakSymbol::newline();
        let typography = typography_px(10.0);

        let first = engine.wrap(&text, &symbol, width, &typography);
        let second = engine.wrap(&first.joined(&symbol), &symbol, width, &typography);
        prop_assert_eq!(first.lines, second.lines);
    }

    #[test]
    fn wrapping_never_splits_or_loses_words(
        text in "[a-z]{1,12}( {1,3}[a-z]{1,12}){0,15}",
        width in 0.5f64..40.0,
    ) {
        let metrics = half_em_metrics();
        let engine = TextLayoutEngine::new(&metrics, LayoutConfig::exact());
        let wrap = engine.wrap(&text, &BreakSymbol::newline(), width, &typography_px(10.0));

        let expected: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        prop_assert_eq!(words_of(&wrap.lines), expected);
    }

    #[test]
    fn wrapped_lines_fit_unless_single_word(
        text in "[a-z]{1,12}( [a-z]{1,12}){0,15}",
        width in 5.0f64..40.0,
    ) {
        let metrics = half_em_metrics();
        let engine = TextLayoutEngine::new(&metrics, LayoutConfig::exact());
        let typography = typography_px(10.0);
        let wrap = engine.wrap(&text, &BreakSymbol::newline(), width, &typography);

        for line in &wrap.lines {
            let measured = engine.measurer().measure(line, &typography).width_mm();
            prop_assert!(
                round6(measured) <= round6(width) || !line.contains(' '),
                "line '{}' is {}mm wide in {}mm", line, measured, width
            );
        }
    }

    #[test]
    fn more_height_never_fits_fewer_lines(
        count in 0usize..40,
        font_size_mm in 1.0f64..10.0,
        spacing in 0.5f64..3.0,
        height in 0.0f64..100.0,
        extra in 0.0f64..50.0,
    ) {
        let wrap = WrapResult::new((0..count).map(|i| i.to_string()).collect());
        let lower = resolve(&wrap, spacing, font_size_mm, height);
        let higher = resolve(&wrap, spacing, font_size_mm, height + extra);

        prop_assert!(lower.fitting_lines.len() <= higher.fitting_lines.len());
        prop_assert!(!higher.has_overflow || lower.has_overflow);
    }

    #[test]
    fn split_keeps_every_line_in_order(
        count in 0usize..40,
        font_size_mm in 1.0f64..10.0,
        height in 0.0f64..100.0,
    ) {
        let wrap = WrapResult::new((0..count).map(|i| format!("line {}", i)).collect());
        let split = resolve(&wrap, 1.2, font_size_mm, height);

        prop_assert_eq!(split.recombined(), wrap.lines.clone());
        prop_assert_eq!(split.has_overflow, !split.overflow_lines.is_empty());
        if split.has_overflow {
            let used = split.fitting_lines.len() as f64 * split.line_height_mm;
            prop_assert!(round6(used) <= round6(height));
        }
    }

    #[test]
    fn used_and_remaining_area_add_up(
        width in 1.0f64..200.0,
        height in 1.0f64..200.0,
        shares in proptest::collection::vec((1.0f64..100.0, 1.0f64..100.0), 0..6),
    ) {
        let region = Size::new(width, height);
        let blocks: Vec<_> = shares.iter().map(|&(w, h)| sized_block(w, h)).collect();
        let report = RegionSpaceLedger::new(region, &blocks).remaining();

        prop_assert!(
            (report.used_area_mm2 + report.remaining_area_mm2 - report.region_area_mm2).abs() < 1e-5
        );
        prop_assert!((report.used_percent + report.remaining_percent - 100.0).abs() < 1e-4);
    }
}
