use crate::text::wrapper::WrapResult;
use carelabel_style::Typography;
use carelabel_types::units::round6;

/// Lines divided at the height boundary of a content area.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitResult {
    pub fitting_lines: Vec<String>,
    pub overflow_lines: Vec<String>,
    pub has_overflow: bool,
    pub line_height_mm: f64,
    pub total_height_mm: f64,
}

impl SplitResult {
    /// Number of lines that fit.
    pub fn boundary(&self) -> usize {
        self.fitting_lines.len()
    }

    /// Fitting lines followed by overflow lines, i.e. the input of `resolve`.
    pub fn recombined(&self) -> Vec<String> {
        self.fitting_lines
            .iter()
            .chain(self.overflow_lines.iter())
            .cloned()
            .collect()
    }
}

/// Splits `wrap` at the largest line count whose stacked height fits
/// `available_height_mm`.
///
/// Heights are compared after rounding to 6 decimals, so ten 6mm lines exactly
/// fill a 60mm area. When content overflows at least one line always lands on
/// the overflow side.
pub fn resolve(
    wrap: &WrapResult,
    line_spacing: f64,
    font_size_mm: f64,
    available_height_mm: f64,
) -> SplitResult {
    let line_height_mm = font_size_mm * line_spacing;
    let total_height_mm = wrap.len() as f64 * line_height_mm;
    let has_overflow =
        line_height_mm > 0.0 && round6(total_height_mm) > round6(available_height_mm);

    if !has_overflow {
        return SplitResult {
            fitting_lines: wrap.lines.clone(),
            overflow_lines: Vec::new(),
            has_overflow,
            line_height_mm,
            total_height_mm,
        };
    }

    let capacity = (available_height_mm.max(0.0) / line_height_mm + 1e-9).floor() as usize;
    let boundary = capacity.min(wrap.len().saturating_sub(1));
    log::debug!(
        "{} line(s) of {:.3}mm overflow {:.3}mm; splitting after line {}",
        wrap.len(),
        line_height_mm,
        available_height_mm,
        boundary
    );
    SplitResult {
        fitting_lines: wrap.lines[..boundary].to_vec(),
        overflow_lines: wrap.lines[boundary..].to_vec(),
        has_overflow,
        line_height_mm,
        total_height_mm,
    }
}

/// The result of stepping a block's font size down until its text fits.
#[derive(Debug, Clone, PartialEq)]
pub struct ShrinkOutcome {
    /// The typography the text was finally laid out with.
    pub typography: Typography,
    pub wrap: WrapResult,
    pub split: SplitResult,
    /// The minimum font size was reached with text still overflowing.
    pub hit_floor: bool,
    pub attempts: usize,
}
