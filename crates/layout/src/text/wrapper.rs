use super::measure::TextMeasurer;
use carelabel_style::{BreakSymbol, Typography};
use carelabel_types::units::round6;

/// Wrapped lines in display order.
///
/// Blank manual lines survive as empty entries so paragraph breaks stay visible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WrapResult {
    pub lines: Vec<String>,
    /// At least one width came from the fallback estimator.
    pub approximate: bool,
}

impl WrapResult {
    pub fn new(lines: Vec<String>) -> Self {
        Self {
            lines,
            approximate: false,
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The lines joined back into source text with `symbol`.
    pub fn joined(&self, symbol: &BreakSymbol) -> String {
        symbol.join(&self.lines)
    }
}

/// Greedy word wrapper. Words are never broken; a word wider than the line is
/// emitted alone.
#[derive(Debug, Clone, Copy)]
pub struct LineBreaker<'m, 'p> {
    measurer: &'m TextMeasurer<'p>,
    tolerance_mm: f64,
}

impl<'m, 'p> LineBreaker<'m, 'p> {
    pub fn new(measurer: &'m TextMeasurer<'p>, tolerance_mm: f64) -> Self {
        Self {
            measurer,
            tolerance_mm,
        }
    }

    pub fn wrap(
        &self,
        text: &str,
        symbol: &BreakSymbol,
        available_width_mm: f64,
        typography: &Typography,
    ) -> WrapResult {
        let mut result = WrapResult::default();
        if text.trim().is_empty() {
            return result;
        }

        for manual_line in symbol.split(text) {
            let words: Vec<&str> = manual_line
                .split(' ')
                .map(str::trim)
                .filter(|w| !w.is_empty())
                .collect();
            if words.is_empty() {
                result.lines.push(String::new());
                continue;
            }
            self.wrap_words(&words, available_width_mm, typography, &mut result);
        }

        if result.approximate {
            log::warn!(
                "Wrapped {} line(s) with estimated widths; layout is approximate",
                result.lines.len()
            );
        }
        result
    }

    fn wrap_words(
        &self,
        words: &[&str],
        available_width_mm: f64,
        typography: &Typography,
        result: &mut WrapResult,
    ) {
        if available_width_mm <= 0.0 {
            result.lines.extend(words.iter().map(|w| w.to_string()));
            return;
        }

        let whole = words.join(" ");
        if self.fits(&whole, available_width_mm, typography, result) {
            result.lines.push(whole);
            return;
        }

        let mut current = String::new();
        for word in words {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{} {}", current, word);
            if self.fits(&candidate, available_width_mm, typography, result) {
                current = candidate;
            } else {
                log::debug!("Line break before '{}' at {:.3}mm", word, available_width_mm);
                result.lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        if !current.is_empty() {
            result.lines.push(current);
        }
    }

    fn fits(
        &self,
        line: &str,
        available_width_mm: f64,
        typography: &Typography,
        result: &mut WrapResult,
    ) -> bool {
        let measurement = self.measurer.measure(line, typography);
        result.approximate |= measurement.approximate;
        round6(measurement.width_mm()) <= round6(available_width_mm + self.tolerance_mm)
    }
}
