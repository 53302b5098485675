//! Conversions between physical units at the fixed 96 DPI reference resolution.
//!
//! Every engine quantity is carried in millimeters; pixels only appear at the
//! text-measurement boundary and points only in typography input.

/// Pixels per millimeter at 96 DPI (96 / 25.4).
pub const PX_PER_MM: f64 = 3.779527559;

/// Pixels per point (96 / 72).
pub const PX_PER_PT: f64 = 4.0 / 3.0;

pub fn mm_to_px(mm: f64) -> f64 {
    mm * PX_PER_MM
}

pub fn px_to_mm(px: f64) -> f64 {
    px / PX_PER_MM
}

pub fn pt_to_px(pt: f64) -> f64 {
    pt * PX_PER_PT
}

pub fn px_to_pt(px: f64) -> f64 {
    px / PX_PER_PT
}

pub fn pt_to_mm(pt: f64) -> f64 {
    px_to_mm(pt_to_px(pt))
}

/// Resolves a percentage against the reference length it is relative to.
pub fn percent_of(percent: f64, reference: f64) -> f64 {
    reference * percent / 100.0
}

/// Rounds to 6 decimal places. Area and height comparisons go through this so
/// that accumulated floating point drift cannot flip an exact fit into a reject.
pub fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}
