//! Box geometry: sheet area per unit from dimensions and style
//!
//! Every formula computes the flat sheet needed to fold one box. Inputs are
//! millimetres, outputs square metres. Malformed input degrades to `0.0`.

use dealscope_domain::constants::MM2_PER_M2;
use dealscope_domain::{sanitize_non_negative, BoxStyle, LineItem};

/// Unit area in m² for a raw style tag.
///
/// Parses the tag into a [`BoxStyle`] and delegates to [`unit_area`].
///
/// ```
/// use dealscope_core::pricing::compute_unit_area;
///
/// let area = compute_unit_area(Some("Dos Planchas"), 500.0, 300.0, 200.0);
/// assert!((area - 0.84).abs() < 1e-12);
/// ```
pub fn compute_unit_area(
    style_tag: Option<&str>,
    length_mm: f64,
    width_mm: f64,
    height_mm: f64,
) -> f64 {
    unit_area(BoxStyle::parse(style_tag), length_mm, width_mm, height_mm)
}

/// Unit area in m² for an already parsed style.
///
/// Returns `0.0` when length or width is not a positive number. Height is
/// only used by formulas that need it; a missing height counts as 0.
pub fn unit_area(style: BoxStyle, length_mm: f64, width_mm: f64, height_mm: f64) -> f64 {
    let l = finite_or_zero(length_mm);
    let w = finite_or_zero(width_mm);
    let h = sanitize_non_negative(height_mm);

    if l <= 0.0 || w <= 0.0 {
        return 0.0;
    }

    let mm2 = match style {
        BoxStyle::TwoSheets => {
            let sheet_len = l + w + 40.0;
            let sheet_width = w + h;
            sheet_len * sheet_width * 2.0
        }
        BoxStyle::Tray => {
            let sheet_len = l + 2.0 * h + 30.0;
            let sheet_width = w + 2.0 * h;
            sheet_len * sheet_width
        }
        BoxStyle::Fence => {
            let sheet_len = 2.0 * (l - 10.0) + 2.0 * (w - 10.0) + 40.0;
            let sheet_width = w + h;
            sheet_len * sheet_width
        }
        BoxStyle::CrossedFlapTwoSides => {
            let sheet_len = 2.0 * l + 2.0 * w + 40.0;
            let sheet_width = 2.0 * w + l - 20.0;
            sheet_len * sheet_width
        }
        BoxStyle::CrossedFlapOneSide => {
            let sheet_len = 2.0 * l + 2.0 * w + 40.0;
            let sheet_width = w + 0.5 * w + h - 10.0;
            sheet_len * sheet_width
        }
        BoxStyle::Telescopic => {
            let sheet_len = 2.0 * l + 2.0 * w + 50.0;
            let sheet_width = 0.5 * w + h;
            sheet_len * sheet_width
        }
        BoxStyle::Sheet => l * w,
        BoxStyle::SimpleFlap => {
            let sheet_len = 2.0 * l + 2.0 * w + 40.0;
            let sheet_width = w + h;
            sheet_len * sheet_width
        }
    };

    // Formulas that subtract constants can go negative for tiny boxes
    sanitize_non_negative(mm2 / MM2_PER_M2)
}

/// Total area of a line item: unit area × quantity.
pub fn line_total_area(item: &LineItem) -> f64 {
    let unit = unit_area(item.style(), item.length_mm, item.width_mm, item.height_mm);
    unit * sanitize_non_negative(item.quantity)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
