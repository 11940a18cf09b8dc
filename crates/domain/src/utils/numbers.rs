//! Lenient numeric parsing for CRM-sourced values
//!
//! CRM properties arrive as strings that may be empty, localized or garbage.
//! Reports must still render, so every helper here degrades to `0.0` instead
//! of failing.

/// Parse a CRM property value into a finite number.
///
/// Missing, empty, non-numeric, NaN and infinite values all become `0.0`.
/// A single decimal comma (`"12,5"`) is accepted when no dot is present.
///
/// ```
/// use dealscope_domain::parse_lenient_number;
///
/// assert_eq!(parse_lenient_number(Some("1500.5")), 1500.5);
/// assert_eq!(parse_lenient_number(Some(" 12,5 ")), 12.5);
/// assert_eq!(parse_lenient_number(Some("n/a")), 0.0);
/// assert_eq!(parse_lenient_number(None), 0.0);
/// ```
#[must_use]
pub fn parse_lenient_number(raw: Option<&str>) -> f64 {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return 0.0;
    };

    let parsed = raw.parse::<f64>().ok().or_else(|| {
        if raw.contains('.') || raw.matches(',').count() != 1 {
            return None;
        }
        raw.replace(',', ".").parse::<f64>().ok()
    });

    parsed.filter(|value| value.is_finite()).unwrap_or(0.0)
}

/// Clamp a value to a finite, non-negative number.
#[must_use]
pub fn sanitize_non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
