//! Cell formatting

/// Money with two decimals.
pub fn amount(value: f64) -> String {
    format!("{value:.2}")
}

/// Area in m² with three decimals.
pub fn area(value: f64) -> String {
    format!("{value:.3}")
}

/// Missing values render as an empty cell, never as 0.
pub fn optional_amount(value: Option<f64>) -> String {
    value.map(amount).unwrap_or_default()
}

pub fn percent(value: i64) -> String {
    format!("{value:+}%")
}

pub fn optional_percent(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.1}%")).unwrap_or_default()
}

/// Dimensions as `L×W×H` in millimetres, without trailing zeros.
pub fn dimensions(length_mm: f64, width_mm: f64, height_mm: f64) -> String {
    format!("{}×{}×{}", trim(length_mm), trim(width_mm), trim(height_mm))
}

/// Quantity without a decimal part when it is whole.
pub fn trim(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats() {
        assert_eq!(amount(1234.5), "1234.50");
        assert_eq!(area(0.648), "0.648");
        assert_eq!(optional_amount(None), "");
        assert_eq!(percent(23), "+23%");
        assert_eq!(percent(-8), "-8%");
        assert_eq!(optional_percent(Some(50.0)), "50.0%");
        assert_eq!(dimensions(400.0, 300.0, 150.5), "400×300×150.5");
        assert_eq!(trim(3.0), "3");
    }
}
