//! Market bands and price classification results

use serde::{Deserialize, Serialize};

use crate::impl_domain_status_conversions;

/// Price-per-area range considered "market" for a zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketBand {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

impl MarketBand {
    pub const fn new(min: f64, max: f64, avg: f64) -> Self {
        Self { min, max, avg }
    }

    /// Checks `0 <= min <= max` and `avg > 0`.
    pub fn validate(&self) -> std::result::Result<(), String> {
        let finite = self.min.is_finite() && self.max.is_finite() && self.avg.is_finite();
        if !finite || self.min < 0.0 || self.min > self.max {
            return Err(format!("band requires 0 <= min <= max (min={}, max={})", self.min, self.max));
        }
        if self.avg <= 0.0 {
            return Err(format!("band average must be positive (avg={})", self.avg));
        }
        Ok(())
    }
}

/// Position of a quote relative to its market band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceStatus {
    BelowMarket,
    InRange,
    AboveMarket,
}

impl_domain_status_conversions!(PriceStatus {
    BelowMarket => "below_market",
    InRange => "in_range",
    AboveMarket => "above_market",
});

impl PriceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::BelowMarket => "Below market",
            Self::InRange => "In range",
            Self::AboveMarket => "Above market",
        }
    }
}

/// Classification of a quoted price per area. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceClassification {
    pub status: PriceStatus,
    /// Rounded percent difference from the band average (negative = cheaper)
    pub percent_diff: i64,
    pub band: MarketBand,
    /// Zone key that supplied the band, `default` for the fallback band
    pub zone: String,
    pub quoted_price_per_area: f64,
}

impl PriceClassification {
    /// One-line explanation shown next to the status in reports.
    pub fn explanation(&self) -> String {
        format!(
            "{} ({:+}% vs avg {:.2}; band {:.2}-{:.2}, zone {})",
            self.status.label(),
            self.percent_diff,
            self.band.avg,
            self.band.min,
            self.band.max,
            self.zone
        )
    }
}
