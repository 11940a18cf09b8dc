//! Market price classifier
//!
//! Compares a quoted price per m² with the static band configured for the
//! deal's zone. Never consults live data, so the same inputs always produce
//! the same classification.

use std::collections::HashMap;

use dealscope_domain::constants::DEFAULT_BAND_KEY;
use dealscope_domain::{EnrichedDeal, MarketBand, MarketConfig, PriceClassification, PriceStatus};

/// Zone → band lookup with a fallback band.
#[derive(Debug, Clone)]
pub struct MarketClassifier {
    bands: HashMap<String, MarketBand>,
    default_band: MarketBand,
}

impl MarketClassifier {
    pub fn new(config: &MarketConfig) -> Self {
        let bands = config
            .bands
            .iter()
            .map(|(zone, band)| (normalize_zone(zone), *band))
            .collect();
        Self { bands, default_band: config.default_band }
    }

    /// Band for a zone plus the key that supplied it.
    pub fn band_for(&self, zone: &str) -> (&str, MarketBand) {
        let key = normalize_zone(zone);
        match self.bands.get_key_value(&key) {
            Some((zone_key, band)) => (zone_key.as_str(), *band),
            None => (DEFAULT_BAND_KEY, self.default_band),
        }
    }

    /// Classify a quoted price per area for a zone.
    ///
    /// Band bounds are inclusive: a quote equal to `min` or `max` is in range.
    /// The quote must be finite; NaN would land in range. Use
    /// [`classify_quote`](Self::classify_quote) for unchecked input.
    pub fn classify(&self, zone: &str, quoted_price_per_area: f64) -> PriceClassification {
        let (zone_key, band) = self.band_for(zone);

        let status = if quoted_price_per_area < band.min {
            PriceStatus::BelowMarket
        } else if quoted_price_per_area > band.max {
            PriceStatus::AboveMarket
        } else {
            PriceStatus::InRange
        };

        PriceClassification {
            status,
            percent_diff: percent_diff(quoted_price_per_area, band.avg),
            band,
            zone: zone_key.to_string(),
            quoted_price_per_area,
        }
    }

    /// Like [`classify`](Self::classify), but a non-finite quote is no data.
    pub fn classify_quote(
        &self,
        zone: &str,
        quoted_price_per_area: f64,
    ) -> Option<PriceClassification> {
        quoted_price_per_area.is_finite().then(|| self.classify(zone, quoted_price_per_area))
    }

    /// Classify an enriched deal; `None` when the deal has no usable price
    /// per area.
    pub fn classify_deal(&self, deal: &EnrichedDeal) -> Option<PriceClassification> {
        let price = deal.avg_price_per_area?;
        self.classify_quote(deal.zone.as_deref().unwrap_or_default(), price)
    }
}

impl Default for MarketClassifier {
    fn default() -> Self {
        Self::new(&MarketConfig::default())
    }
}

fn normalize_zone(zone: &str) -> String {
    zone.trim().to_lowercase()
}

/// Rounded percent difference; halves round toward +∞.
fn percent_diff(quoted: f64, avg: f64) -> i64 {
    if avg <= 0.0 || !quoted.is_finite() {
        return 0;
    }
    let pct = (quoted - avg) * 100.0 / avg;
    (pct + 0.5).floor() as i64
}
