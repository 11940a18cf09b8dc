//! Configuration structures
//!
//! Every section has defaults so partial JSON/TOML files load cleanly. A
//! `market.bands` table in a config file replaces the built-in band table as
//! a whole.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_FETCH_CONCURRENCY, DEFAULT_HUBSPOT_BASE_URL, DEFAULT_HUBSPOT_PAGE_SIZE,
    DEFAULT_PIPELINE_ID, DEFAULT_TIMEZONE, DEFAULT_ZONE_PROPERTY,
};
use crate::errors::{DealScopeError, Result};
use crate::types::{DateBasis, MarketBand, TimeGranularity};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub hubspot: HubSpotConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub market: MarketConfig,
}

impl Config {
    /// Validate values that serde cannot check on its own.
    ///
    /// Timezone names are checked by the loader, which owns the tz database.
    pub fn validate(&self) -> Result<()> {
        if self.hubspot.page_size == 0 || self.hubspot.page_size > 100 {
            return Err(DealScopeError::Config(format!(
                "hubspot.page_size must be between 1 and 100 (got {})",
                self.hubspot.page_size
            )));
        }
        if self.hubspot.fetch_concurrency == 0 {
            return Err(DealScopeError::Config(
                "hubspot.fetch_concurrency must be at least 1".into(),
            ));
        }
        if self.hubspot.pipeline_id.trim().is_empty() {
            return Err(DealScopeError::Config("hubspot.pipeline_id must not be empty".into()));
        }
        self.market.validate()
    }
}

/// HubSpot CRM connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubSpotConfig {
    pub base_url: String,
    /// Private app access token
    pub access_token: String,
    pub pipeline_id: String,
    pub page_size: u32,
    pub timeout_secs: u64,
    /// Total HTTP attempts per request (initial try + retries)
    pub max_attempts: usize,
    /// Line-item and company lookups in flight at once
    pub fetch_concurrency: usize,
}

impl Default for HubSpotConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_HUBSPOT_BASE_URL.to_string(),
            access_token: String::new(),
            pipeline_id: DEFAULT_PIPELINE_ID.to_string(),
            page_size: DEFAULT_HUBSPOT_PAGE_SIZE,
            timeout_secs: 30,
            max_attempts: 3,
            fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
        }
    }
}

/// Report rendering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// IANA timezone used for day/month buckets
    pub timezone: String,
    /// Deal property holding the market zone
    pub zone_property: String,
    pub granularity: TimeGranularity,
    pub basis: DateBasis,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            zone_property: DEFAULT_ZONE_PROPERTY.to_string(),
            granularity: TimeGranularity::Day,
            basis: DateBasis::Created,
        }
    }
}

/// Static market price bands, keyed by lowercase zone name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub bands: BTreeMap<String, MarketBand>,
    pub default_band: MarketBand,
}

impl MarketConfig {
    pub fn validate(&self) -> Result<()> {
        self.default_band
            .validate()
            .map_err(|e| DealScopeError::Config(format!("market.default_band: {e}")))?;
        for (zone, band) in &self.bands {
            band.validate()
                .map_err(|e| DealScopeError::Config(format!("market.bands.{zone}: {e}")))?;
        }
        Ok(())
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        let bands = BTreeMap::from([
            ("amba".to_string(), MarketBand::new(550.0, 750.0, 650.0)),
            ("caba".to_string(), MarketBand::new(600.0, 800.0, 700.0)),
            ("interior".to_string(), MarketBand::new(500.0, 700.0, 600.0)),
            ("patagonia".to_string(), MarketBand::new(650.0, 900.0, 775.0)),
        ]);
        Self { bands, default_band: MarketBand::new(550.0, 750.0, 650.0) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.report.timezone, DEFAULT_TIMEZONE);
        assert_eq!(config.market.bands.len(), 4);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"hubspot": {"access_token": "pat-123"}}"#).unwrap();
        assert_eq!(config.hubspot.access_token, "pat-123");
        assert_eq!(config.hubspot.page_size, DEFAULT_HUBSPOT_PAGE_SIZE);
        assert_eq!(config.report.zone_property, DEFAULT_ZONE_PROPERTY);
    }

    #[test]
    fn rejects_out_of_range_page_size() {
        let mut config = Config::default();
        config.hubspot.page_size = 500;
        assert!(matches!(config.validate(), Err(DealScopeError::Config(_))));
    }

    #[test]
    fn rejects_zero_fetch_concurrency() {
        let mut config = Config::default();
        config.hubspot.fetch_concurrency = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("fetch_concurrency"));
    }

    #[test]
    fn rejects_inverted_band() {
        let mut config = Config::default();
        config.market.bands.insert("norte".into(), MarketBand::new(900.0, 100.0, 500.0));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("market.bands.norte"));
    }
}
