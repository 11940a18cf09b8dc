//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Geometry
pub const MM2_PER_M2: f64 = 1_000_000.0;

// Enrichment
pub const MS_PER_DAY: i64 = 86_400_000;
pub const UNKNOWN_STAGE_LABEL: &str = "Unknown stage";

// Aggregation
pub const UNMAPPED_STAGE_ID: &str = "__unmapped__";
pub const UNMAPPED_STAGE_LABEL: &str = "Unmapped";

// Market bands
pub const DEFAULT_BAND_KEY: &str = "default";

// Reporting
pub const DEFAULT_TIMEZONE: &str = "America/Argentina/Buenos_Aires";
pub const DEFAULT_ZONE_PROPERTY: &str = "zona";

// HubSpot
pub const DEFAULT_HUBSPOT_BASE_URL: &str = "https://api.hubapi.com";
pub const DEFAULT_HUBSPOT_PAGE_SIZE: u32 = 100;
pub const DEFAULT_PIPELINE_ID: &str = "default";
/// Per-deal and per-company fetches kept in flight at once
pub const DEFAULT_FETCH_CONCURRENCY: usize = 4;

// Export
pub const UTF8_BOM: &str = "\u{feff}";
