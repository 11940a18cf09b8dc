//! CRM deals and their enriched, denormalized view

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::line_item::{BoxStyle, LineItem};

/// A CRM opportunity as fetched, before enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub pipeline_id: String,
    pub stage_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub contact_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    /// Market zone tag used to pick the price band
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
}

/// Line item with its computed areas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedLineItem {
    #[serde(flatten)]
    pub item: LineItem,
    pub style: BoxStyle,
    pub unit_area_m2: f64,
    pub total_area_m2: f64,
}

/// Stage reference after lookup in the stage index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageRef {
    pub id: String,
    pub label: String,
    /// `false` when the id was not present in the stage index
    pub resolved: bool,
}

/// Denormalized deal view consumed by aggregation, classification and
/// reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedDeal {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub pipeline_id: String,
    pub stage: StageRef,
    pub created_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub contact_ids: Vec<String>,
    pub company_id: Option<String>,
    pub company_name: Option<String>,
    pub zone: Option<String>,
    pub line_items: Vec<EnrichedLineItem>,
    pub total_area_m2: f64,
    /// `None` means "no data": the deal has no measurable area
    pub avg_price_per_area: Option<f64>,
    pub subtotal: f64,
    pub tax_total: f64,
    pub days_since_creation: i64,
}

impl EnrichedDeal {
    pub fn has_area(&self) -> bool {
        self.total_area_m2 > 0.0
    }
}
