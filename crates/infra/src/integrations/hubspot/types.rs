//! HubSpot CRM v3/v4 wire types and their conversion into domain records
//!
//! HubSpot returns every object property as a nullable string; conversion
//! is lenient so a bad cell degrades to zero or `None` instead of failing
//! the whole report.

use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};
use dealscope_domain::{parse_lenient_number, Deal, LineItem, Stage};
use serde::{Deserialize, Serialize};

/// Deal properties requested from the objects endpoint (zone property is
/// appended at runtime).
pub const DEAL_PROPERTIES: &[&str] =
    &["dealname", "amount", "pipeline", "dealstage", "createdate", "closedate"];

/// Line item properties requested in batch reads.
pub const LINE_ITEM_PROPERTIES: &[&str] = &[
    "name",
    "quantity",
    "price",
    "amount",
    "hs_tax_amount",
    "length_mm",
    "width_mm",
    "height_mm",
    "box_style",
];

/// One page of a CRM object listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectPage {
    #[serde(default)]
    pub results: Vec<CrmObject>,
    #[serde(default)]
    pub paging: Option<Paging>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub next: Option<PagingNext>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PagingNext {
    pub after: String,
}

impl Paging {
    pub fn next_after(paging: Option<&Paging>) -> Option<String> {
        paging.and_then(|p| p.next.as_ref()).map(|n| n.after.clone())
    }
}

/// A CRM object with string properties and optional v3 associations.
#[derive(Debug, Clone, Deserialize)]
pub struct CrmObject {
    pub id: String,
    #[serde(default)]
    pub properties: HashMap<String, Option<String>>,
    #[serde(default)]
    pub associations: HashMap<String, AssociationList>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssociationList {
    #[serde(default)]
    pub results: Vec<AssociationRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssociationRef {
    pub id: String,
}

/// v4 association listing (`/crm/v4/objects/deals/{id}/associations/line_items`).
#[derive(Debug, Clone, Deserialize)]
pub struct AssociationPage {
    #[serde(default)]
    pub results: Vec<AssociatedObject>,
    #[serde(default)]
    pub paging: Option<Paging>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociatedObject {
    pub to_object_id: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReadRequest {
    pub properties: Vec<String>,
    pub inputs: Vec<BatchInput>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchInput {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchReadResponse {
    #[serde(default)]
    pub results: Vec<CrmObject>,
}

/// `/crm/v3/pipelines/deals/{pipelineId}`
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineResponse {
    pub id: String,
    #[serde(default)]
    pub stages: Vec<PipelineStage>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStage {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl CrmObject {
    fn text(&self, key: &str) -> Option<&str> {
        self.properties
            .get(key)
            .and_then(|v| v.as_deref())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    fn number(&self, key: &str) -> f64 {
        parse_lenient_number(self.text(key))
    }

    fn association_ids(&self, kind: &str) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        if let Some(list) = self.associations.get(kind) {
            for assoc in &list.results {
                if !ids.contains(&assoc.id) {
                    ids.push(assoc.id.clone());
                }
            }
        }
        ids
    }

    /// Convert a deal object; `zone_property` names the property holding
    /// the market zone.
    pub fn into_deal(self, zone_property: &str) -> Deal {
        let company_id = self.association_ids("companies").into_iter().next();
        Deal {
            name: self.text("dealname").unwrap_or_default().to_string(),
            amount: self.number("amount"),
            pipeline_id: self.text("pipeline").unwrap_or_default().to_string(),
            stage_id: self.text("dealstage").unwrap_or_default().to_string(),
            created_at: self.text("createdate").and_then(parse_timestamp),
            closed_at: self.text("closedate").and_then(parse_timestamp),
            contact_ids: self.association_ids("contacts"),
            company_id,
            zone: self.text(zone_property).map(str::to_string),
            id: self.id,
        }
    }

    /// Convert a line item object belonging to `deal_id`.
    pub fn into_line_item(self, deal_id: &str) -> LineItem {
        LineItem {
            deal_id: deal_id.to_string(),
            name: self.text("name").unwrap_or_default().to_string(),
            quantity: self.number("quantity"),
            length_mm: self.number("length_mm"),
            width_mm: self.number("width_mm"),
            height_mm: self.number("height_mm"),
            box_style: self.text("box_style").map(str::to_string),
            unit_price: self.number("price"),
            amount: self.number("amount"),
            tax_amount: self.number("hs_tax_amount"),
            id: self.id,
        }
    }

    /// Company display name, when set.
    pub fn company_name(&self) -> Option<String> {
        self.text("name").map(str::to_string)
    }
}

impl PipelineStage {
    pub fn into_stage(self) -> Stage {
        let is_closed = self.metadata.get("isClosed").is_some_and(|v| v.eq_ignore_ascii_case("true"));
        let probability = self.metadata.get("probability").and_then(|v| v.trim().parse::<f64>().ok());
        Stage {
            id: self.id,
            label: self.label,
            display_order: self.display_order,
            is_closed,
            probability,
        }
    }
}

/// HubSpot timestamps arrive as RFC 3339 strings or epoch milliseconds.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    raw.parse::<i64>().ok().and_then(|ms| Utc.timestamp_millis_opt(ms).single())
}
