//! Pure enrichment transform
//!
//! All inputs are already fetched; nothing here touches the network or the
//! system clock. `now` is always passed in.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use dealscope_domain::constants::{MS_PER_DAY, UNKNOWN_STAGE_LABEL};
use dealscope_domain::{
    sanitize_non_negative, Deal, EnrichedDeal, EnrichedLineItem, LineItem, StageIndex, StageRef,
};
use tracing::warn;

use crate::pricing::geometry::unit_area;

/// Line items keyed by deal id.
pub type LineItemsByDeal = HashMap<String, Vec<LineItem>>;

/// Company display names keyed by company id.
pub type CompanyNames = HashMap<String, String>;

/// Enrich a single deal.
///
/// Line items that name a different parent deal are ignored. Unknown stage
/// ids resolve to a neutral label and are logged, never rejected.
pub fn enrich(
    deal: &Deal,
    line_items: &[LineItem],
    stage_index: &StageIndex,
    company_name: Option<&str>,
    now: DateTime<Utc>,
) -> EnrichedDeal {
    let enriched = build(deal, line_items, stage_index, company_name, now);
    if !enriched.stage.resolved {
        warn!(deal_id = %deal.id, stage_id = %deal.stage_id, "deal references unknown stage");
    }
    enriched
}

/// Enrich a batch of deals, preserving input order.
///
/// Unknown stage ids are logged once per id with the number of affected
/// deals.
pub fn enrich_all(
    deals: &[Deal],
    line_items: &LineItemsByDeal,
    stage_index: &StageIndex,
    company_names: &CompanyNames,
    now: DateTime<Utc>,
) -> Vec<EnrichedDeal> {
    let mut unresolved: BTreeMap<&str, usize> = BTreeMap::new();

    let enriched = deals
        .iter()
        .map(|deal| {
            let items = line_items.get(&deal.id).map(Vec::as_slice).unwrap_or_default();
            let company = deal
                .company_id
                .as_ref()
                .and_then(|id| company_names.get(id))
                .map(String::as_str);
            let enriched = build(deal, items, stage_index, company, now);
            if !enriched.stage.resolved {
                *unresolved.entry(deal.stage_id.as_str()).or_default() += 1;
            }
            enriched
        })
        .collect();

    for (stage_id, deal_count) in unresolved {
        warn!(stage_id, deal_count, "deals reference a stage missing from the pipeline");
    }

    enriched
}

fn build(
    deal: &Deal,
    line_items: &[LineItem],
    stage_index: &StageIndex,
    company_name: Option<&str>,
    now: DateTime<Utc>,
) -> EnrichedDeal {
    let items: Vec<EnrichedLineItem> = line_items
        .iter()
        .filter(|item| item.deal_id.is_empty() || item.deal_id == deal.id)
        .map(enrich_line_item)
        .collect();

    let total_area_m2: f64 = items.iter().map(|i| i.total_area_m2).sum();
    let subtotal: f64 = items.iter().map(|i| i.item.effective_amount()).sum();
    let tax_total: f64 = items.iter().map(|i| i.item.tax_amount).sum();

    let amount = if deal.amount.is_finite() { deal.amount } else { 0.0 };
    let avg_price_per_area = (total_area_m2 > 0.0).then(|| amount / total_area_m2);

    EnrichedDeal {
        id: deal.id.clone(),
        name: deal.name.clone(),
        amount,
        pipeline_id: deal.pipeline_id.clone(),
        stage: resolve_stage(&deal.stage_id, stage_index),
        created_at: deal.created_at,
        closed_at: deal.closed_at,
        contact_ids: deal.contact_ids.clone(),
        company_id: deal.company_id.clone(),
        company_name: company_name.map(str::to_string),
        zone: deal.zone.clone(),
        line_items: items,
        total_area_m2,
        avg_price_per_area,
        subtotal,
        tax_total,
        days_since_creation: days_since(deal.created_at, now),
    }
}

fn enrich_line_item(item: &LineItem) -> EnrichedLineItem {
    let style = item.style();
    let unit_area_m2 = unit_area(style, item.length_mm, item.width_mm, item.height_mm);

    EnrichedLineItem {
        item: item.clone(),
        style,
        unit_area_m2,
        total_area_m2: unit_area_m2 * sanitize_non_negative(item.quantity),
    }
}

fn resolve_stage(stage_id: &str, stage_index: &StageIndex) -> StageRef {
    match stage_index.get(stage_id) {
        Some(stage) => {
            StageRef { id: stage.id.clone(), label: stage.label.clone(), resolved: true }
        }
        None => StageRef {
            id: stage_id.to_string(),
            label: UNKNOWN_STAGE_LABEL.to_string(),
            resolved: false,
        },
    }
}

/// Whole days elapsed, floored and clamped at zero.
fn days_since(created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> i64 {
    created_at
        .map(|created| (now - created).num_milliseconds().div_euclid(MS_PER_DAY).max(0))
        .unwrap_or(0)
}
