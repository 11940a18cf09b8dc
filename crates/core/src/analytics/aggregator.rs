//! Pipeline/stage aggregation

use dealscope_domain::constants::{UNMAPPED_STAGE_ID, UNMAPPED_STAGE_LABEL};
use dealscope_domain::{EnrichedDeal, PipelineSummary, PipelineTotals, StageIndex, StageMetric};

use super::Accumulator;

/// Group deals by stage and compute global totals.
///
/// Every stage of `stage_index` gets a row, in index order, even when empty.
/// Deals whose stage is not in the index land in a synthetic unmapped row
/// appended last, which only exists when it holds at least one deal.
pub fn aggregate(deals: &[EnrichedDeal], stage_index: &StageIndex) -> PipelineSummary {
    let mut per_stage = vec![Accumulator::default(); stage_index.len()];
    let mut unmapped = Accumulator::default();
    let mut totals = Accumulator::default();
    let mut subtotal = 0.0;
    let mut tax_total = 0.0;

    for deal in deals {
        match stage_index.position(&deal.stage.id) {
            Some(idx) => per_stage[idx].add(deal),
            None => unmapped.add(deal),
        }
        totals.add(deal);
        subtotal += deal.subtotal;
        tax_total += deal.tax_total;
    }

    let mut by_stage: Vec<StageMetric> = stage_index
        .iter()
        .zip(&per_stage)
        .enumerate()
        .map(|(position, (stage, acc))| StageMetric {
            stage_id: stage.id.clone(),
            label: stage.label.clone(),
            position,
            unmapped: false,
            is_closed: stage.is_closed,
            deal_count: acc.deal_count,
            total_amount: acc.total_amount,
            total_area_m2: acc.total_area_m2,
            avg_price_per_area: acc.avg_price_per_area(),
        })
        .collect();

    if unmapped.deal_count > 0 {
        by_stage.push(StageMetric {
            stage_id: UNMAPPED_STAGE_ID.to_string(),
            label: UNMAPPED_STAGE_LABEL.to_string(),
            position: stage_index.len(),
            unmapped: true,
            is_closed: false,
            deal_count: unmapped.deal_count,
            total_amount: unmapped.total_amount,
            total_area_m2: unmapped.total_area_m2,
            avg_price_per_area: unmapped.avg_price_per_area(),
        });
    }

    PipelineSummary {
        by_stage,
        totals: PipelineTotals {
            deal_count: totals.deal_count,
            deals_with_area: totals.deals_with_area,
            total_amount: totals.total_amount,
            total_area_m2: totals.total_area_m2,
            avg_price_per_area: totals.avg_price_per_area(),
            subtotal,
            tax_total,
        },
    }
}
