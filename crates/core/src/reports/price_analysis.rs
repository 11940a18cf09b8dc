//! Per-deal price analysis against market bands

use dealscope_domain::{EnrichedDeal, PriceClassification, PriceStatus};
use serde::{Deserialize, Serialize};

use super::format;
use super::table::{ReportTable, TabularReport};
use crate::pricing::MarketClassifier;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceAnalysisRow {
    pub deal_id: String,
    pub deal_name: String,
    pub stage_label: String,
    pub zone: Option<String>,
    pub total_area_m2: f64,
    pub amount: f64,
    pub avg_price_per_area: Option<f64>,
    /// `None` when the deal has no area to price against
    pub classification: Option<PriceClassification>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusCounts {
    pub below_market: usize,
    pub in_range: usize,
    pub above_market: usize,
    pub no_data: usize,
}

impl StatusCounts {
    fn record(&mut self, status: Option<PriceStatus>) {
        match status {
            Some(PriceStatus::BelowMarket) => self.below_market += 1,
            Some(PriceStatus::InRange) => self.in_range += 1,
            Some(PriceStatus::AboveMarket) => self.above_market += 1,
            None => self.no_data += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceAnalysisReport {
    pub rows: Vec<PriceAnalysisRow>,
    pub counts: StatusCounts,
}

/// Classify every deal, keeping input order.
pub fn build_price_analysis(
    deals: &[EnrichedDeal],
    classifier: &MarketClassifier,
) -> PriceAnalysisReport {
    let mut counts = StatusCounts::default();

    let rows = deals
        .iter()
        .map(|deal| {
            let classification = classifier.classify_deal(deal);
            counts.record(classification.as_ref().map(|c| c.status));
            PriceAnalysisRow {
                deal_id: deal.id.clone(),
                deal_name: deal.name.clone(),
                stage_label: deal.stage.label.clone(),
                zone: deal.zone.clone(),
                total_area_m2: deal.total_area_m2,
                amount: deal.amount,
                avg_price_per_area: deal.avg_price_per_area,
                classification,
            }
        })
        .collect();

    PriceAnalysisReport { rows, counts }
}

impl TabularReport for PriceAnalysisReport {
    fn to_table(&self) -> ReportTable {
        let mut table = ReportTable::new(
            "Price analysis",
            ["Deal", "Stage", "Zone", "Area (m²)", "Amount", "Price/m²", "Status", "Diff", "Detail"],
        );

        for row in &self.rows {
            let classification = row.classification.as_ref();
            table.push_row(vec![
                row.deal_name.clone(),
                row.stage_label.clone(),
                row.zone.clone().unwrap_or_default(),
                format::area(row.total_area_m2),
                format::amount(row.amount),
                format::optional_amount(row.avg_price_per_area),
                classification.map(|c| c.status.label().to_string()).unwrap_or_else(|| "No data".into()),
                classification.map(|c| format::percent(c.percent_diff)).unwrap_or_default(),
                classification.map(PriceClassification::explanation).unwrap_or_default(),
            ]);
        }

        let c = &self.counts;
        table.note(format!(
            "Below market: {}, in range: {}, above market: {}, without price data: {}",
            c.below_market, c.in_range, c.above_market, c.no_data
        ));
        table
    }
}
