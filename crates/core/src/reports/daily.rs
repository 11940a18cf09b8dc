//! Daily activity report

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use dealscope_domain::{EnrichedDeal, FunnelStep, PipelineSummary, StageIndex};
use serde::{Deserialize, Serialize};

use super::format;
use super::table::{ReportTable, TabularReport};
use crate::analytics::timeline::local_date;
use crate::analytics::{aggregate, build_funnel};

/// Count and sums for the deals that matched one event on the report date.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ActivitySlice {
    pub deal_count: usize,
    pub total_amount: f64,
    pub total_area_m2: f64,
}

impl ActivitySlice {
    fn add(&mut self, deal: &EnrichedDeal) {
        self.deal_count += 1;
        self.total_amount += deal.amount;
        self.total_area_m2 += deal.total_area_m2;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub timezone: String,
    pub created: ActivitySlice,
    pub closed: ActivitySlice,
    pub summary: PipelineSummary,
    pub funnel: Vec<FunnelStep>,
    /// Amount sitting in stages not flagged closed, unmapped included
    pub open_pipeline_amount: f64,
}

/// Build the report for a local calendar `date` in `tz`.
///
/// The stage summary and funnel cover the whole deal set; the created and
/// closed slices only the deals whose timestamp falls on `date`.
pub fn build_daily_report(
    deals: &[EnrichedDeal],
    stage_index: &StageIndex,
    date: NaiveDate,
    tz: Tz,
) -> DailyReport {
    let on_date = |instant: Option<DateTime<Utc>>| instant.is_some_and(|i| local_date(i, tz) == date);

    let mut created = ActivitySlice::default();
    let mut closed = ActivitySlice::default();
    for deal in deals {
        if on_date(deal.created_at) {
            created.add(deal);
        }
        if on_date(deal.closed_at) {
            closed.add(deal);
        }
    }

    let summary = aggregate(deals, stage_index);
    let funnel = build_funnel(&summary);
    let open_pipeline_amount =
        summary.by_stage.iter().filter(|m| !m.is_closed).map(|m| m.total_amount).sum();

    DailyReport {
        date,
        timezone: tz.name().to_string(),
        created,
        closed,
        summary,
        funnel,
        open_pipeline_amount,
    }
}

impl TabularReport for DailyReport {
    fn to_table(&self) -> ReportTable {
        let mut table = ReportTable::new(
            format!("Daily report {}", self.date.format("%Y-%m-%d")),
            ["Stage", "Deals", "Amount", "Area (m²)", "Avg price/m²"],
        );

        table.note(format!(
            "Created: {} deals, {} ({} m²)",
            self.created.deal_count,
            format::amount(self.created.total_amount),
            format::area(self.created.total_area_m2)
        ));
        table.note(format!(
            "Closed: {} deals, {} ({} m²)",
            self.closed.deal_count,
            format::amount(self.closed.total_amount),
            format::area(self.closed.total_area_m2)
        ));
        table.note(format!("Open pipeline: {}", format::amount(self.open_pipeline_amount)));
        table.note(format!("Timezone: {}", self.timezone));

        for metric in &self.summary.by_stage {
            table.push_row(vec![
                metric.label.clone(),
                metric.deal_count.to_string(),
                format::amount(metric.total_amount),
                format::area(metric.total_area_m2),
                format::optional_amount(metric.avg_price_per_area),
            ]);
        }

        let totals = &self.summary.totals;
        table.with_footer(vec![
            "Total".to_string(),
            totals.deal_count.to_string(),
            format::amount(totals.total_amount),
            format::area(totals.total_area_m2),
            format::optional_amount(totals.avg_price_per_area),
        ])
    }
}
