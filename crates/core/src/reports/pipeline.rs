//! Stage summary and time-series reports

use chrono::NaiveDate;
use chrono_tz::Tz;
use dealscope_domain::{
    DateBasis, EnrichedDeal, FunnelStep, PipelineSummary, StageIndex, TimeBucket, TimeGranularity,
    TimeSeries,
};
use serde::{Deserialize, Serialize};

use super::format;
use super::table::{ReportTable, TabularReport};
use crate::analytics::{aggregate, bucket_by_time, build_funnel, fill_gaps};

/// Stage rollup plus the funnel derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    pub summary: PipelineSummary,
    pub funnel: Vec<FunnelStep>,
}

impl PipelineReport {
    pub fn build(deals: &[EnrichedDeal], stage_index: &StageIndex) -> Self {
        let summary = aggregate(deals, stage_index);
        let funnel = build_funnel(&summary);
        Self { summary, funnel }
    }
}

impl TabularReport for PipelineReport {
    fn to_table(&self) -> ReportTable {
        let mut table = ReportTable::new(
            "Pipeline by stage",
            ["Stage", "Deals", "Reached", "Conversion", "Amount", "Area (m²)", "Avg price/m²"],
        );

        for metric in &self.summary.by_stage {
            let step = self.funnel.iter().find(|s| !metric.unmapped && s.stage_id == metric.stage_id);
            table.push_row(vec![
                metric.label.clone(),
                metric.deal_count.to_string(),
                step.map(|s| s.reached.to_string()).unwrap_or_default(),
                format::optional_percent(step.and_then(|s| s.conversion_pct)),
                format::amount(metric.total_amount),
                format::area(metric.total_area_m2),
                format::optional_amount(metric.avg_price_per_area),
            ]);
        }

        let totals = &self.summary.totals;
        table.note(format!(
            "{} deals, {} with area; subtotal {}, tax {}",
            totals.deal_count,
            totals.deals_with_area,
            format::amount(totals.subtotal),
            format::amount(totals.tax_total)
        ));
        table.with_footer(vec![
            "Total".to_string(),
            totals.deal_count.to_string(),
            String::new(),
            String::new(),
            format::amount(totals.total_amount),
            format::area(totals.total_area_m2),
            format::optional_amount(totals.avg_price_per_area),
        ])
    }
}

/// Time-bucketed activity, optionally zero-filled over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineReport {
    pub timezone: String,
    pub series: TimeSeries,
    /// Zero-filled buckets for `from..=to`, when a range was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filled: Option<Vec<TimeBucket>>,
}

impl TimelineReport {
    pub fn build(
        deals: &[EnrichedDeal],
        granularity: TimeGranularity,
        basis: DateBasis,
        tz: Tz,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Self {
        let series = bucket_by_time(deals, granularity, basis, tz);
        let filled = range.map(|(from, to)| fill_gaps(&series.buckets, from, to, granularity));
        Self { timezone: tz.name().to_string(), series, filled }
    }

    /// Buckets to display: the zero-filled series when present.
    pub fn buckets(&self) -> &[TimeBucket] {
        self.filled.as_deref().unwrap_or(&self.series.buckets)
    }
}

impl TabularReport for TimelineReport {
    fn to_table(&self) -> ReportTable {
        let mut table = ReportTable::new(
            format!("Deals by {} ({} date)", self.series.granularity, self.series.basis),
            ["Period", "Deals", "Amount", "Area (m²)", "Avg price/m²"],
        );

        let mut deal_count = 0;
        let mut total_amount = 0.0;
        let mut total_area = 0.0;
        for bucket in self.buckets() {
            deal_count += bucket.deal_count;
            total_amount += bucket.total_amount;
            total_area += bucket.total_area_m2;
            table.push_row(vec![
                bucket.label.clone(),
                bucket.deal_count.to_string(),
                format::amount(bucket.total_amount),
                format::area(bucket.total_area_m2),
                format::optional_amount(bucket.avg_price_per_area),
            ]);
        }

        table.note(format!("Timezone: {}", self.timezone));
        if self.series.undated > 0 {
            table.note(format!("{} deals without a {} date", self.series.undated, self.series.basis));
        }
        table.with_footer(vec![
            "Total".to_string(),
            deal_count.to_string(),
            format::amount(total_amount),
            format::area(total_area),
            String::new(),
        ])
    }
}
