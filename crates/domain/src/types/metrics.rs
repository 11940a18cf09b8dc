//! Aggregation outputs: stage metrics, time buckets and funnel steps

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::impl_domain_status_conversions;

/// Per-stage rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageMetric {
    pub stage_id: String,
    pub label: String,
    /// Funnel position; the unmapped bucket sorts after every real stage
    pub position: usize,
    /// `true` for the synthetic bucket holding deals with unknown stage ids
    pub unmapped: bool,
    pub is_closed: bool,
    pub deal_count: usize,
    pub total_amount: f64,
    pub total_area_m2: f64,
    /// Pooled average: Σ amount / Σ area over deals that have area
    pub avg_price_per_area: Option<f64>,
}

/// Rollup over the full deal set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PipelineTotals {
    pub deal_count: usize,
    pub deals_with_area: usize,
    pub total_amount: f64,
    pub total_area_m2: f64,
    pub avg_price_per_area: Option<f64>,
    pub subtotal: f64,
    pub tax_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PipelineSummary {
    pub by_stage: Vec<StageMetric>,
    pub totals: PipelineTotals,
}

/// Calendar unit used for time bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeGranularity {
    #[default]
    Day,
    Month,
}

impl_domain_status_conversions!(TimeGranularity {
    Day => "day",
    Month => "month",
});

/// Which deal timestamp places a deal into a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DateBasis {
    #[default]
    Created,
    Closed,
}

impl_domain_status_conversions!(DateBasis {
    Created => "created",
    Closed => "closed",
});

/// One day or month of activity, keyed by its first local calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBucket {
    pub start: NaiveDate,
    /// `2024-10-24` for days, `2024-10` for months
    pub label: String,
    pub deal_count: usize,
    pub total_amount: f64,
    pub total_area_m2: f64,
    pub avg_price_per_area: Option<f64>,
}

/// Bucketed series plus the number of deals that had no basis date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TimeSeries {
    pub granularity: TimeGranularity,
    pub basis: DateBasis,
    pub buckets: Vec<TimeBucket>,
    pub undated: usize,
}

/// One step of the stage funnel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelStep {
    pub stage_id: String,
    pub label: String,
    pub count: usize,
    /// Deals at this stage or any later one
    pub reached: usize,
    /// reached(this) / reached(previous) × 100
    pub conversion_pct: Option<f64>,
}
