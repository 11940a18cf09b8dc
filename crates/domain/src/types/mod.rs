//! Domain types and models
//!
//! CRM projections are read-only: they are fetched per request, enriched and
//! aggregated, and never written back.

pub mod deal;
pub mod line_item;
pub mod metrics;
pub mod pricing;
pub mod stage;

pub use deal::{Deal, EnrichedDeal, EnrichedLineItem, StageRef};
pub use line_item::{BoxStyle, LineItem};
pub use metrics::{
    DateBasis, FunnelStep, PipelineSummary, PipelineTotals, StageMetric, TimeBucket,
    TimeGranularity, TimeSeries,
};
pub use pricing::{MarketBand, PriceClassification, PriceStatus};
pub use stage::{Stage, StageIndex};
