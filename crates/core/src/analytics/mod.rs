//! Rollups over enriched deals: stage aggregation, time buckets, funnel

pub mod aggregator;
pub mod funnel;
pub mod timeline;

pub use aggregator::aggregate;
pub use funnel::build_funnel;
pub use timeline::{bucket_by_time, fill_gaps};

use dealscope_domain::EnrichedDeal;

/// Running sums for one group of deals.
///
/// The pooled average is the group's total amount over its total area; deals
/// without area add to the amount but not to the area.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Accumulator {
    pub deal_count: usize,
    pub deals_with_area: usize,
    pub total_amount: f64,
    pub total_area_m2: f64,
}

impl Accumulator {
    pub fn add(&mut self, deal: &EnrichedDeal) {
        self.deal_count += 1;
        self.total_amount += deal.amount;
        if deal.has_area() {
            self.deals_with_area += 1;
            self.total_area_m2 += deal.total_area_m2;
        }
    }

    pub fn avg_price_per_area(&self) -> Option<f64> {
        (self.total_area_m2 > 0.0).then(|| self.total_amount / self.total_area_m2)
    }
}
