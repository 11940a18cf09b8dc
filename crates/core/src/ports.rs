//! Port interfaces for CRM data sources

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dealscope_domain::{Deal, LineItem, Result, Stage};
use serde::{Deserialize, Serialize};

/// Optional narrowing of the deal fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DealFilters {
    /// Inclusive lower bound on the creation instant
    pub created_from: Option<DateTime<Utc>>,
    /// Exclusive upper bound on the creation instant
    pub created_to: Option<DateTime<Utc>>,
    /// Only deals currently in one of these stages
    pub stage_ids: Option<Vec<String>>,
}

impl DealFilters {
    /// Whether a deal passes every configured filter.
    ///
    /// Deals without a creation date never pass a date bound.
    pub fn matches(&self, deal: &Deal) -> bool {
        if let Some(from) = self.created_from {
            if !deal.created_at.is_some_and(|created| created >= from) {
                return false;
            }
        }
        if let Some(to) = self.created_to {
            if !deal.created_at.is_some_and(|created| created < to) {
                return false;
            }
        }
        if let Some(stage_ids) = &self.stage_ids {
            if !stage_ids.iter().any(|id| id == &deal.stage_id) {
                return false;
            }
        }
        true
    }
}

/// Read-only access to CRM records.
///
/// Implementations own transport concerns (auth, paging, retries); callers
/// only see domain types and `DealScopeError`.
#[async_trait]
pub trait CrmSource: Send + Sync {
    /// Deals of a pipeline that pass `filters`
    async fn get_deals(&self, pipeline_id: &str, filters: &DealFilters) -> Result<Vec<Deal>>;

    /// Line items associated with a deal
    async fn get_line_items(&self, deal_id: &str) -> Result<Vec<LineItem>>;

    /// Stage metadata of a pipeline
    async fn get_stages(&self, pipeline_id: &str) -> Result<Vec<Stage>>;

    /// Display name of a company, `None` when the CRM has no name for it
    async fn get_company_name(&self, company_id: &str) -> Result<Option<String>>;
}
