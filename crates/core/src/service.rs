//! Report service - fetch from the CRM, then run the pure transforms

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use dealscope_domain::constants::DEFAULT_FETCH_CONCURRENCY;
use dealscope_domain::{
    DateBasis, DealScopeError, EnrichedDeal, Result, StageIndex, TimeGranularity,
};
use futures::{stream, StreamExt, TryStreamExt};
use tracing::{debug, info, instrument};

use crate::enrichment::{enrich_all, CompanyNames, LineItemsByDeal};
use crate::ports::{CrmSource, DealFilters};
use crate::pricing::MarketClassifier;
use crate::reports::{
    build_daily_report, build_items_report, build_price_analysis, DailyReport, ItemsReport,
    PipelineReport, PriceAnalysisReport, TimelineReport,
};

/// Enriched deals together with the stage index they were resolved against.
#[derive(Debug, Clone)]
pub struct LoadedDeals {
    pub stage_index: StageIndex,
    pub deals: Vec<EnrichedDeal>,
}

/// Request-scoped report orchestration over a [`CrmSource`].
///
/// Holds no state between calls; every report fetches fresh data.
pub struct ReportService {
    crm: Arc<dyn CrmSource>,
    classifier: MarketClassifier,
    tz: Tz,
    pipeline_id: String,
    fetch_concurrency: usize,
}

impl ReportService {
    pub fn new(
        crm: Arc<dyn CrmSource>,
        classifier: MarketClassifier,
        tz: Tz,
        pipeline_id: impl Into<String>,
    ) -> Self {
        Self {
            crm,
            classifier,
            tz,
            pipeline_id: pipeline_id.into(),
            fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
        }
    }

    /// Cap on line-item and company lookups in flight at once (at least 1).
    pub fn with_fetch_concurrency(mut self, limit: usize) -> Self {
        self.fetch_concurrency = limit.max(1);
        self
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn pipeline_id(&self) -> &str {
        &self.pipeline_id
    }

    /// Filters for deals created on local dates `from..=to` in the report
    /// timezone.
    pub fn created_between(&self, from: NaiveDate, to: NaiveDate) -> Result<DealFilters> {
        if from > to {
            return Err(DealScopeError::InvalidInput(format!(
                "date range starts after it ends ({from} > {to})"
            )));
        }
        let end = to
            .succ_opt()
            .ok_or_else(|| DealScopeError::InvalidInput(format!("date out of range: {to}")))?;
        Ok(DealFilters {
            created_from: Some(local_midnight(from, self.tz)?),
            created_to: Some(local_midnight(end, self.tz)?),
            stage_ids: None,
        })
    }

    /// Fetch stages, deals, line items and company names, then enrich.
    ///
    /// Any fetch failure is returned as-is; nothing is partially enriched.
    #[instrument(skip(self, filters), fields(pipeline_id = %self.pipeline_id))]
    pub async fn load_deals(&self, filters: &DealFilters, now: DateTime<Utc>) -> Result<LoadedDeals> {
        let stages = self.crm.get_stages(&self.pipeline_id).await?;
        let stage_index = StageIndex::new(stages);
        let deals = self.crm.get_deals(&self.pipeline_id, filters).await?;
        debug!(stages = stage_index.len(), deals = deals.len(), "fetched pipeline");

        // `buffered` keeps input order, so results zip back onto their keys
        let item_lists: Vec<_> = stream::iter(&deals)
            .map(|deal| self.crm.get_line_items(&deal.id))
            .buffered(self.fetch_concurrency)
            .try_collect()
            .await?;
        let line_items: LineItemsByDeal =
            deals.iter().map(|deal| deal.id.clone()).zip(item_lists).collect();

        let company_ids: BTreeSet<&str> =
            deals.iter().filter_map(|deal| deal.company_id.as_deref()).collect();
        let names: Vec<_> = stream::iter(&company_ids)
            .map(|id| self.crm.get_company_name(id))
            .buffered(self.fetch_concurrency)
            .try_collect()
            .await?;
        let company_names: CompanyNames = company_ids
            .iter()
            .zip(names)
            .filter_map(|(id, name)| name.map(|name| (id.to_string(), name)))
            .collect();

        let enriched = enrich_all(&deals, &line_items, &stage_index, &company_names, now);
        info!(
            deals = enriched.len(),
            line_items = line_items.values().map(Vec::len).sum::<usize>(),
            companies = company_names.len(),
            "loaded and enriched deals"
        );

        Ok(LoadedDeals { stage_index, deals: enriched })
    }

    pub async fn pipeline_summary(
        &self,
        filters: &DealFilters,
        now: DateTime<Utc>,
    ) -> Result<PipelineReport> {
        let loaded = self.load_deals(filters, now).await?;
        Ok(PipelineReport::build(&loaded.deals, &loaded.stage_index))
    }

    /// Time series of deals; zero-filled over `range` when one is given.
    pub async fn timeline(
        &self,
        filters: &DealFilters,
        granularity: TimeGranularity,
        basis: DateBasis,
        range: Option<(NaiveDate, NaiveDate)>,
        now: DateTime<Utc>,
    ) -> Result<TimelineReport> {
        let loaded = self.load_deals(filters, now).await?;
        Ok(TimelineReport::build(&loaded.deals, granularity, basis, self.tz, range))
    }

    /// Daily report for a local `date`; the stage summary covers every deal.
    pub async fn daily_report(&self, date: NaiveDate, now: DateTime<Utc>) -> Result<DailyReport> {
        let loaded = self.load_deals(&DealFilters::default(), now).await?;
        Ok(build_daily_report(&loaded.deals, &loaded.stage_index, date, self.tz))
    }

    pub async fn price_analysis(
        &self,
        filters: &DealFilters,
        now: DateTime<Utc>,
    ) -> Result<PriceAnalysisReport> {
        let loaded = self.load_deals(filters, now).await?;
        Ok(build_price_analysis(&loaded.deals, &self.classifier))
    }

    pub async fn items_report(&self, filters: &DealFilters, now: DateTime<Utc>) -> Result<ItemsReport> {
        let loaded = self.load_deals(filters, now).await?;
        Ok(build_items_report(&loaded.deals))
    }
}

/// First instant of a local date. Dates whose midnight is skipped by a DST
/// change start at the first valid local time after it.
fn local_midnight(date: NaiveDate, tz: Tz) -> Result<DateTime<Utc>> {
    let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(|| invalid_date(date))?;
    if let Some(start) = tz.from_local_datetime(&midnight).earliest() {
        return Ok(start.with_timezone(&Utc));
    }
    // Skipped midnight: probe forward in one-hour steps
    (1..=3)
        .filter_map(|hour| date.and_hms_opt(hour, 0, 0))
        .find_map(|local| tz.from_local_datetime(&local).earliest())
        .map(|start| start.with_timezone(&Utc))
        .ok_or_else(|| invalid_date(date))
}

fn invalid_date(date: NaiveDate) -> DealScopeError {
    DealScopeError::InvalidInput(format!("no local midnight for {date}"))
}
