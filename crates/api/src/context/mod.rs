//! Application context - dependency injection container

use std::sync::Arc;

use chrono::NaiveDate;
use chrono_tz::Tz;
use dealscope_core::ports::{CrmSource, DealFilters};
use dealscope_core::{MarketClassifier, ReportService};
use dealscope_domain::{Config, Result};
use dealscope_infra::config::parse_timezone;
use dealscope_infra::HubSpotClient;
use tracing::info;

/// Application context - holds the configuration and report service
pub struct AppContext {
    pub config: Config,
    pub reports: Arc<ReportService>,
}

impl AppContext {
    /// Create a context backed by the HubSpot client.
    pub fn new(config: Config) -> Result<Self> {
        let crm = HubSpotClient::new(&config.hubspot, config.report.zone_property.clone())?;
        info!(
            base_url = %config.hubspot.base_url,
            pipeline_id = %config.hubspot.pipeline_id,
            "HubSpot client ready"
        );
        Self::with_crm(config, Arc::new(crm))
    }

    /// Create a context around any CRM source (tests use in-memory mocks).
    pub fn with_crm(config: Config, crm: Arc<dyn CrmSource>) -> Result<Self> {
        let tz = parse_timezone(&config.report.timezone)?;
        let classifier = MarketClassifier::new(&config.market);
        let reports = ReportService::new(crm, classifier, tz, config.hubspot.pipeline_id.clone())
            .with_fetch_concurrency(config.hubspot.fetch_concurrency);

        Ok(Self { config, reports: Arc::new(reports) })
    }

    pub fn timezone(&self) -> Tz {
        self.reports.timezone()
    }

    /// Creation-date filters for an optional local date range.
    pub fn filters_for(&self, range: Option<(NaiveDate, NaiveDate)>) -> Result<DealFilters> {
        match range {
            Some((from, to)) => self.reports.created_between(from, to),
            None => Ok(DealFilters::default()),
        }
    }
}
