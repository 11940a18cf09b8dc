//! HubSpot CRM client implementing the `CrmSource` port

use std::time::Duration;

use async_trait::async_trait;
use dealscope_core::ports::{CrmSource, DealFilters};
use dealscope_domain::{Deal, DealScopeError, HubSpotConfig, LineItem, Result, Stage};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

use super::types::{
    AssociationPage, BatchInput, BatchReadRequest, BatchReadResponse, CrmObject, ObjectPage,
    Paging, PipelineResponse, DEAL_PROPERTIES, LINE_ITEM_PROPERTIES,
};
use crate::errors::conversions::status_error;
use crate::http::client::retry_after_secs;
use crate::http::HttpClient;

/// HubSpot caps batch reads at 100 inputs.
const BATCH_READ_LIMIT: usize = 100;
const ASSOCIATION_PAGE_SIZE: u32 = 500;
const USER_AGENT: &str = concat!("dealscope/", env!("CARGO_PKG_VERSION"));

/// Read-only HubSpot client
pub struct HubSpotClient {
    http_client: HttpClient,
    access_token: String,
    base_url: String,
    page_size: u32,
    zone_property: String,
}

impl HubSpotClient {
    /// Create a client from connection settings.
    ///
    /// # Errors
    /// Returns `DealScopeError::Config` when no access token is configured.
    pub fn new(config: &HubSpotConfig, zone_property: impl Into<String>) -> Result<Self> {
        if config.access_token.trim().is_empty() {
            return Err(DealScopeError::Config(
                "HubSpot access token is not configured (set DEALSCOPE_HUBSPOT_TOKEN)".into(),
            ));
        }

        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .max_attempts(config.max_attempts)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self::with_http_client(config, zone_property, http_client))
    }

    /// Create a client around an existing HTTP client.
    pub fn with_http_client(
        config: &HubSpotConfig,
        zone_property: impl Into<String>,
        http_client: HttpClient,
    ) -> Self {
        Self {
            http_client,
            access_token: config.access_token.clone(),
            base_url: config.base_url.clone(),
            page_size: config.page_size.clamp(1, 100),
            zone_property: zone_property.into(),
        }
    }

    /// Point the client at another API host (mock servers in tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.base_url.trim_end_matches('/');
        Url::parse(&format!("{base}{path}"))
            .map_err(|e| DealScopeError::Config(format!("Invalid HubSpot URL {base}{path}: {e}")))
    }

    fn authorized(&self, method: Method, url: Url) -> RequestBuilder {
        self.http_client
            .request(method, url)
            .bearer_auth(&self.access_token)
            .header("Accept", "application/json")
    }

    /// Send a request and decode a JSON success body, mapping error statuses.
    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.http_client.send(request).await?;
        let status = response.status();
        let url = response.url().clone();
        debug!(status = status.as_u16(), %url, "HubSpot response");

        if !status.is_success() {
            let retry_after = retry_after_secs(&response);
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status.as_u16(), retry_after, body));
        }

        let bytes = response.bytes().await.map_err(|e| DealScopeError::Network(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| DealScopeError::Crm {
            status: status.as_u16(),
            message: format!("unexpected response body from {}: {e}", url.path()),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        self.fetch(self.authorized(Method::GET, url)).await
    }

    async fn fetch_deal_pages(&self) -> Result<Vec<CrmObject>> {
        let mut properties: Vec<&str> = DEAL_PROPERTIES.to_vec();
        properties.push(&self.zone_property);
        let properties = properties.join(",");

        let mut objects = Vec::new();
        let mut after: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let mut url = self.endpoint("/crm/v3/objects/deals")?;
            {
                let mut query = url.query_pairs_mut();
                query.append_pair("limit", &self.page_size.to_string());
                query.append_pair("properties", &properties);
                query.append_pair("associations", "contacts,companies");
                query.append_pair("archived", "false");
                if let Some(cursor) = &after {
                    query.append_pair("after", cursor);
                }
            }

            let page: ObjectPage = self.get_json(url).await?;
            pages += 1;
            objects.extend(page.results);

            match Paging::next_after(page.paging.as_ref()) {
                Some(next) if after.as_deref() != Some(next.as_str()) => after = Some(next),
                _ => break,
            }
        }

        debug!(pages, objects = objects.len(), "fetched deal pages");
        Ok(objects)
    }

    async fn fetch_line_item_ids(&self, deal_id: &str) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        let mut after: Option<String> = None;

        loop {
            let path = format!(
                "/crm/v4/objects/deals/{}/associations/line_items",
                urlencoding::encode(deal_id)
            );
            let mut url = self.endpoint(&path)?;
            {
                let mut query = url.query_pairs_mut();
                query.append_pair("limit", &ASSOCIATION_PAGE_SIZE.to_string());
                if let Some(cursor) = &after {
                    query.append_pair("after", cursor);
                }
            }

            let page: AssociationPage = self.get_json(url).await?;
            ids.extend(page.results.iter().map(|a| a.to_object_id.to_string()));

            match Paging::next_after(page.paging.as_ref()) {
                Some(next) if after.as_deref() != Some(next.as_str()) => after = Some(next),
                _ => break,
            }
        }

        Ok(ids)
    }
}

#[async_trait]
impl CrmSource for HubSpotClient {
    async fn get_deals(&self, pipeline_id: &str, filters: &DealFilters) -> Result<Vec<Deal>> {
        let objects = self.fetch_deal_pages().await?;
        let fetched = objects.len();

        let deals: Vec<Deal> = objects
            .into_iter()
            .map(|object| object.into_deal(&self.zone_property))
            .filter(|deal| deal.pipeline_id == pipeline_id && filters.matches(deal))
            .collect();

        info!(pipeline_id, fetched, matched = deals.len(), "Fetched HubSpot deals");
        Ok(deals)
    }

    async fn get_line_items(&self, deal_id: &str) -> Result<Vec<LineItem>> {
        let ids = self.fetch_line_item_ids(deal_id).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.endpoint("/crm/v3/objects/line_items/batch/read")?;
        let mut items = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(BATCH_READ_LIMIT) {
            let body = BatchReadRequest {
                properties: LINE_ITEM_PROPERTIES.iter().map(|p| p.to_string()).collect(),
                inputs: chunk.iter().map(|id| BatchInput { id: id.clone() }).collect(),
            };
            let request = self.authorized(Method::POST, url.clone()).json(&body);
            let response: BatchReadResponse = self.fetch(request).await?;
            items.extend(response.results.into_iter().map(|object| object.into_line_item(deal_id)));
        }

        debug!(deal_id, line_items = items.len(), "Fetched line items");
        Ok(items)
    }

    async fn get_stages(&self, pipeline_id: &str) -> Result<Vec<Stage>> {
        let url = self.endpoint(&format!(
            "/crm/v3/pipelines/deals/{}",
            urlencoding::encode(pipeline_id)
        ))?;
        let pipeline: PipelineResponse = self.get_json(url).await?;
        debug!(pipeline_id = %pipeline.id, stages = pipeline.stages.len(), "Fetched pipeline stages");
        Ok(pipeline.stages.into_iter().map(|stage| stage.into_stage()).collect())
    }

    async fn get_company_name(&self, company_id: &str) -> Result<Option<String>> {
        let mut url = self.endpoint(&format!(
            "/crm/v3/objects/companies/{}",
            urlencoding::encode(company_id)
        ))?;
        url.query_pairs_mut().append_pair("properties", "name");

        match self.get_json::<CrmObject>(url).await {
            Ok(company) => Ok(company.company_name()),
            // Deleted companies still show up in deal associations
            Err(DealScopeError::NotFound(_)) => {
                debug!(company_id, "Associated company not found");
                Ok(None)
            }
            Err(other) => Err(other),
        }
    }
}
