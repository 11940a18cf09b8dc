//! Shared test helpers for `dealscope-core` integration tests.
//!
//! An in-memory `CrmSource` plus a small pipeline fixture, so service tests
//! can focus on behaviour instead of boilerplate.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use dealscope_core::ports::{CrmSource, DealFilters};
use dealscope_domain::{Deal, DealScopeError, LineItem, Result as DomainResult, Stage};

/// In-memory CRM with per-endpoint call counters.
#[derive(Default, Clone)]
pub struct MockCrmSource {
    stages: Vec<Stage>,
    deals: Vec<Deal>,
    line_items: HashMap<String, Vec<LineItem>>,
    companies: HashMap<String, String>,
    fail_line_items_for: Option<String>,
    pub company_calls: Arc<AtomicUsize>,
    line_items_in_flight: Arc<AtomicUsize>,
    peak_line_items_in_flight: Arc<AtomicUsize>,
}

impl MockCrmSource {
    pub fn new(stages: Vec<Stage>, deals: Vec<Deal>) -> Self {
        Self { stages, deals, ..Default::default() }
    }

    pub fn with_line_items(mut self, deal_id: &str, items: Vec<LineItem>) -> Self {
        self.line_items.insert(deal_id.to_string(), items);
        self
    }

    pub fn with_company(mut self, company_id: &str, name: &str) -> Self {
        self.companies.insert(company_id.to_string(), name.to_string());
        self
    }

    /// Make `get_line_items` fail for one deal.
    pub fn failing_line_items(mut self, deal_id: &str) -> Self {
        self.fail_line_items_for = Some(deal_id.to_string());
        self
    }

    pub fn company_calls(&self) -> usize {
        self.company_calls.load(Ordering::SeqCst)
    }

    /// Most `get_line_items` calls that were pending at the same time.
    pub fn peak_line_item_fetches(&self) -> usize {
        self.peak_line_items_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CrmSource for MockCrmSource {
    async fn get_deals(&self, pipeline_id: &str, filters: &DealFilters) -> DomainResult<Vec<Deal>> {
        Ok(self
            .deals
            .iter()
            .filter(|deal| deal.pipeline_id == pipeline_id && filters.matches(deal))
            .cloned()
            .collect())
    }

    async fn get_line_items(&self, deal_id: &str) -> DomainResult<Vec<LineItem>> {
        if self.fail_line_items_for.as_deref() == Some(deal_id) {
            return Err(DealScopeError::Crm { status: 502, message: "bad gateway".into() });
        }
        let pending = self.line_items_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_line_items_in_flight.fetch_max(pending, Ordering::SeqCst);
        // Stay pending for one poll so concurrent calls overlap
        tokio::task::yield_now().await;
        self.line_items_in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(self.line_items.get(deal_id).cloned().unwrap_or_default())
    }

    async fn get_stages(&self, _pipeline_id: &str) -> DomainResult<Vec<Stage>> {
        Ok(self.stages.clone())
    }

    async fn get_company_name(&self, company_id: &str) -> DomainResult<Option<String>> {
        self.company_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.companies.get(company_id).cloned())
    }
}

pub fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

pub fn now() -> DateTime<Utc> {
    at(2024, 10, 24, 18)
}

pub fn stages() -> Vec<Stage> {
    vec![
        Stage::new("appointmentscheduled", "Appointment scheduled", 0),
        Stage::new("qualifiedtobuy", "Qualified to buy", 1),
        Stage::new("closedwon", "Closed won", 2).closed(1.0),
        Stage::new("closedlost", "Closed lost", 3).closed(0.0),
    ]
}

pub fn deal(id: &str, stage_id: &str, amount: f64, created_at: Option<DateTime<Utc>>) -> Deal {
    Deal {
        id: id.into(),
        name: format!("Deal {id}"),
        amount,
        pipeline_id: "default".into(),
        stage_id: stage_id.into(),
        created_at,
        closed_at: None,
        contact_ids: vec![],
        company_id: None,
        zone: Some("amba".into()),
    }
}

pub fn line_item(deal_id: &str, style: &str, qty: f64, l: f64, w: f64, h: f64) -> LineItem {
    LineItem {
        id: format!("{deal_id}-{style}"),
        deal_id: deal_id.into(),
        name: style.into(),
        quantity: qty,
        length_mm: l,
        width_mm: w,
        height_mm: h,
        box_style: Some(style.into()),
        unit_price: 0.0,
        amount: 0.0,
        tax_amount: 0.0,
    }
}

/// Five deals across the pipeline, one in a stage that no longer exists.
pub fn sample_crm() -> MockCrmSource {
    let mut won = deal("d-3", "closedwon", 5_184.0, Some(at(2024, 10, 1, 12)));
    won.closed_at = Some(at(2024, 10, 24, 15));
    won.company_id = Some("c-1".into());
    let mut first = deal("d-1", "appointmentscheduled", 10_000.0, Some(at(2024, 10, 24, 13)));
    first.company_id = Some("c-1".into());

    MockCrmSource::new(
        stages(),
        vec![
            first,
            deal("d-2", "qualifiedtobuy", 10_000.0, Some(at(2024, 10, 20, 12))),
            won,
            deal("d-4", "deleted-stage", 700.0, Some(at(2024, 9, 30, 12))),
            deal("d-5", "qualifiedtobuy", 3_000.0, None),
        ],
    )
    // 0.648 m² × 10
    .with_line_items("d-2", vec![line_item("d-2", "Caja común", 10.0, 400.0, 300.0, 150.0)])
    // 0.648 m² × 10, priced at 800/m²
    .with_line_items("d-3", vec![line_item("d-3", "regular", 10.0, 400.0, 300.0, 150.0)])
    .with_company("c-1", "Frigorífico Sur")
}
