//! In-memory CRM source and fixtures shared by the command tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use dealscope_core::ports::{CrmSource, DealFilters};
use dealscope_domain::{Config, Deal, DealScopeError, LineItem, Result, Stage};
use dealscope_lib::context::AppContext;

/// CRM source serving a fixed data set.
#[derive(Default)]
pub struct StaticCrm {
    pub stages: Vec<Stage>,
    pub deals: Vec<Deal>,
    pub line_items: HashMap<String, Vec<LineItem>>,
    pub companies: HashMap<String, String>,
    /// Make every deal listing fail with this error
    pub deals_error: Option<DealScopeError>,
}

#[async_trait]
impl CrmSource for StaticCrm {
    async fn get_deals(&self, pipeline_id: &str, filters: &DealFilters) -> Result<Vec<Deal>> {
        if let Some(err) = &self.deals_error {
            return Err(err.clone());
        }
        Ok(self
            .deals
            .iter()
            .filter(|d| d.pipeline_id == pipeline_id && filters.matches(d))
            .cloned()
            .collect())
    }

    async fn get_line_items(&self, deal_id: &str) -> Result<Vec<LineItem>> {
        Ok(self.line_items.get(deal_id).cloned().unwrap_or_default())
    }

    async fn get_stages(&self, _pipeline_id: &str) -> Result<Vec<Stage>> {
        Ok(self.stages.clone())
    }

    async fn get_company_name(&self, company_id: &str) -> Result<Option<String>> {
        Ok(self.companies.get(company_id).cloned())
    }
}

pub fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

/// 2024-10-24 15:00 in Buenos Aires
pub fn now() -> DateTime<Utc> {
    at(2024, 10, 24, 18)
}

fn stage(id: &str, label: &str, display_order: i32, is_closed: bool) -> Stage {
    Stage {
        id: id.into(),
        label: label.into(),
        display_order,
        is_closed,
        probability: None,
    }
}

fn deal(id: &str, name: &str, amount: f64, stage_id: &str, created: DateTime<Utc>) -> Deal {
    Deal {
        id: id.into(),
        name: name.into(),
        amount,
        pipeline_id: "default".into(),
        stage_id: stage_id.into(),
        created_at: Some(created),
        closed_at: None,
        contact_ids: Vec::new(),
        company_id: None,
        zone: None,
    }
}

/// Ten 400×300×150 simple-flap boxes: 6.48 m² in total.
fn boxes(id: &str, deal_id: &str, amount: f64) -> LineItem {
    LineItem {
        id: id.into(),
        deal_id: deal_id.into(),
        name: "Caja regular".into(),
        quantity: 10.0,
        length_mm: 400.0,
        width_mm: 300.0,
        height_mm: 150.0,
        box_style: None,
        unit_price: amount / 10.0,
        amount,
        tax_amount: 0.0,
    }
}

/// Three deals: one above market (amba), one below (caba), one without area.
pub fn sample_crm() -> StaticCrm {
    let mut won = deal("d-1", "Cajas exportación", 5184.0, "closedwon", at(2024, 10, 10, 15));
    won.closed_at = Some(at(2024, 10, 20, 15));
    won.zone = Some("amba".into());
    won.company_id = Some("c-1".into());

    let mut quoted = deal("d-2", "Bandejas \"premium\"", 3240.0, "appointmentscheduled", at(2024, 10, 24, 13));
    quoted.zone = Some("caba".into());

    let bare = deal("d-3", "Sin cotizar", 1000.0, "appointmentscheduled", at(2024, 9, 1, 12));

    StaticCrm {
        stages: vec![
            stage("appointmentscheduled", "Appointment scheduled", 0, false),
            stage("closedwon", "Closed won", 1, true),
        ],
        deals: vec![won, quoted, bare],
        line_items: HashMap::from([
            ("d-1".to_string(), vec![boxes("li-1", "d-1", 5184.0)]),
            ("d-2".to_string(), vec![boxes("li-2", "d-2", 3240.0)]),
        ]),
        companies: HashMap::from([("c-1".to_string(), "Frigorífico Sur".to_string())]),
        deals_error: None,
    }
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.hubspot.access_token = "pat-test".into();
    config.report.timezone = "America/Argentina/Buenos_Aires".into();
    config
}

pub fn context_with(crm: StaticCrm) -> AppContext {
    AppContext::with_crm(test_config(), Arc::new(crm)).expect("context")
}
