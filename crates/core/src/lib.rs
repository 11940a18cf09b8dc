//! # DealScope Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Box geometry and market price classification
//! - Deal enrichment
//! - Stage, time and funnel aggregation
//! - Report assemblers and CSV/HTML exporters
//! - Port interfaces (traits) and the report service
//!
//! ## Architecture Principles
//! - Only depends on `dealscope-domain`
//! - No HTTP or platform code
//! - CRM access via the [`CrmSource`] trait
//! - Clock access via injected `now` parameters

pub mod analytics;
pub mod enrichment;
pub mod export;
pub mod ports;
pub mod pricing;
pub mod reports;
pub mod service;

pub use analytics::{aggregate, bucket_by_time, build_funnel, fill_gaps};
pub use enrichment::{enrich, enrich_all};
pub use export::{to_csv, to_html, ExportFormat};
pub use ports::{CrmSource, DealFilters};
pub use pricing::{compute_unit_area, MarketClassifier};
pub use reports::{ReportTable, TabularReport};
pub use service::{LoadedDeals, ReportService};
