//! Deal enrichment: raw CRM deal + line items → denormalized view

pub mod enricher;

pub use enricher::{enrich, enrich_all, CompanyNames, LineItemsByDeal};
