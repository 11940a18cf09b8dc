//! # DealScope Domain
//!
//! Business domain types and models for DealScope.
//!
//! This crate contains:
//! - CRM projections (Deal, LineItem, Stage) and their enriched forms
//! - Market band and price classification types
//! - Aggregation metric types (stage metrics, time buckets, funnel steps)
//! - Domain error types and Result definitions
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other DealScope crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::numbers::{parse_lenient_number, sanitize_non_negative};
