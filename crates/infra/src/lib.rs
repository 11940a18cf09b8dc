//! # DealScope Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - HTTP client with retry and backoff
//! - HubSpot CRM integration (`CrmSource` implementation)
//! - Configuration loading from environment and files
//! - Conversions from third-party errors into domain errors
//!
//! ## Architecture
//! - Implements traits defined in `dealscope-core`
//! - Depends on `dealscope-domain` and `dealscope-core`
//! - Contains all "impure" code (network and file I/O)

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use integrations::hubspot::HubSpotClient;
