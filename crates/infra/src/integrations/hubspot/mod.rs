//! HubSpot CRM integration
//!
//! Read-only adapter for the `CrmSource` port over the HubSpot v3/v4 REST
//! API. HubSpot property names stay inside this module.
//!
//! # Endpoints
//!
//! - `GET /crm/v3/objects/deals` (paged with `after`, contacts and companies
//!   associations)
//! - `GET /crm/v4/objects/deals/{id}/associations/line_items`
//! - `POST /crm/v3/objects/line_items/batch/read`
//! - `GET /crm/v3/pipelines/deals/{pipelineId}`
//! - `GET /crm/v3/objects/companies/{id}?properties=name`
//!
//! # Error Handling
//!
//! - **Network errors, 5xx**: retried by `HttpClient`, then `Network`/`Crm`
//! - **401/403**: `Auth`
//! - **404**: `NotFound` (a missing company resolves to no name instead)
//! - **429**: retried while `Retry-After` is short, then `RateLimited`
//!
//! Deal filtering (pipeline, creation window, stages) happens client-side
//! after paging through the objects endpoint.

pub mod client;
pub mod types;

pub use client::HubSpotClient;
