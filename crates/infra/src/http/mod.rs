//! HTTP transport shared by CRM integrations

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
