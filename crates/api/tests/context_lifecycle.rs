//! Integration tests for AppContext construction

mod support;

use std::sync::Arc;

use dealscope_domain::{Config, DealScopeError};
use dealscope_lib::context::AppContext;
use support::{sample_crm, test_config};

#[test]
fn test_context_uses_configured_timezone_and_pipeline() {
    let ctx = AppContext::with_crm(test_config(), Arc::new(sample_crm())).unwrap();

    assert_eq!(ctx.timezone(), chrono_tz::America::Argentina::Buenos_Aires);
    assert_eq!(ctx.reports.pipeline_id(), "default");
}

#[test]
fn test_unknown_timezone_is_a_config_error() {
    let mut config = test_config();
    config.report.timezone = "Mars/Olympus_Mons".into();

    let result = AppContext::with_crm(config, Arc::new(sample_crm()));
    assert!(matches!(result, Err(DealScopeError::Config(_))));
}

#[test]
fn test_hubspot_context_requires_token() {
    let result = AppContext::new(Config::default());
    assert!(matches!(result, Err(DealScopeError::Config(_))));
}

#[test]
fn test_hubspot_context_builds_with_token() {
    assert!(AppContext::new(test_config()).is_ok());
}

#[test]
fn test_empty_range_means_no_filters() {
    let ctx = AppContext::with_crm(test_config(), Arc::new(sample_crm())).unwrap();
    let filters = ctx.filters_for(None).unwrap();

    assert!(filters.created_from.is_none());
    assert!(filters.created_to.is_none());
}
