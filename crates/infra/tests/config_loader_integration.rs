//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files and
//! the environment.

use std::io::Write;
use std::sync::Mutex;

use dealscope_domain::{DateBasis, DealScopeError, MarketBand, TimeGranularity};
use dealscope_infra::config;
use once_cell::sync::Lazy;
use tempfile::NamedTempFile;

static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

const VARS: &[&str] = &[
    "DEALSCOPE_HUBSPOT_TOKEN",
    "DEALSCOPE_PIPELINE_ID",
    "DEALSCOPE_HUBSPOT_BASE_URL",
    "DEALSCOPE_HUBSPOT_PAGE_SIZE",
    "DEALSCOPE_TIMEZONE",
    "DEALSCOPE_ZONE_PROPERTY",
];

fn clear_env() {
    for key in VARS {
        std::env::remove_var(key);
    }
}

fn temp_config(contents: &str, extension: &str) -> std::path::PathBuf {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(contents.as_bytes()).expect("Failed to write to temp file");
    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    path
}

#[test]
fn test_load_full_toml_file() {
    let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
    clear_env();

    let path = temp_config(
        r#"
[hubspot]
access_token = "pat-file"
pipeline_id = "88412"
page_size = 100
timeout_secs = 10
max_attempts = 5

[report]
timezone = "America/Argentina/Cordoba"
zone_property = "region"
granularity = "month"
basis = "closed"

[market.default_band]
min = 500.0
max = 700.0
avg = 600.0

[market.bands.amba]
min = 560.0
max = 760.0
avg = 660.0
"#,
        "toml",
    );

    let result = config::load_from_file(Some(path.clone()));
    std::fs::remove_file(path).ok();

    let config = result.expect("Failed to load config from TOML file");
    assert_eq!(config.hubspot.access_token, "pat-file");
    assert_eq!(config.hubspot.pipeline_id, "88412");
    assert_eq!(config.hubspot.max_attempts, 5);
    assert_eq!(config.report.zone_property, "region");
    assert_eq!(config.report.granularity, TimeGranularity::Month);
    assert_eq!(config.report.basis, DateBasis::Closed);
    assert_eq!(config.market.default_band, MarketBand::new(500.0, 700.0, 600.0));
    assert_eq!(config.market.bands.len(), 1);
}

#[test]
fn test_env_overrides_file_values() {
    let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
    clear_env();

    let path = temp_config(
        r#"{ "hubspot": { "access_token": "from-file", "pipeline_id": "file-pipeline" } }"#,
        "json",
    );

    std::env::set_var("DEALSCOPE_HUBSPOT_TOKEN", "from-env");
    std::env::set_var("DEALSCOPE_ZONE_PROPERTY", "zona_envio");
    let result = config::load_from_file(Some(path.clone()));
    clear_env();
    std::fs::remove_file(path).ok();

    let config = result.expect("config");
    assert_eq!(config.hubspot.access_token, "from-env");
    assert_eq!(config.hubspot.pipeline_id, "file-pipeline");
    assert_eq!(config.report.zone_property, "zona_envio");
}

#[test]
fn test_invalid_band_in_file_is_rejected() {
    let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
    clear_env();

    let path = temp_config(
        r#"
[market.bands.sur]
min = 800.0
max = 600.0
avg = 700.0
"#,
        "toml",
    );

    let result = config::load_from_file(Some(path.clone()));
    std::fs::remove_file(path).ok();

    match result {
        Err(DealScopeError::Config(msg)) => assert!(msg.contains("market.bands.sur")),
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn test_load_without_config_file_uses_environment() {
    let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
    clear_env();

    std::env::set_var("DEALSCOPE_HUBSPOT_TOKEN", "pat-env");
    std::env::set_var("DEALSCOPE_HUBSPOT_BASE_URL", "http://127.0.0.1:9");
    let result = config::load();
    clear_env();

    let config = result.expect("config from env");
    assert_eq!(config.hubspot.access_token, "pat-env");
    assert_eq!(config.hubspot.base_url, "http://127.0.0.1:9");
}

#[test]
fn test_invalid_base_url_is_rejected() {
    let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
    clear_env();

    std::env::set_var("DEALSCOPE_HUBSPOT_TOKEN", "pat-env");
    std::env::set_var("DEALSCOPE_HUBSPOT_BASE_URL", "not a url");
    let result = config::load_from_env();
    clear_env();

    assert!(matches!(result, Err(DealScopeError::Config(_))));
}
