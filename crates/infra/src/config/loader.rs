//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Probes multiple paths for a config file (JSON or TOML)
//! 2. If one is found, loads it and applies environment overrides on top
//! 3. Otherwise builds the configuration from environment variables alone
//!
//! Environment variables always override file values, so a checked-in
//! config file can hold market bands while the token stays in `.env`.
//!
//! ## Environment Variables
//! - `DEALSCOPE_HUBSPOT_TOKEN`: HubSpot private app token (required for env loading)
//! - `DEALSCOPE_PIPELINE_ID`: Deal pipeline to report on
//! - `DEALSCOPE_HUBSPOT_BASE_URL`: API base URL override
//! - `DEALSCOPE_HUBSPOT_PAGE_SIZE`: Deals per page (1-100)
//! - `DEALSCOPE_TIMEZONE`: IANA timezone for day/month buckets
//! - `DEALSCOPE_ZONE_PROPERTY`: Deal property holding the market zone
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./dealscope.json` or `./dealscope.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use dealscope_domain::{Config, DealScopeError, Result};

const ENV_TOKEN: &str = "DEALSCOPE_HUBSPOT_TOKEN";
const ENV_PIPELINE_ID: &str = "DEALSCOPE_PIPELINE_ID";
const ENV_BASE_URL: &str = "DEALSCOPE_HUBSPOT_BASE_URL";
const ENV_PAGE_SIZE: &str = "DEALSCOPE_HUBSPOT_PAGE_SIZE";
const ENV_TIMEZONE: &str = "DEALSCOPE_TIMEZONE";
const ENV_ZONE_PROPERTY: &str = "DEALSCOPE_ZONE_PROPERTY";

/// Load configuration with automatic fallback strategy
///
/// A probed config file wins when one exists, with environment variables
/// applied over it. Without a file, the environment alone must provide the
/// access token.
///
/// # Errors
/// Returns `DealScopeError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - A value fails validation
pub fn load() -> Result<Config> {
    load_with(probe_config_paths())
}

fn load_with(found: Option<PathBuf>) -> Result<Config> {
    match found {
        Some(path) => load_from_file(Some(path)),
        None => {
            let config = load_from_env()?;
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
    }
}

/// Load configuration from environment variables
///
/// Only the access token is required; every other setting keeps its
/// default unless its variable is set.
///
/// # Errors
/// Returns `DealScopeError::Config` if the token is missing or a variable
/// has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let token = env_var(ENV_TOKEN)?;

    let mut config = Config::default();
    config.hubspot.access_token = token;
    apply_env_overrides(&mut config)?;
    validate(&config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
/// Environment variables override values read from the file.
///
/// # Errors
/// Returns `DealScopeError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - A value fails validation
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(DealScopeError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            DealScopeError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| DealScopeError::Config(format!("Failed to read config file: {}", e)))?;

    let mut config = parse_config(&contents, &config_path)?;
    if let Ok(token) = std::env::var(ENV_TOKEN) {
        config.hubspot.access_token = token;
    }
    apply_env_overrides(&mut config)?;
    validate(&config)?;
    Ok(config)
}

/// Parse an IANA timezone name.
///
/// # Errors
/// Returns `DealScopeError::Config` for names missing from the tz database.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| DealScopeError::Config(format!("Unknown timezone: {}", name)))
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| DealScopeError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| DealScopeError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(DealScopeError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Apply the optional `DEALSCOPE_*` variables on top of `config`.
fn apply_env_overrides(config: &mut Config) -> Result<()> {
    if let Ok(pipeline_id) = std::env::var(ENV_PIPELINE_ID) {
        config.hubspot.pipeline_id = pipeline_id;
    }
    if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
        config.hubspot.base_url = base_url;
    }
    if let Ok(page_size) = std::env::var(ENV_PAGE_SIZE) {
        config.hubspot.page_size = page_size
            .trim()
            .parse::<u32>()
            .map_err(|e| DealScopeError::Config(format!("Invalid page size: {}", e)))?;
    }
    if let Ok(timezone) = std::env::var(ENV_TIMEZONE) {
        config.report.timezone = timezone;
    }
    if let Ok(zone_property) = std::env::var(ENV_ZONE_PROPERTY) {
        config.report.zone_property = zone_property;
    }
    Ok(())
}

fn validate(config: &Config) -> Result<()> {
    config.validate()?;
    parse_timezone(&config.report.timezone)?;
    url::Url::parse(&config.hubspot.base_url).map_err(|e| {
        DealScopeError::Config(format!("Invalid HubSpot base URL {}: {}", config.hubspot.base_url, e))
    })?;
    Ok(())
}

/// Probe multiple paths for configuration files
///
/// Searches for config files in the following locations (in order):
/// 1. Current working directory (`./config.{json,toml}`,
///    `./dealscope.{json,toml}`)
/// 2. Parent directories (up to 2 levels)
/// 3. Relative to executable location
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidate_files(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidate_files(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidate_files(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("dealscope.json"),
        dir.join("dealscope.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

/// Get required environment variable
///
/// # Errors
/// Returns `DealScopeError::Config` if the variable is not set or empty.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            DealScopeError::Config(format!("Missing required environment variable: {}", key))
        })
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
///
/// # Returns
/// The parsed boolean value, or `default` if not set.
pub fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
