use std::time::Duration;

use dealscope_domain::DealScopeError;
use dealscope_infra::config::env_bool;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Switches log output to one JSON object per line.
pub const LOG_JSON_ENV: &str = "DEALSCOPE_LOG_JSON";

/// Install the global tracing subscriber.
///
/// Filtering follows `RUST_LOG` and defaults to `info`. Logs go to stderr so
/// stdout stays reserved for report output. Calling this twice is harmless;
/// the second install is ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);

    let installed = if env_bool(LOG_JSON_ENV, false) {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Log the outcome of a command execution with structured fields.
///
/// # Parameters
/// * `command` - Logical command identifier (e.g. `"prices"`).
/// * `elapsed` - Duration the command execution took.
/// * `error` - The failure, when the command did not succeed.
///
/// Callers must avoid forwarding sensitive values in `command`.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, error: Option<&DealScopeError>) {
    let duration_ms = elapsed.as_millis() as u64;

    match error {
        None => info!(command, duration_ms, "command_execution_success"),
        Some(err) => warn!(
            command,
            duration_ms,
            error_type = err.label(),
            error = %err,
            "command_execution_failure"
        ),
    }
}
