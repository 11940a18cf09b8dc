//! Report rendering and output writing

use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use dealscope_core::{to_csv, to_html, ExportFormat, TabularReport};
use dealscope_domain::{DealScopeError, Result};
use serde::Serialize;
use tracing::info;

/// Render a report as pretty JSON, CSV or printable HTML.
pub fn render<R>(report: &R, format: ExportFormat, generated_at: DateTime<Utc>) -> Result<String>
where
    R: Serialize + TabularReport,
{
    match format {
        ExportFormat::Json => serde_json::to_string_pretty(report)
            .map_err(|e| DealScopeError::Export(format!("failed to serialize report: {e}"))),
        ExportFormat::Csv => to_csv(&report.to_table()),
        ExportFormat::Html => Ok(to_html(&report.to_table(), generated_at)),
    }
}

/// Write a rendered report to `path`, or to stdout when no path is given.
pub fn write_output(body: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, body).map_err(|e| {
                DealScopeError::Export(format!("failed to write {}: {e}", path.display()))
            })?;
            info!(path = %path.display(), bytes = body.len(), "report written");
            Ok(())
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            let mut write = || -> std::io::Result<()> {
                stdout.write_all(body.as_bytes())?;
                if !body.ends_with('\n') {
                    stdout.write_all(b"\n")?;
                }
                stdout.flush()
            };
            write().map_err(|e| DealScopeError::Export(format!("failed to write to stdout: {e}")))
        }
    }
}
