//! DealScope - CRM deal price analysis
//!
//! Main entry point for the `dealscope` command-line tool.

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use dealscope_domain::Config;
use dealscope_infra::config as config_loader;
use dealscope_lib::utils::logging::init_tracing;
use dealscope_lib::{dispatch, write_output, AppContext, Cli, RenderOptions};

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => config_loader::load_from_file(Some(path.clone())),
        None => config_loader::load(),
    }
    .context("failed to load configuration")?;

    if let Some(timezone) = &cli.timezone {
        config_loader::parse_timezone(timezone)?;
        config.report.timezone = timezone.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before the subscriber reads RUST_LOG
    let dotenv = dotenvy::dotenv();
    init_tracing();
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) => tracing::debug!(error = %e, "no .env file loaded"),
    }

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let ctx = AppContext::new(config).context("failed to initialise HubSpot client")?;

    let options = RenderOptions { format: cli.format, now: Utc::now() };
    let body = dispatch(&ctx, &cli.command, options)
        .await
        .with_context(|| format!("{} report failed", cli.command.name()))?;

    write_output(&body, cli.output.as_deref())?;
    Ok(())
}
