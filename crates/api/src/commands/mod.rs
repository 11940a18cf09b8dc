//! Report commands - CLI to report service bridge

mod daily;
mod items;
mod output;
mod pipeline;
mod prices;

use chrono::{DateTime, Utc};
use dealscope_core::ExportFormat;
use dealscope_domain::Result;

pub use daily::*;
pub use items::*;
pub use output::*;
pub use pipeline::*;
pub use prices::*;

use crate::cli::Command;
use crate::context::AppContext;

/// Rendering options shared by every report command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub format: ExportFormat,
    /// Reference instant for deal ages and the HTML footer
    pub now: DateTime<Utc>,
}

/// Run one CLI command and return the rendered report.
pub async fn dispatch(ctx: &AppContext, command: &Command, options: RenderOptions) -> Result<String> {
    match command {
        Command::Pipeline { range } => pipeline_command(ctx, range.range()?, options).await,
        Command::Timeline { range, granularity, basis } => {
            let granularity = granularity.unwrap_or(ctx.config.report.granularity);
            let basis = basis.unwrap_or(ctx.config.report.basis);
            timeline_command(ctx, range.range()?, granularity, basis, options).await
        }
        Command::Daily { date } => daily_command(ctx, *date, options).await,
        Command::Prices { range } => prices_command(ctx, range.range()?, options).await,
        Command::Items { range } => items_command(ctx, range.range()?, options).await,
    }
}
