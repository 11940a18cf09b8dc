//! Market price analysis command

use chrono::NaiveDate;
use dealscope_domain::Result;

use super::{render, RenderOptions};
use crate::context::AppContext;
use crate::utils::command_helpers::execute_with_logging;

/// Classify every deal's price per m² against its zone's market band.
pub async fn prices_command(
    ctx: &AppContext,
    range: Option<(NaiveDate, NaiveDate)>,
    options: RenderOptions,
) -> Result<String> {
    execute_with_logging("prices", move || async move {
        let filters = ctx.filters_for(range)?;
        let report = ctx.reports.price_analysis(&filters, options.now).await?;
        tracing::debug!(
            below_market = report.counts.below_market,
            in_range = report.counts.in_range,
            above_market = report.counts.above_market,
            no_data = report.counts.no_data,
            "price analysis ready"
        );
        render(&report, options.format, options.now)
    })
    .await
}
