use chrono::NaiveDate;
use dealscope_domain::Result;

use super::{render, RenderOptions};
use crate::context::AppContext;
use crate::utils::command_helpers::execute_with_logging;

/// Flat list of quoted line items with their computed areas.
pub async fn items_command(
    ctx: &AppContext,
    range: Option<(NaiveDate, NaiveDate)>,
    options: RenderOptions,
) -> Result<String> {
    execute_with_logging("items", move || async move {
        let filters = ctx.filters_for(range)?;
        let report = ctx.reports.items_report(&filters, options.now).await?;
        render(&report, options.format, options.now)
    })
    .await
}
