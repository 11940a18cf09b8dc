//! Daily activity command

use chrono::NaiveDate;
use dealscope_domain::Result;

use super::{render, RenderOptions};
use crate::context::AppContext;
use crate::utils::command_helpers::execute_with_logging;

/// Report for one local day; defaults to today in the report timezone.
pub async fn daily_command(
    ctx: &AppContext,
    date: Option<NaiveDate>,
    options: RenderOptions,
) -> Result<String> {
    let date = date.unwrap_or_else(|| options.now.with_timezone(&ctx.timezone()).date_naive());

    execute_with_logging("daily", move || async move {
        let report = ctx.reports.daily_report(date, options.now).await?;
        render(&report, options.format, options.now)
    })
    .await
}
