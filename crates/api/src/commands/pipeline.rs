//! Stage summary and timeline commands

use chrono::NaiveDate;
use dealscope_core::DealFilters;
use dealscope_domain::{DateBasis, Result, TimeGranularity};

use super::{render, RenderOptions};
use crate::context::AppContext;
use crate::utils::command_helpers::execute_with_logging;

/// Per-stage summary with funnel conversion.
pub async fn pipeline_command(
    ctx: &AppContext,
    range: Option<(NaiveDate, NaiveDate)>,
    options: RenderOptions,
) -> Result<String> {
    execute_with_logging("pipeline", move || async move {
        let filters = ctx.filters_for(range)?;
        let report = ctx.reports.pipeline_summary(&filters, options.now).await?;
        render(&report, options.format, options.now)
    })
    .await
}

/// Deals bucketed by day or month.
///
/// With a range, buckets are zero-filled over it. The range filters by
/// creation date only for the created basis; closed-date timelines fetch
/// every deal and keep the buckets inside the range.
pub async fn timeline_command(
    ctx: &AppContext,
    range: Option<(NaiveDate, NaiveDate)>,
    granularity: TimeGranularity,
    basis: DateBasis,
    options: RenderOptions,
) -> Result<String> {
    execute_with_logging("timeline", move || async move {
        let filters = match basis {
            DateBasis::Created => ctx.filters_for(range)?,
            DateBasis::Closed => DealFilters::default(),
        };
        let report =
            ctx.reports.timeline(&filters, granularity, basis, range, options.now).await?;
        render(&report, options.format, options.now)
    })
    .await
}
