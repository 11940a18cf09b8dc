//! Command execution helpers
//!
//! Provides utilities to reduce boilerplate when implementing commands with
//! timing and outcome logging.

use std::future::Future;
use std::time::Instant;

use dealscope_domain::Result as DomainResult;

use crate::utils::logging::log_command_execution;

/// Execute a command with automatic timing and outcome logging
///
/// # Example
///
/// ```rust,ignore
/// pub async fn prices_command(ctx: &AppContext, request: &ReportRequest) -> Result<String> {
///     execute_with_logging("prices", move || async move {
///         let report = ctx.reports.price_analysis(&filters, request.now).await?;
///         render(&report, request.format, request.now)
///     })
///     .await
/// }
/// ```
pub async fn execute_with_logging<F, Fut, T>(command_name: &str, command_fn: F) -> DomainResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = DomainResult<T>>,
{
    let start = Instant::now();

    let result = command_fn().await;

    log_command_execution(command_name, start.elapsed(), result.as_ref().err());
    result
}
