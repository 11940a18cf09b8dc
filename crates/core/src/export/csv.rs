//! CSV export
//!
//! Output opens with a UTF-8 byte-order mark so spreadsheet tools pick the
//! right encoding, quotes every field, and ends records with `\n`. Rows are
//! headers, body, then the totals row when the table has one.

use ::csv::{QuoteStyle, Terminator, WriterBuilder};
use dealscope_domain::constants::UTF8_BOM;
use dealscope_domain::{DealScopeError, Result};

use crate::reports::ReportTable;

/// Render a table as CSV text.
pub fn to_csv(table: &ReportTable) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(Vec::new());

    writer.write_record(&table.headers).map_err(export_error)?;
    for row in &table.rows {
        writer.write_record(row).map_err(export_error)?;
    }
    if let Some(footer) = &table.footer {
        writer.write_record(footer).map_err(export_error)?;
    }

    let bytes = writer.into_inner().map_err(|e| DealScopeError::Export(e.to_string()))?;
    let body = String::from_utf8(bytes).map_err(|e| DealScopeError::Export(e.to_string()))?;
    Ok(format!("{UTF8_BOM}{body}"))
}

fn export_error(err: ::csv::Error) -> DealScopeError {
    DealScopeError::Export(format!("CSV write failed: {err}"))
}
