//! Flat table shape shared by every exporter

use serde::{Deserialize, Serialize};

/// Pre-formatted report grid. Every cell is already a display string.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReportTable {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Totals row aligned with `headers`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<Vec<String>>,
    /// Free-form summary lines rendered above the table
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl ReportTable {
    pub fn new<S: Into<String>>(title: impl Into<String>, headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            title: title.into(),
            headers: headers.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn with_footer(mut self, footer: Vec<String>) -> Self {
        self.footer = Some(footer);
        self
    }

    pub fn note(&mut self, line: impl Into<String>) {
        self.notes.push(line.into());
    }
}

/// Reports that can be flattened for export.
pub trait TabularReport {
    fn to_table(&self) -> ReportTable;
}
