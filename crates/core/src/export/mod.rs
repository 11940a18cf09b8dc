//! CSV and printable HTML rendering of report tables

pub mod csv;
pub mod html;

use serde::{Deserialize, Serialize};

use dealscope_domain::impl_domain_status_conversions;

pub use self::csv::to_csv;
pub use self::html::{escape_html, to_html};

/// Output format for rendered reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
    Html,
}

impl_domain_status_conversions!(ExportFormat {
    Json => "json",
    Csv => "csv",
    Html => "html",
});

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Html => "html",
        }
    }
}
