//! Report assemblers
//!
//! Each report is a plain serializable struct built from enriched deals and
//! can be flattened into a [`ReportTable`] for the CSV and HTML exporters.

pub mod daily;
pub mod format;
pub mod items;
pub mod pipeline;
pub mod price_analysis;
pub mod table;

pub use daily::{build_daily_report, ActivitySlice, DailyReport};
pub use items::{build_items_report, ItemRow, ItemsReport};
pub use pipeline::{PipelineReport, TimelineReport};
pub use price_analysis::{build_price_analysis, PriceAnalysisReport, PriceAnalysisRow, StatusCounts};
pub use table::{ReportTable, TabularReport};
