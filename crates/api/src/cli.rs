//! Command-line surface of the `dealscope` binary

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use dealscope_core::ExportFormat;
use dealscope_domain::{DateBasis, DealScopeError, Result, TimeGranularity};

#[derive(Parser, Debug)]
#[command(name = "dealscope", version, about = "Deal price analysis and pipeline reports")]
pub struct Cli {
    #[arg(long, global = true, help = "Config file (JSON or TOML); probed when omitted")]
    pub config: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        default_value = "json",
        help = "Output format: json, csv or html"
    )]
    pub format: ExportFormat,
    #[arg(long, global = true, help = "Write the report to a file instead of stdout")]
    pub output: Option<PathBuf>,
    #[arg(long, global = true, help = "IANA timezone overriding report.timezone")]
    pub timezone: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Deals, amounts and areas per pipeline stage
    Pipeline {
        #[command(flatten)]
        range: DateRangeArgs,
    },
    /// Deals bucketed by day or month
    Timeline {
        #[command(flatten)]
        range: DateRangeArgs,
        #[arg(long, help = "day or month; defaults to report.granularity")]
        granularity: Option<TimeGranularity>,
        #[arg(long, help = "created or closed; defaults to report.basis")]
        basis: Option<DateBasis>,
    },
    /// Activity of one local day plus the open pipeline
    Daily {
        #[arg(long, help = "Local date (YYYY-MM-DD); defaults to today")]
        date: Option<NaiveDate>,
    },
    /// Quoted price per m² against the market band of each deal's zone
    Prices {
        #[command(flatten)]
        range: DateRangeArgs,
    },
    /// Every quoted line item with its computed area
    Items {
        #[command(flatten)]
        range: DateRangeArgs,
    },
}

impl Command {
    /// Stable name used in command logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pipeline { .. } => "pipeline",
            Self::Timeline { .. } => "timeline",
            Self::Daily { .. } => "daily",
            Self::Prices { .. } => "prices",
            Self::Items { .. } => "items",
        }
    }
}

/// Optional creation-date window in the report timezone.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct DateRangeArgs {
    #[arg(long, help = "First local date (YYYY-MM-DD), inclusive")]
    pub from: Option<NaiveDate>,
    #[arg(long, help = "Last local date (YYYY-MM-DD), inclusive")]
    pub to: Option<NaiveDate>,
}

impl DateRangeArgs {
    /// Both bounds, or neither.
    pub fn range(&self) -> Result<Option<(NaiveDate, NaiveDate)>> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => Ok(Some((from, to))),
            (None, None) => Ok(None),
            _ => Err(DealScopeError::InvalidInput(
                "--from and --to must be given together".into(),
            )),
        }
    }
}
