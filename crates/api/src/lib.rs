//! # DealScope app
//!
//! Command-line application layer - commands and main entry point.
//!
//! This crate contains:
//! - The clap command-line surface
//! - Report commands (CLI → report service bridge)
//! - Application context (dependency injection)
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires the HubSpot adapter into the report service
//! - Renders reports as JSON, CSV or HTML

pub mod cli;
pub mod commands;
pub mod context;
pub mod utils;

pub use cli::{Cli, Command};
pub use commands::*;
pub use context::*;
