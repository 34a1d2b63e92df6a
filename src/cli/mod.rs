//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod detect;
mod upgrade;
mod validate;

pub use detect::{run_detect, DetectionSummary};
pub use upgrade::run_upgrade;
pub use validate::run_validate;

use clap::ValueEnum;

/// How command results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportStyle {
    /// Human-readable text
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
}
