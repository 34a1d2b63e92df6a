//! Pipeline orchestration for document migration.
//!
//! `load` runs trial decoding, the upgrade chain and normalization in that
//! order; `save` renders a newest-revision tree with a codec. The file and
//! batch helpers are thin wrappers used by the CLI command handlers.

mod load;
mod output;

pub use load::{load, load_batch, load_detected, load_file, load_str, load_with, LoadedBom};
pub use output::{encoding_for_path, save, save_as, save_file, write_output, OutputTarget};

use crate::validation::ValidationReport;

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - document loaded (and validated, if enabled)
    pub const SUCCESS: i32 = 0;
    /// Validation reported errors
    pub const VALIDATION_ERRORS: i32 = 1;
    /// Validation reported warnings and `--fail-on-warning` was given
    pub const VALIDATION_WARNINGS: i32 = 2;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

/// Exit code for a validation report under the given strictness.
#[must_use]
pub const fn exit_code_for(report: &ValidationReport, fail_on_warning: bool) -> i32 {
    if report.error_count > 0 {
        exit_codes::VALIDATION_ERRORS
    } else if fail_on_warning && report.warning_count > 0 {
        exit_codes::VALIDATION_WARNINGS
    } else {
        exit_codes::SUCCESS
    }
}
