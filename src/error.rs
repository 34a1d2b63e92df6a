//! Unified error types for sbom-migrate.
//!
//! The core stages report their own narrow errors
//! ([`StructuralDecodeError`](crate::codec::StructuralDecodeError),
//! [`UnrecognizedSchemaError`], [`EncodeError`]). This module wraps them,
//! together with I/O and configuration failures, into one type for the
//! file-level pipeline and the CLI.

use crate::codec::EncodeError;
use crate::config::ConfigFileError;
use crate::detection::UnrecognizedSchemaError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sbom-migrate operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MigrateError {
    /// No supported schema revision accepted the input
    #[error("Failed to load document: {context}")]
    Load {
        context: String,
        #[source]
        source: UnrecognizedSchemaError,
    },

    /// The upgraded document could not be rendered
    #[error("Failed to encode document: {context}")]
    Encode {
        context: String,
        #[source]
        source: EncodeError,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Input exceeds the configured size limit
    #[error("{} is {size} bytes, larger than the {limit} byte limit", path.display())]
    InputTooLarge { path: PathBuf, size: u64, limit: u64 },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for sbom-migrate operations
pub type Result<T> = std::result::Result<T, MigrateError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl MigrateError {
    /// Create a load error with context
    pub fn load(context: impl Into<String>, source: UnrecognizedSchemaError) -> Self {
        Self::Load {
            context: context.into(),
            source,
        }
    }

    /// Create an encode error with context
    pub fn encode(context: impl Into<String>, source: EncodeError) -> Self {
        Self::Encode {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for MigrateError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<UnrecognizedSchemaError> for MigrateError {
    fn from(err: UnrecognizedSchemaError) -> Self {
        Self::load("trial decoding", err)
    }
}

impl From<EncodeError> for MigrateError {
    fn from(err: EncodeError) -> Self {
        Self::encode("serialization", err)
    }
}

impl From<ConfigFileError> for MigrateError {
    fn from(err: ConfigFileError) -> Self {
        Self::Config(err.to_string())
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// This trait provides methods to add context information to errors,
/// creating a chain of context that helps trace the source of problems.
///
/// # Example
///
/// ```ignore
/// use sbom_migrate::error::ErrorContext;
///
/// fn load_one(path: &Path) -> Result<LoadedBom> {
///     let content = std::fs::read_to_string(path)
///         .context("reading document")?;
///
///     load_str(&content)
///         .with_context(|| format!("loading {}", path.display()))
/// }
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    ///
    /// The context string is prepended to the error's existing context.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<MigrateError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: MigrateError, new_ctx: &str) -> MigrateError {
    match err {
        MigrateError::Load {
            context: existing,
            source,
        } => MigrateError::Load {
            context: chain_context(new_ctx, &existing),
            source,
        },
        MigrateError::Encode {
            context: existing,
            source,
        } => MigrateError::Encode {
            context: chain_context(new_ctx, &existing),
            source,
        },
        MigrateError::Io {
            path,
            message,
            source,
        } => MigrateError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        err @ MigrateError::InputTooLarge { .. } => err,
        MigrateError::Config(msg) => MigrateError::Config(chain_context(new_ctx, &msg)),
        MigrateError::Validation(msg) => MigrateError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| MigrateError::Validation(context.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{DecodeErrorKind, Encoding, StructuralDecodeError};
    use crate::model::SchemaVersion;
    use std::error::Error as _;

    fn unrecognized() -> UnrecognizedSchemaError {
        UnrecognizedSchemaError {
            attempts: vec![StructuralDecodeError::new(
                SchemaVersion::V1_2,
                Encoding::Json,
                DecodeErrorKind::WrongEncoding(Encoding::Json),
            )],
        }
    }

    #[test]
    fn test_load_error_keeps_attempts_as_source() {
        let err = MigrateError::from(unrecognized());
        assert!(err.to_string().contains("trial decoding"));
        let source = err.source().unwrap().to_string();
        assert!(source.contains("CycloneDX 1.2 (JSON)"), "{source}");
    }

    #[test]
    fn test_io_error_mentions_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = MigrateError::io("/path/to/bom.xml", io_err);
        assert!(err.to_string().contains("/path/to/bom.xml"));
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(MigrateError::load("base", unrecognized()))
        }

        fn middle() -> Result<()> {
            inner().context("middle layer")
        }

        fn outer() -> Result<()> {
            middle().context("outer layer")
        }

        match outer() {
            Err(MigrateError::Load { context, .. }) => {
                assert_eq!(context, "outer layer: middle layer: base");
            }
            other => panic!("Expected Load error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called);

        let err_result: Result<i32> = Err(MigrateError::validation("error"));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called);
    }

    #[test]
    fn test_option_context() {
        assert_eq!(Some(42).context_none("missing value").unwrap(), 42);

        match None::<i32>.context_none("missing value") {
            Err(MigrateError::Validation(msg)) => assert_eq!(msg, "missing value"),
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("outer", "middle: inner"), "outer: middle: inner");
    }
}
