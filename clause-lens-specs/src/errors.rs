//! Error types for the fixture harness.

use thiserror::Error;

/// Errors that can occur while parsing or loading fixtures.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Error parsing a fixture file.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Error loading a fixture file.
    #[error("failed to load fixture: {path}: {message}")]
    Load { path: String, message: String },

    /// The expected-failures ledger could not be read.
    #[error("failed to load expected failures: {path}: {message}")]
    Failures { path: String, message: String },
}

/// Result type for spec operations.
pub type SpecResult<T> = Result<T, SpecError>;
