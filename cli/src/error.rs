#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate. A design that fails validation is not an
//! error here: it is a report, and only changes the exit code.

use derive_more::{Display, From};
use designval_core::AppError;

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// Failure reported by the core library.
    #[display("{}", _0)]
    Core(AppError),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;
