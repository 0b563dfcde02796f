#![deny(missing_docs)]

//! # Designval Core
//!
//! Consistency checks for declarative HTTP API designs, and the structured
//! error model generated request decoders report problems with.
//!
//! - [`design`] validates a design graph before code is generated
//!   from it and reports every violation in one pass.
//! - [`runtime`] holds the typed errors and the accumulator used while
//!   decoding requests against a valid design.

/// Shared error types.
pub mod error;

/// Design graph and design-time validation.
pub mod design;

/// Request-time error taxonomy and accumulation.
pub mod runtime;

pub use design::{validate_api, ApiDefinition, ValidationErrors, ValidationResult};
pub use error::{AppError, AppResult};
pub use runtime::{report_error, ErrorKind, ErrorValue, MultiError, TypedError};
