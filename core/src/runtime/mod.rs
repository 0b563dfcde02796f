#![deny(missing_docs)]

//! # Request-Time Errors
//!
//! Structured errors produced while decoding requests against a validated
//! design. Every helper appends to an [`ErrorValue`] so one value collects all
//! the problems found in a request before it is written to the response body.
//!
//! - **kind**: the fixed error taxonomy and its titles.
//! - **typed**: a single kind + message failure.
//! - **multi**: the accumulator and the append-and-coerce operation.
//! - **helpers**: one constructor per kind.
//! - **format**: declared string formats.

pub mod format;
pub mod helpers;
pub mod kind;
pub mod multi;
pub mod typed;

pub use format::Format;
pub use helpers::{
    invalid_attribute_type_error, invalid_enum_value_error, invalid_format_error,
    invalid_length_error, invalid_param_type_error, invalid_pattern_error, invalid_range_error,
    missing_attribute_error, missing_header_error, missing_param_error, Bound,
};
pub use kind::{title_for_code, ErrorKind};
pub use multi::{report_error, ErrorValue, Failure, MultiError, OpaqueError};
pub use typed::TypedError;
