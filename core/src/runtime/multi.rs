#![deny(missing_docs)]

//! # Multi-Error Accumulation
//!
//! Request decoding threads one growing error value through every check it
//! performs. That value is either absent, a single failure, or an ordered
//! [`MultiError`]; [`report_error`] appends to it without ever nesting one
//! accumulator inside another.

use crate::runtime::typed::TypedError;
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;

/// Boxed error for failures that carry no kind.
pub type OpaqueError = Box<dyn std::error::Error + Send + Sync>;

/// One failure held by an accumulator.
#[derive(Debug)]
pub enum Failure {
    /// A failure from the fixed taxonomy.
    Typed(TypedError),
    /// Any other error, reported by its message only.
    Other(OpaqueError),
}

impl Failure {
    /// Wraps an arbitrary error or message.
    pub fn other(err: impl Into<OpaqueError>) -> Self {
        Failure::Other(err.into())
    }

    /// Returns the typed error, if this failure has a kind.
    pub fn as_typed(&self) -> Option<&TypedError> {
        match self {
            Failure::Typed(t) => Some(t),
            Failure::Other(_) => None,
        }
    }
}

impl From<TypedError> for Failure {
    fn from(err: TypedError) -> Self {
        Failure::Typed(err)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Typed(t) => fmt::Display::fmt(t, f),
            Failure::Other(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl Serialize for Failure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Failure::Typed(t) => t.serialize(serializer),
            Failure::Other(e) => serializer.collect_str(e),
        }
    }
}

/// An ordered, flat collection of failures.
#[derive(Debug, Default)]
pub struct MultiError(Vec<Failure>);

impl MultiError {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a failure at the end.
    pub fn push(&mut self, failure: impl Into<Failure>) {
        self.0.push(failure.into());
    }

    /// Failures in append order.
    pub fn failures(&self) -> &[Failure] {
        &self.0
    }

    /// Number of failures.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nothing was appended.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Renders a JSON array. Typed failures are embedded as objects, every other
/// failure as its quoted message.
impl fmt::Display for MultiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            match failure {
                Failure::Typed(t) => write!(f, "{}", t)?,
                Failure::Other(e) => write!(f, "\"{}\"", e)?,
            }
        }
        f.write_str("]")
    }
}

impl std::error::Error for MultiError {}

impl Serialize for MultiError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for failure in &self.0 {
            seq.serialize_element(failure)?;
        }
        seq.end()
    }
}

/// The error value threaded through request decoding.
#[derive(Debug)]
pub enum ErrorValue {
    /// A lone failure that has not been accumulated yet.
    Single(Failure),
    /// An accumulator.
    Multi(MultiError),
}

impl ErrorValue {
    /// Failures held by this value, in order.
    pub fn failures(&self) -> &[Failure] {
        match self {
            ErrorValue::Single(f) => std::slice::from_ref(f),
            ErrorValue::Multi(m) => m.failures(),
        }
    }

    /// Number of failures held.
    pub fn len(&self) -> usize {
        self.failures().len()
    }

    /// True for an accumulator with no failures.
    pub fn is_empty(&self) -> bool {
        self.failures().is_empty()
    }

    /// Coerces the value into an accumulator.
    pub fn into_multi(self) -> MultiError {
        match self {
            ErrorValue::Single(f) => MultiError(vec![f]),
            ErrorValue::Multi(m) => m,
        }
    }
}

impl From<TypedError> for ErrorValue {
    fn from(err: TypedError) -> Self {
        ErrorValue::Single(Failure::Typed(err))
    }
}

impl From<Failure> for ErrorValue {
    fn from(failure: Failure) -> Self {
        ErrorValue::Single(failure)
    }
}

impl From<MultiError> for ErrorValue {
    fn from(multi: MultiError) -> Self {
        ErrorValue::Multi(multi)
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorValue::Single(failure) => fmt::Display::fmt(failure, f),
            ErrorValue::Multi(multi) => fmt::Display::fmt(multi, f),
        }
    }
}

impl std::error::Error for ErrorValue {}

impl Serialize for ErrorValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ErrorValue::Single(failure) => failure.serialize(serializer),
            ErrorValue::Multi(multi) => multi.serialize(serializer),
        }
    }
}

/// Appends `failure` to `existing` and returns the accumulated value.
///
/// - absent: a new one element accumulator.
/// - accumulator: `failure` is appended at the end.
/// - single failure: a two element accumulator, existing failure first.
pub fn report_error(
    existing: impl Into<Option<ErrorValue>>,
    failure: impl Into<Failure>,
) -> ErrorValue {
    let failure = failure.into();
    let multi = match existing.into() {
        None => MultiError(vec![failure]),
        Some(ErrorValue::Multi(mut multi)) => {
            multi.push(failure);
            multi
        }
        Some(ErrorValue::Single(first)) => MultiError(vec![first, failure]),
    };
    ErrorValue::Multi(multi)
}
