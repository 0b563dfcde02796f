#![deny(missing_docs)]

//! # Typed Errors
//!
//! A single structured failure found while decoding a request: a kind from
//! the fixed taxonomy plus an occurrence specific message.

use crate::runtime::kind::ErrorKind;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

/// A failure that can be written into an HTTP response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedError {
    /// Category of the failure.
    pub kind: ErrorKind,
    /// Details of this particular occurrence.
    pub msg: String,
}

impl TypedError {
    /// Creates a typed error.
    pub fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            msg: msg.into(),
        }
    }
}

/// Renders `{"kind":"<title>","msg":"<msg>"}`.
///
/// The message is written as supplied, without JSON escaping. Use the
/// `Serialize` impl when an escaped payload is needed.
impl fmt::Display for TypedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"{{"kind":"{}","msg":"{}"}}"#,
            self.kind.title(),
            self.msg
        )
    }
}

impl std::error::Error for TypedError {}

impl Serialize for TypedError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TypedError", 2)?;
        state.serialize_field("kind", self.kind.title())?;
        state.serialize_field("msg", &self.msg)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_kind_and_msg_object() {
        let err = TypedError::new(ErrorKind::MissingHeader, "missing X-Token");
        assert_eq!(
            err.to_string(),
            r#"{"kind":"missing required HTTP header","msg":"missing X-Token"}"#
        );
    }

    #[test]
    fn test_display_does_not_escape_message() {
        let err = TypedError::new(ErrorKind::MissingParam, r#"missing "id""#);
        assert_eq!(
            err.to_string(),
            r#"{"kind":"missing required parameter","msg":"missing "id""}"#
        );
    }

    #[test]
    fn test_serialize_escapes_message() {
        let err = TypedError::new(ErrorKind::MissingParam, r#"missing "id""#);
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(
            json,
            r#"{"kind":"missing required parameter","msg":"missing \"id\""}"#
        );
    }
}
