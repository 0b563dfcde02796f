#![deny(missing_docs)]

//! # Error Constructors
//!
//! One helper per error kind. Generated decoding code calls these as it finds
//! invalid data; each helper formats the kind specific message, appends the
//! typed error to the error value built so far and hands the accumulated value
//! back.
//!
//! Names and offered values are rendered with their `Debug` representation so
//! that strings show up quoted and numbers bare.
//!
//! Bound checks read `must be greater than or equal to N` and `must be lesser
//! than or equal to N`; pattern checks read `must match the regexp`. This is
//! not the `greater or equal to than` / `must be match` text some decoders
//! emit, so clients should key on the kind title rather than the message.

use crate::runtime::format::Format;
use crate::runtime::kind::ErrorKind;
use crate::runtime::multi::{report_error, ErrorValue};
use crate::runtime::typed::TypedError;
use std::fmt::{Debug, Display};

/// Which side of a range or length constraint was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The value is below the declared minimum.
    Minimum,
    /// The value is above the declared maximum.
    Maximum,
}

impl Bound {
    fn comparison(self) -> &'static str {
        match self {
            Bound::Minimum => "greater than or equal to",
            Bound::Maximum => "lesser than or equal to",
        }
    }
}

fn report(err: impl Into<Option<ErrorValue>>, kind: ErrorKind, msg: String) -> ErrorValue {
    report_error(err, TypedError::new(kind, msg))
}

/// A request parameter could not be coerced to its declared type.
pub fn invalid_param_type_error<V: Debug + ?Sized>(
    name: &str,
    val: &V,
    expected: &str,
    err: impl Into<Option<ErrorValue>>,
) -> ErrorValue {
    report(
        err,
        ErrorKind::InvalidParamType,
        format!(
            "invalid value {:?} for parameter {:?}, must be a {}",
            val, name, expected
        ),
    )
}

/// A required request parameter is missing.
pub fn missing_param_error(name: &str, err: impl Into<Option<ErrorValue>>) -> ErrorValue {
    report(
        err,
        ErrorKind::MissingParam,
        format!("missing required parameter {:?}", name),
    )
}

/// A payload attribute has the wrong type. `ctx` locates the attribute.
pub fn invalid_attribute_type_error<V: Debug + ?Sized>(
    ctx: &str,
    val: &V,
    expected: &str,
    err: impl Into<Option<ErrorValue>>,
) -> ErrorValue {
    report(
        err,
        ErrorKind::InvalidAttributeType,
        format!("type of {} must be {} but got value {:?}", ctx, expected, val),
    )
}

/// A required payload attribute is missing.
pub fn missing_attribute_error(
    ctx: &str,
    name: &str,
    err: impl Into<Option<ErrorValue>>,
) -> ErrorValue {
    report(
        err,
        ErrorKind::MissingAttribute,
        format!("attribute {:?} of {} is missing and required", name, ctx),
    )
}

/// A required HTTP header is missing.
pub fn missing_header_error(name: &str, err: impl Into<Option<ErrorValue>>) -> ErrorValue {
    report(
        err,
        ErrorKind::MissingHeader,
        format!("missing required HTTP header {:?}", name),
    )
}

/// A value is not part of its enum.
pub fn invalid_enum_value_error<V: Debug + ?Sized, A: Debug>(
    ctx: &str,
    val: &V,
    allowed: &[A],
    err: impl Into<Option<ErrorValue>>,
) -> ErrorValue {
    let elems: Vec<String> = allowed.iter().map(|a| format!("{:?}", a)).collect();
    report(
        err,
        ErrorKind::InvalidEnumValue,
        format!(
            "value of {} must be one of {} but got value {:?}",
            ctx,
            elems.join(", "),
            val
        ),
    )
}

/// A string does not match its declared format. `format_error` says why.
pub fn invalid_format_error(
    ctx: &str,
    target: &str,
    format: Format,
    format_error: &dyn Display,
    err: impl Into<Option<ErrorValue>>,
) -> ErrorValue {
    report(
        err,
        ErrorKind::InvalidFormat,
        format!(
            "{} must be formatted as a {} but got value {:?}, {}",
            ctx, format, target, format_error
        ),
    )
}

/// A string does not match its declared regular expression.
pub fn invalid_pattern_error(
    ctx: &str,
    target: &str,
    pattern: &str,
    err: impl Into<Option<ErrorValue>>,
) -> ErrorValue {
    report(
        err,
        ErrorKind::InvalidPattern,
        format!(
            "{} must match the regexp {:?} but got value {:?}",
            ctx, pattern, target
        ),
    )
}

/// A value is outside its declared range.
pub fn invalid_range_error(
    ctx: &str,
    target: &str,
    value: i64,
    bound: Bound,
    err: impl Into<Option<ErrorValue>>,
) -> ErrorValue {
    report(
        err,
        ErrorKind::InvalidRange,
        format!(
            "{} must be {} {} but got value {:?}",
            ctx,
            bound.comparison(),
            value,
            target
        ),
    )
}

/// A value's length is outside its declared bounds.
///
/// Reported under [`ErrorKind::InvalidRange`]: clients already key on the
/// range title for both checks.
pub fn invalid_length_error(
    ctx: &str,
    target: &str,
    value: usize,
    bound: Bound,
    err: impl Into<Option<ErrorValue>>,
) -> ErrorValue {
    report(
        err,
        ErrorKind::InvalidRange,
        format!(
            "length of {} must be {} {} but got value {:?}",
            ctx,
            bound.comparison(),
            value,
            target
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::multi::Failure;

    fn sole_typed(value: &ErrorValue) -> &TypedError {
        assert_eq!(value.len(), 1);
        value.failures()[0].as_typed().expect("typed failure")
    }

    #[test]
    fn test_invalid_param_type_message() {
        let value = invalid_param_type_error("page", "abc", "integer", None);
        let typed = sole_typed(&value);
        assert_eq!(typed.kind.title(), "invalid parameter value");
        assert_eq!(
            typed.to_string(),
            r#"{"kind":"invalid parameter value","msg":"invalid value "abc" for parameter "page", must be a integer"}"#
        );
    }

    #[test]
    fn test_numeric_value_is_not_quoted() {
        let value = invalid_attribute_type_error("payload.count", &12, "string", None);
        assert_eq!(
            sole_typed(&value).msg,
            r#"type of payload.count must be string but got value 12"#
        );
    }

    #[test]
    fn test_missing_messages() {
        let value = missing_param_error("id", None);
        assert_eq!(sole_typed(&value).msg, r#"missing required parameter "id""#);

        let value = missing_header_error("X-Token", None);
        assert_eq!(
            sole_typed(&value).msg,
            r#"missing required HTTP header "X-Token""#
        );

        let value = missing_attribute_error("payload", "name", None);
        assert_eq!(
            sole_typed(&value).msg,
            r#"attribute "name" of payload is missing and required"#
        );
    }

    #[test]
    fn test_enum_lists_allowed_values() {
        let value = invalid_enum_value_error("payload.color", "pink", &["red", "blue"], None);
        let typed = sole_typed(&value);
        assert_eq!(typed.kind, ErrorKind::InvalidEnumValue);
        assert_eq!(
            typed.msg,
            r#"value of payload.color must be one of "red", "blue" but got value "pink""#
        );
    }

    #[test]
    fn test_format_and_pattern_messages() {
        let value = invalid_format_error(
            "payload.email",
            "nope",
            Format::Email,
            &"missing @",
            None,
        );
        let typed = sole_typed(&value);
        assert_eq!(typed.kind, ErrorKind::InvalidFormat);
        assert_eq!(
            typed.msg,
            r#"payload.email must be formatted as a email but got value "nope", missing @"#
        );

        let value = invalid_pattern_error("payload.code", "x", "^[0-9]+$", None);
        assert_eq!(
            sole_typed(&value).msg,
            r#"payload.code must match the regexp "^[0-9]+$" but got value "x""#
        );
    }

    #[test]
    fn test_length_reuses_range_kind() {
        let value = invalid_length_error("payload.tags", "[]", 1, Bound::Minimum, None);
        let typed = sole_typed(&value);
        assert_eq!(typed.kind, ErrorKind::InvalidRange);
        assert_eq!(
            typed.msg,
            r#"length of payload.tags must be greater than or equal to 1 but got value "[]""#
        );

        let value = invalid_range_error("payload.age", "200", 150, Bound::Maximum, None);
        assert_eq!(
            sole_typed(&value).msg,
            r#"payload.age must be lesser than or equal to 150 but got value "200""#
        );
    }

    #[test]
    fn test_helpers_thread_one_value() {
        let err = missing_param_error("id", None);
        let err = missing_header_error("X-Token", err);
        let err = invalid_param_type_error("page", "abc", "integer", err);
        let kinds: Vec<_> = err
            .failures()
            .iter()
            .map(|f| f.as_typed().unwrap().kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                ErrorKind::MissingParam,
                ErrorKind::MissingHeader,
                ErrorKind::InvalidParamType
            ]
        );
    }

    #[test]
    fn test_helper_after_opaque_error() {
        let err = ErrorValue::from(Failure::other("body is not JSON"));
        let err = missing_param_error("id", err);
        assert_eq!(
            err.to_string(),
            r#"["body is not JSON",{"kind":"missing required parameter","msg":"missing required parameter "id""}]"#
        );
    }
}
