#![deny(missing_docs)]

//! # Error Kinds
//!
//! The closed taxonomy of request-time validation failures. Each kind has a
//! stable numeric code (in declaration order, starting at 1) and a fixed,
//! human friendly title that is written into error payloads.

use std::fmt;

/// Every kind of failure the decoding layer can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A request parameter value does not match the declared type.
    InvalidParamType,
    /// A required request parameter is absent.
    MissingParam,
    /// A payload attribute value does not match the declared type.
    InvalidAttributeType,
    /// A required payload attribute is absent.
    MissingAttribute,
    /// A value is not one of the allowed enum values.
    InvalidEnumValue,
    /// A required HTTP header is absent.
    MissingHeader,
    /// A value does not match its declared format.
    InvalidFormat,
    /// A value does not match its declared regular expression.
    InvalidPattern,
    /// A value is outside its declared bounds.
    InvalidRange,
    /// A collection or string length is outside its declared bounds.
    InvalidLength,
}

impl ErrorKind {
    /// All kinds, in code order.
    pub const ALL: [ErrorKind; 10] = [
        ErrorKind::InvalidParamType,
        ErrorKind::MissingParam,
        ErrorKind::InvalidAttributeType,
        ErrorKind::MissingAttribute,
        ErrorKind::InvalidEnumValue,
        ErrorKind::MissingHeader,
        ErrorKind::InvalidFormat,
        ErrorKind::InvalidPattern,
        ErrorKind::InvalidRange,
        ErrorKind::InvalidLength,
    ];

    /// Returns the human friendly title written into error payloads.
    pub fn title(self) -> &'static str {
        match self {
            ErrorKind::InvalidParamType => "invalid parameter value",
            ErrorKind::MissingParam => "missing required parameter",
            ErrorKind::InvalidAttributeType => "invalid attribute type",
            ErrorKind::MissingAttribute => "missing required attribute",
            ErrorKind::InvalidEnumValue => "invalid value",
            ErrorKind::MissingHeader => "missing required HTTP header",
            ErrorKind::InvalidFormat => "invalid value format",
            ErrorKind::InvalidPattern => "invalid value pattern",
            ErrorKind::InvalidRange => "invalid value range",
            ErrorKind::InvalidLength => "invalid value length",
        }
    }

    /// Returns the numeric code of the kind.
    pub fn code(self) -> u8 {
        match self {
            ErrorKind::InvalidParamType => 1,
            ErrorKind::MissingParam => 2,
            ErrorKind::InvalidAttributeType => 3,
            ErrorKind::MissingAttribute => 4,
            ErrorKind::InvalidEnumValue => 5,
            ErrorKind::MissingHeader => 6,
            ErrorKind::InvalidFormat => 7,
            ErrorKind::InvalidPattern => 8,
            ErrorKind::InvalidRange => 9,
            ErrorKind::InvalidLength => 10,
        }
    }

    /// Maps a numeric code back to its kind.
    pub fn from_code(code: u8) -> Option<ErrorKind> {
        ErrorKind::ALL.iter().copied().find(|k| k.code() == code)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Looks up the title of a numeric kind code.
///
/// Codes only ever come from the fixed taxonomy chosen by generated code, so
/// an unknown code is a defect in the caller.
///
/// # Panics
///
/// Panics with `unknown kind` when `code` is not part of the taxonomy.
pub fn title_for_code(code: u8) -> &'static str {
    match ErrorKind::from_code(code) {
        Some(kind) => kind.title(),
        None => panic!("unknown kind {code}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_round_trip_in_order() {
        for (idx, kind) in ErrorKind::ALL.iter().enumerate() {
            assert_eq!(kind.code() as usize, idx + 1);
            assert_eq!(ErrorKind::from_code(kind.code()), Some(*kind));
        }
        assert_eq!(ErrorKind::from_code(0), None);
        assert_eq!(ErrorKind::from_code(11), None);
    }

    #[test]
    fn test_titles_are_distinct() {
        let titles: HashSet<_> = ErrorKind::ALL.iter().map(|k| k.title()).collect();
        assert_eq!(titles.len(), ErrorKind::ALL.len());
    }

    #[test]
    fn test_title_for_known_code() {
        assert_eq!(title_for_code(1), "invalid parameter value");
        assert_eq!(title_for_code(6), "missing required HTTP header");
    }

    #[test]
    #[should_panic(expected = "unknown kind")]
    fn test_title_for_unknown_code_is_fatal() {
        title_for_code(42);
    }
}
