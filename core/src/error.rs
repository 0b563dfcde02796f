//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! Validation findings are not failures of the tool itself; they travel as
//! [`ValidationErrors`] and are only lifted into `AppError::Design` at the
//! boundary where a caller wants a single error type.

use crate::design::ValidationErrors;
use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: there is no blanket `From<String>`; decode failures are built as
/// `Parse` explicitly.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// A design document could not be decoded.
    #[from(ignore)]
    #[display("Parse Error: {_0}")]
    Parse(String),

    /// The design was decoded but failed validation.
    #[display("Invalid design:\n{_0}")]
    Design(ValidationErrors),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{Definition, ResourceDefinition};
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_conversion() {
        let io_err = Error::new(ErrorKind::Other, "test");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_parse_is_built_explicitly() {
        let app_err = AppError::Parse("design.yaml: bad indent".into());
        assert_eq!(app_err.to_string(), "Parse Error: design.yaml: bad indent");
    }

    #[test]
    fn test_design_conversion_renders_entries() {
        let resource = ResourceDefinition::new("bottles");
        let mut verr = ValidationErrors::new();
        verr.add(&resource, "something is off");
        let app_err: AppError = verr.into();
        assert_eq!(
            app_err.to_string(),
            format!("Invalid design:\n{}: something is off", resource.context())
        );
    }
}
