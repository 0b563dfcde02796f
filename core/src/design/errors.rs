#![deny(missing_docs)]

//! # Validation Errors
//!
//! Design-time findings. Each entry pairs a message with the locator of the
//! definition it was found on, so a report can point at the offending part of
//! the design.

use crate::design::definitions::Definition;
use serde::Serialize;
use std::fmt;

/// A single finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Locator of the owning definition.
    pub context: String,
    /// What is wrong.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.context, self.message)
    }
}

/// Ordered findings of a validation pass.
///
/// Entries are always leaves: [`add`](Self::add) records one message and
/// [`merge`](Self::merge) splices another set's entries in, so a set never
/// contains another set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    entries: Vec<ValidationError>,
}

/// Outcome of validating one definition.
pub type ValidationResult = Result<(), ValidationErrors>;

impl ValidationErrors {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` against `def`.
    pub fn add(&mut self, def: &dyn Definition, message: impl Into<String>) {
        self.entries.push(ValidationError {
            context: def.context(),
            message: message.into(),
        });
    }

    /// Appends all entries of `other`, keeping both orders.
    pub fn merge(&mut self, other: ValidationErrors) {
        self.entries.extend(other.entries);
    }

    /// Merges the errors of a child result, if any.
    pub fn merge_result(&mut self, result: ValidationResult) {
        if let Err(other) = result {
            self.merge(other);
        }
    }

    /// Entries in the order they were recorded.
    pub fn entries(&self) -> &[ValidationError] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `Ok` for an empty set, the set itself otherwise.
    pub fn into_result(self) -> ValidationResult {
        if self.entries.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// One `<context>: <message>` line per entry.
impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", entry)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
