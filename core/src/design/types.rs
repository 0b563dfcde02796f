#![deny(missing_docs)]

//! # Attribute Types
//!
//! The shape of every value in a design: a closed set of data types, the
//! attribute wrapping one, and the validation rules an attribute may carry.
//!
//! Named types are held by name and resolved through the
//! [`DesignIndex`](crate::design::DesignIndex), so a type graph is a tree and
//! never owns a cycle.

use crate::runtime::Format;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Object fields keyed by name, in declaration order.
pub type Object = IndexMap<String, AttributeDefinition>;

/// Built-in scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    /// `true` / `false`.
    Boolean,
    /// Signed integer.
    Integer,
    /// Floating point number.
    Number,
    /// UTF-8 string.
    String,
    /// RFC 3339 timestamp.
    DateTime,
    /// Any JSON value.
    Any,
}

impl Primitive {
    /// The name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Integer => "integer",
            Primitive::Number => "number",
            Primitive::String => "string",
            Primitive::DateTime => "datetime",
            Primitive::Any => "any",
        }
    }
}

/// The type of an attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    /// A scalar.
    Primitive(Primitive),
    /// A list of values of the element attribute's type.
    Array(Box<AttributeDefinition>),
    /// A set of named fields.
    Object(Object),
    /// Reference to a user type by name.
    UserType(String),
    /// Reference to a media type by type name.
    MediaType(String),
}

impl DataType {
    /// Short description of the variant used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            DataType::Primitive(p) => p.name(),
            DataType::Array(_) => "array",
            DataType::Object(_) => "object",
            DataType::UserType(_) => "user type",
            DataType::MediaType(_) => "media type",
        }
    }

    /// Returns the fields when the type is an inline object.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            DataType::Object(o) => Some(o),
            _ => None,
        }
    }

    /// True for an inline object.
    pub fn is_object(&self) -> bool {
        matches!(self, DataType::Object(_))
    }

    /// Returns the referenced type name for user and media type references.
    pub fn reference(&self) -> Option<&str> {
        match self {
            DataType::UserType(n) | DataType::MediaType(n) => Some(n),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reference() {
            Some(name) => write!(f, "{} {:?}", self.kind_name(), name),
            None => f.write_str(self.kind_name()),
        }
    }
}

/// A rule constraining the values of an attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationDefinition {
    /// Fields of an object that must be present.
    Required(Vec<String>),
    /// The only allowed values.
    Enum(Vec<serde_json::Value>),
    /// Declared string format.
    Format(Format),
    /// Regular expression strings must match.
    Pattern(String),
    /// Inclusive lower bound.
    Minimum(f64),
    /// Inclusive upper bound.
    Maximum(f64),
    /// Minimum string or collection length.
    MinLength(usize),
    /// Maximum string or collection length.
    MaxLength(usize),
}

/// One typed, possibly nested value of a design.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    /// The attribute type. Left unset only by broken designs.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<DataType>,
    /// Free form documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Rules constraining the values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validations: Vec<ValidationDefinition>,
    /// View used to render the attribute when its type is a media type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
}

impl AttributeDefinition {
    /// Creates an attribute of the given type.
    pub fn new(data_type: DataType) -> Self {
        Self {
            data_type: Some(data_type),
            ..Self::default()
        }
    }

    /// Creates a scalar attribute.
    pub fn primitive(p: Primitive) -> Self {
        Self::new(DataType::Primitive(p))
    }

    /// Creates an array attribute.
    pub fn array(elem: AttributeDefinition) -> Self {
        Self::new(DataType::Array(Box::new(elem)))
    }

    /// Creates an object attribute from `(name, attribute)` pairs.
    pub fn object<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, AttributeDefinition)>,
        S: Into<String>,
    {
        Self::new(DataType::Object(
            fields.into_iter().map(|(n, a)| (n.into(), a)).collect(),
        ))
    }

    /// Creates an attribute referencing a media type.
    pub fn media_type(name: impl Into<String>) -> Self {
        Self::new(DataType::MediaType(name.into()))
    }

    /// Creates an attribute referencing a user type.
    pub fn user_type(name: impl Into<String>) -> Self {
        Self::new(DataType::UserType(name.into()))
    }

    /// Adds a validation rule.
    pub fn with_validation(mut self, validation: ValidationDefinition) -> Self {
        self.validations.push(validation);
        self
    }

    /// Sets the rendering view.
    pub fn with_view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }

    /// Returns the fields when the attribute is an inline object.
    pub fn as_object(&self) -> Option<&Object> {
        self.data_type.as_ref().and_then(DataType::as_object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_shape_of_nested_attribute() {
        let yaml = r#"
type:
  object:
    id:
      type: {primitive: integer}
    tags:
      type:
        array:
          type: {primitive: string}
    owner:
      type: {media_type: User}
      view: tiny
validations:
  - required: [id]
"#;
        let attr: AttributeDefinition = serde_yaml::from_str(yaml).unwrap();
        let fields = attr.as_object().unwrap();
        assert_eq!(
            fields.keys().collect::<Vec<_>>(),
            vec!["id", "tags", "owner"]
        );
        assert_eq!(
            fields["owner"].data_type,
            Some(DataType::MediaType("User".into()))
        );
        assert_eq!(fields["owner"].view.as_deref(), Some("tiny"));
        assert_eq!(
            attr.validations,
            vec![ValidationDefinition::Required(vec!["id".into()])]
        );
    }

    #[test]
    fn test_missing_type_deserializes_as_none() {
        let attr: AttributeDefinition = serde_yaml::from_str("description: nothing").unwrap();
        assert!(attr.data_type.is_none());
    }

    #[test]
    fn test_display_names_references() {
        assert_eq!(DataType::UserType("Money".into()).to_string(), r#"user type "Money""#);
        assert_eq!(DataType::Primitive(Primitive::String).to_string(), "string");
    }
}
