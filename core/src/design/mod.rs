#![deny(missing_docs)]

//! # API Design Model and Validation
//!
//! - **types**: attribute types and validation rules.
//! - **definitions**: the design graph (API, resources, actions, ...).
//! - **index**: name lookup tables used to resolve references.
//! - **errors**: the ordered set of design-time findings.
//! - **mime**: media type identifier parsing.
//! - **validation**: the recursive consistency checks.

pub mod definitions;
pub mod errors;
pub mod index;
pub mod mime;
pub mod types;
pub mod validation;

pub use definitions::{
    ActionDefinition, ApiDefinition, Definition, LinkDefinition, MediaTypeDefinition,
    ResourceDefinition, ResponseDefinition, RouteDefinition, UserTypeDefinition, ViewDefinition,
    DEFAULT_MEDIA_TYPE_IDENTIFIER,
};
pub use errors::{ValidationError, ValidationErrors, ValidationResult};
pub use index::DesignIndex;
pub use mime::{parse_media_type, MediaType, MediaTypeError};
pub use types::{AttributeDefinition, DataType, Object, Primitive, ValidationDefinition};
pub use validation::{extract_path_params, validate_api, Validator};
