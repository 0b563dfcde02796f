#![deny(missing_docs)]

//! # Design Definitions
//!
//! The design graph: an API root owning resources, reusable types,
//! media types and response templates.
//!
//! Owners hold their children directly. Back-references (action to resource,
//! route to action, view and link to media type) are kept as owner names so
//! that a broken design can still be represented and reported on;
//! [`ApiDefinition::attach_parents`] fills the ones a loader left unset.

use crate::design::types::{AttributeDefinition, DataType, Primitive};
use serde::{Deserialize, Serialize};

/// Identifier given to media types that declare none.
pub const DEFAULT_MEDIA_TYPE_IDENTIFIER: &str = "plain/text";

const DEFAULT_LINK_VIEW: &str = "link";

/// Anything that can own a validation error.
pub trait Definition {
    /// Human readable locator, e.g. `action "show" of resource "bottles"`.
    fn context(&self) -> String;
}

/// The whole API design.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiDefinition {
    /// API name.
    pub name: String,
    /// Short title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Free form documentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Path prefix shared by every resource.
    pub base_path: String,
    /// Parameters captured by `base_path`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_params: Option<AttributeDefinition>,
    /// Resources, in declaration order.
    pub resources: Vec<ResourceDefinition>,
    /// Media types, in declaration order.
    pub media_types: Vec<MediaTypeDefinition>,
    /// Reusable user types, in declaration order.
    pub types: Vec<UserTypeDefinition>,
    /// Reusable response templates.
    pub responses: Vec<ResponseDefinition>,
}

impl ApiDefinition {
    /// Creates an empty design.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets every unset back-reference to the entity that owns it.
    pub fn attach_parents(&mut self) {
        for resource in &mut self.resources {
            for action in &mut resource.actions {
                action.parent.get_or_insert_with(|| resource.name.clone());
                for route in &mut action.routes {
                    route.parent.get_or_insert_with(|| action.name.clone());
                }
            }
        }
        for mt in &mut self.media_types {
            let name = mt.user_type.type_name.clone();
            for view in &mut mt.views {
                view.parent.get_or_insert_with(|| name.clone());
            }
            for link in &mut mt.links {
                link.parent.get_or_insert_with(|| name.clone());
            }
        }
    }

    /// Fills the identifier and type of every media type that lacks them.
    /// Returns how many media types changed.
    pub fn apply_media_type_defaults(&mut self) -> usize {
        self.media_types
            .iter_mut()
            .map(MediaTypeDefinition::apply_defaults)
            .filter(|changed| *changed)
            .count()
    }
}

impl Definition for ApiDefinition {
    fn context(&self) -> String {
        format!("API {:?}", self.name)
    }
}

/// A collection of actions served under a common path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceDefinition {
    /// Resource name, unique within the API.
    pub name: String,
    /// Free form documentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Path prefix of the resource actions, may contain `{var}` placeholders.
    pub base_path: String,
    /// Parameters captured by `base_path`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_params: Option<AttributeDefinition>,
    /// Parameters shared by all actions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<AttributeDefinition>,
    /// Name of the representative action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_action_name: Option<String>,
    /// Name of the parent resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
    /// Actions, in declaration order.
    pub actions: Vec<ActionDefinition>,
    /// Responses shared by all actions.
    pub responses: Vec<ResponseDefinition>,
}

impl ResourceDefinition {
    /// Creates an empty resource.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Definition for ResourceDefinition {
    fn context(&self) -> String {
        format!("resource {:?}", self.name)
    }
}

/// One operation of a resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionDefinition {
    /// Action name, unique within its resource.
    pub name: String,
    /// Free form documentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Name of the owning resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// HTTP routes serving the action.
    pub routes: Vec<RouteDefinition>,
    /// Path and query string parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<AttributeDefinition>,
    /// Request body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<AttributeDefinition>,
    /// Request headers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<AttributeDefinition>,
    /// Possible outcomes.
    pub responses: Vec<ResponseDefinition>,
}

impl ActionDefinition {
    /// Creates an action without routes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a route.
    pub fn with_route(mut self, route: RouteDefinition) -> Self {
        self.routes.push(route);
        self
    }

    /// Adds a response.
    pub fn with_response(mut self, response: ResponseDefinition) -> Self {
        self.responses.push(response);
        self
    }
}

impl Definition for ActionDefinition {
    fn context(&self) -> String {
        match &self.parent {
            Some(resource) => format!("action {:?} of resource {:?}", self.name, resource),
            None => format!("action {:?}", self.name),
        }
    }
}

/// One HTTP method and path serving an action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteDefinition {
    /// HTTP method, e.g. `GET`.
    pub verb: String,
    /// Path relative to the resource base path.
    pub path: String,
    /// Name of the owning action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl RouteDefinition {
    /// Creates a route with no parent set.
    pub fn new(verb: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            path: path.into(),
            parent: None,
        }
    }
}

impl Definition for RouteDefinition {
    fn context(&self) -> String {
        match &self.parent {
            Some(action) => format!("route {} {:?} of action {:?}", self.verb, self.path, action),
            None => format!("route {} {:?}", self.verb, self.path),
        }
    }
}

/// One possible outcome of an action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseDefinition {
    /// Response name, e.g. `NotFound`.
    pub name: String,
    /// HTTP status code. Zero means unset.
    pub status: u16,
    /// Free form documentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Response headers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<AttributeDefinition>,
}

impl ResponseDefinition {
    /// Creates a response without headers.
    pub fn new(name: impl Into<String>, status: u16) -> Self {
        Self {
            name: name.into(),
            status,
            ..Self::default()
        }
    }
}

impl Definition for ResponseDefinition {
    fn context(&self) -> String {
        if self.name.is_empty() {
            format!("response {}", self.status)
        } else {
            format!("response {:?}", self.name)
        }
    }
}

/// A named, reusable attribute shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserTypeDefinition {
    /// Type name, unique within the API.
    #[serde(rename = "name", default)]
    pub type_name: String,
    /// The underlying attribute.
    #[serde(flatten)]
    pub attribute: AttributeDefinition,
}

impl UserTypeDefinition {
    /// Creates a user type.
    pub fn new(type_name: impl Into<String>, attribute: AttributeDefinition) -> Self {
        Self {
            type_name: type_name.into(),
            attribute,
        }
    }
}

impl Definition for UserTypeDefinition {
    fn context(&self) -> String {
        format!("user type {:?}", self.type_name)
    }
}

/// A user type with a MIME identifier, rendering views and links.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaTypeDefinition {
    /// Name and underlying attribute.
    #[serde(flatten)]
    pub user_type: UserTypeDefinition,
    /// MIME identifier, e.g. `application/vnd.bottle+json`.
    #[serde(default)]
    pub identifier: String,
    /// Rendering views.
    #[serde(default)]
    pub views: Vec<ViewDefinition>,
    /// Links to other media types.
    #[serde(default)]
    pub links: Vec<LinkDefinition>,
}

impl MediaTypeDefinition {
    /// Creates a media type with no views or links.
    pub fn new(
        type_name: impl Into<String>,
        identifier: impl Into<String>,
        attribute: AttributeDefinition,
    ) -> Self {
        Self {
            user_type: UserTypeDefinition::new(type_name, attribute),
            identifier: identifier.into(),
            views: Vec::new(),
            links: Vec::new(),
        }
    }

    /// The media type name.
    pub fn name(&self) -> &str {
        &self.user_type.type_name
    }

    /// The underlying type, if any.
    pub fn data_type(&self) -> Option<&DataType> {
        self.user_type.attribute.data_type.as_ref()
    }

    /// Looks up a view by name.
    pub fn view(&self, name: &str) -> Option<&ViewDefinition> {
        self.views.iter().find(|v| v.name == name)
    }

    /// Adds a view owned by this media type.
    pub fn with_view(mut self, name: impl Into<String>, attribute: AttributeDefinition) -> Self {
        let parent = self.user_type.type_name.clone();
        self.views.push(ViewDefinition {
            name: name.into(),
            parent: Some(parent),
            attribute,
        });
        self
    }

    /// Adds a link owned by this media type.
    pub fn with_link(mut self, name: impl Into<String>, view: impl Into<String>) -> Self {
        let parent = self.user_type.type_name.clone();
        self.links.push(LinkDefinition {
            name: name.into(),
            view: view.into(),
            parent: Some(parent),
        });
        self
    }

    /// Sets the identifier and the underlying type when they are missing.
    ///
    /// Idempotent: a second call finds both set and changes nothing. Returns
    /// whether anything was filled in.
    pub fn apply_defaults(&mut self) -> bool {
        let mut changed = false;
        if self.identifier.is_empty() {
            self.identifier = DEFAULT_MEDIA_TYPE_IDENTIFIER.to_string();
            changed = true;
        }
        if self.user_type.attribute.data_type.is_none() {
            self.user_type.attribute.data_type = Some(DataType::Primitive(Primitive::String));
            changed = true;
        }
        if changed {
            tracing::debug!(media_type = %self.name(), "applied media type defaults");
        }
        changed
    }
}

impl Definition for MediaTypeDefinition {
    fn context(&self) -> String {
        if self.name().is_empty() {
            format!("media type {:?}", self.identifier)
        } else {
            format!("media type {:?}", self.name())
        }
    }
}

/// A named rendering of a media type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewDefinition {
    /// View name, e.g. `default`.
    #[serde(default)]
    pub name: String,
    /// Name of the owning media type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Fields rendered by the view.
    #[serde(flatten)]
    pub attribute: AttributeDefinition,
}

impl Definition for ViewDefinition {
    fn context(&self) -> String {
        match &self.parent {
            Some(mt) => format!("view {:?} of media type {:?}", self.name, mt),
            None => format!("view {:?}", self.name),
        }
    }
}

/// A relation from an attribute of a media type to a view of the attribute's
/// own media type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkDefinition {
    /// Name of the linked attribute.
    #[serde(default)]
    pub name: String,
    /// View of the target media type used to render the link.
    #[serde(default = "default_link_view")]
    pub view: String,
    /// Name of the owning media type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl Default for LinkDefinition {
    fn default() -> Self {
        Self {
            name: String::new(),
            view: default_link_view(),
            parent: None,
        }
    }
}

fn default_link_view() -> String {
    DEFAULT_LINK_VIEW.to_string()
}

impl Definition for LinkDefinition {
    fn context(&self) -> String {
        match &self.parent {
            Some(mt) => format!("link {:?} of media type {:?}", self.name, mt),
            None => format!("link {:?}", self.name),
        }
    }
}
