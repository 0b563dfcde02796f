#![deny(missing_docs)]

//! # Design Index
//!
//! Name lookup tables built from a finished [`ApiDefinition`] before it is
//! validated. Validation resolves every named reference (parent resources,
//! user types, media types) through the index and never modifies it.

use crate::design::definitions::{
    ApiDefinition, MediaTypeDefinition, ResourceDefinition, UserTypeDefinition,
};
use crate::design::types::{DataType, Object};
use std::collections::{HashMap, HashSet};

/// Resources, user types and media types by name.
///
/// When two entities share a name the first one declared is indexed; the
/// duplicates are listed by [`duplicate_resources`](Self::duplicate_resources)
/// and [`duplicate_types`](Self::duplicate_types).
#[derive(Debug, Default)]
pub struct DesignIndex<'a> {
    resources: HashMap<&'a str, &'a ResourceDefinition>,
    user_types: HashMap<&'a str, &'a UserTypeDefinition>,
    media_types: HashMap<&'a str, &'a MediaTypeDefinition>,
    duplicate_resources: Vec<&'a str>,
    duplicate_types: Vec<&'a str>,
}

impl<'a> DesignIndex<'a> {
    /// Indexes every named entity of `api`.
    pub fn build(api: &'a ApiDefinition) -> Self {
        let mut index = DesignIndex::default();
        for r in &api.resources {
            if index.resources.contains_key(r.name.as_str()) {
                index.duplicate_resources.push(&r.name);
            } else {
                index.resources.insert(&r.name, r);
            }
        }

        let mut type_names = HashSet::new();
        for t in &api.types {
            if !type_names.insert(t.type_name.as_str()) {
                index.duplicate_types.push(&t.type_name);
                continue;
            }
            index.user_types.insert(&t.type_name, t);
        }
        for mt in &api.media_types {
            if !type_names.insert(mt.name()) {
                index.duplicate_types.push(mt.name());
                continue;
            }
            index.media_types.insert(mt.name(), mt);
            index.user_types.insert(mt.name(), &mt.user_type);
        }
        index
    }

    /// Looks up a resource by name.
    pub fn resource(&self, name: &str) -> Option<&'a ResourceDefinition> {
        self.resources.get(name).copied()
    }

    /// Looks up a user type by name. Media types are user types too.
    pub fn user_type(&self, name: &str) -> Option<&'a UserTypeDefinition> {
        self.user_types.get(name).copied()
    }

    /// Looks up a media type by type name.
    pub fn media_type(&self, name: &str) -> Option<&'a MediaTypeDefinition> {
        self.media_types.get(name).copied()
    }

    /// Resource names declared more than once.
    pub fn duplicate_resources(&self) -> &[&'a str] {
        &self.duplicate_resources
    }

    /// Type names declared more than once, across user and media types.
    pub fn duplicate_types(&self) -> &[&'a str] {
        &self.duplicate_types
    }

    /// True when `data_type` references a type that is not indexed.
    pub fn is_unresolved(&self, data_type: &DataType) -> bool {
        match data_type {
            DataType::UserType(n) => self.user_type(n).is_none(),
            DataType::MediaType(n) => self.media_type(n).is_none(),
            _ => false,
        }
    }

    /// Follows named references from `data_type` to an inline object.
    ///
    /// Returns `None` for non-object types, unresolved names and reference
    /// chains that loop back on themselves.
    pub fn resolve_object(&self, data_type: &'a DataType) -> Option<&'a Object> {
        let mut seen = HashSet::new();
        let mut current = data_type;
        loop {
            match current {
                DataType::Object(o) => return Some(o),
                DataType::UserType(n) | DataType::MediaType(n) => {
                    if !seen.insert(n.as_str()) {
                        return None;
                    }
                    current = self.user_type(n)?.attribute.data_type.as_ref()?;
                }
                _ => return None,
            }
        }
    }

    /// Returns the chain of type names reached from `name` through plain
    /// aliases (types whose type is another named type) if it loops back to
    /// `name`.
    pub fn alias_cycle(&self, name: &str) -> Option<Vec<&'a str>> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = self.user_type(name)?;
        loop {
            let next = current.attribute.data_type.as_ref()?.reference()?;
            let (key, ut) = self.user_types.get_key_value(next)?;
            chain.push(*key);
            if next == name {
                return Some(chain);
            }
            if !seen.insert(next) {
                // Loops without passing through `name`; reported on its members.
                return None;
            }
            current = *ut;
        }
    }

    /// Returns the chain of resource names reached by following parents from
    /// `name` if it loops back to `name`.
    pub fn parent_cycle(&self, name: &str) -> Option<Vec<&'a str>> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = self.resource(name)?;
        loop {
            let parent = current.parent_name.as_deref()?;
            let (key, r) = self.resources.get_key_value(parent)?;
            chain.push(*key);
            if parent == name {
                return Some(chain);
            }
            if !seen.insert(parent) {
                return None;
            }
            current = *r;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::types::{AttributeDefinition, Primitive};

    fn api_with_types(types: Vec<UserTypeDefinition>) -> ApiDefinition {
        ApiDefinition {
            types,
            ..ApiDefinition::new("api")
        }
    }

    #[test]
    fn test_first_declaration_wins() {
        let mut api = ApiDefinition::new("api");
        let mut first = ResourceDefinition::new("bottles");
        first.base_path = "/first".into();
        api.resources.push(first);
        api.resources.push(ResourceDefinition::new("bottles"));
        let index = DesignIndex::build(&api);
        assert_eq!(index.resource("bottles").unwrap().base_path, "/first");
        assert_eq!(index.duplicate_resources(), &["bottles"]);
    }

    #[test]
    fn test_media_types_share_type_namespace() {
        let mut api = api_with_types(vec![UserTypeDefinition::new(
            "Bottle",
            AttributeDefinition::primitive(Primitive::String),
        )]);
        api.media_types.push(MediaTypeDefinition::new(
            "Bottle",
            "application/json",
            AttributeDefinition::primitive(Primitive::String),
        ));
        let index = DesignIndex::build(&api);
        assert!(index.media_type("Bottle").is_none());
        assert_eq!(index.duplicate_types(), &["Bottle"]);
    }

    #[test]
    fn test_resolve_object_through_aliases() {
        let api = api_with_types(vec![
            UserTypeDefinition::new("Alias", AttributeDefinition::user_type("Money")),
            UserTypeDefinition::new(
                "Money",
                AttributeDefinition::object([(
                    "amount",
                    AttributeDefinition::primitive(Primitive::Number),
                )]),
            ),
        ]);
        let index = DesignIndex::build(&api);
        let alias = DataType::UserType("Alias".into());
        let obj = index.resolve_object(&alias).unwrap();
        assert!(obj.contains_key("amount"));
    }

    #[test]
    fn test_alias_cycle_terminates() {
        let api = api_with_types(vec![
            UserTypeDefinition::new("A", AttributeDefinition::user_type("B")),
            UserTypeDefinition::new("B", AttributeDefinition::user_type("A")),
            UserTypeDefinition::new("C", AttributeDefinition::user_type("A")),
        ]);
        let index = DesignIndex::build(&api);
        assert_eq!(index.alias_cycle("A"), Some(vec!["B", "A"]));
        assert_eq!(index.alias_cycle("C"), None);
        assert!(index
            .resolve_object(&DataType::UserType("A".into()))
            .is_none());
    }

    #[test]
    fn test_parent_cycle() {
        let mut api = ApiDefinition::new("api");
        for (name, parent) in [("a", "b"), ("b", "a"), ("c", "a")] {
            let mut r = ResourceDefinition::new(name);
            r.parent_name = Some(parent.into());
            api.resources.push(r);
        }
        let index = DesignIndex::build(&api);
        assert_eq!(index.parent_cycle("a"), Some(vec!["b", "a"]));
        assert_eq!(index.parent_cycle("c"), None);
    }
}
