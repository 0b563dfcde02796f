#![deny(missing_docs)]

//! # Design Validation
//!
//! Walks a design from the API root down to every reachable attribute and
//! checks that it is internally consistent before code is generated from it.
//!
//! Validation never stops at the first problem. Each routine records the
//! violations local to its definition, then the unresolved cross-references,
//! then merges in the results of its children, so one pass reports every
//! problem in declaration order.
//!
//! Additional validations include:
//! - Resource and type names must be unique.
//! - Resource parent chains and type alias chains must be acyclic.
//! - Back-references must point at the owning definition.
//! - Route verbs must be HTTP methods.
//! - `Pattern` rules must compile; bounds must not be inverted.
//! - View fields must exist on the parent media type.

use crate::design::definitions::{
    ActionDefinition, ApiDefinition, Definition, LinkDefinition, MediaTypeDefinition,
    ResourceDefinition, ResponseDefinition, RouteDefinition, UserTypeDefinition, ViewDefinition,
};
use crate::design::errors::{ValidationErrors, ValidationResult};
use crate::design::index::DesignIndex;
use crate::design::mime::parse_media_type;
use crate::design::types::{AttributeDefinition, DataType, Object, ValidationDefinition};
use regex::Regex;

const PATH_PARAM_PATTERN: &str = r"\{([^}]+)}";
const HTTP_VERBS: [&str; 9] = [
    "GET", "HEAD", "POST", "PUT", "DELETE", "PATCH", "OPTIONS", "TRACE", "CONNECT",
];

/// Validates a whole design.
///
/// Media types missing an identifier or a type get their defaults first;
/// that is the only change made to `api`. Everything else is read through a
/// [`DesignIndex`] built once the defaults are in place.
pub fn validate_api(api: &mut ApiDefinition) -> ValidationResult {
    let defaulted = api.apply_media_type_defaults();
    let api: &ApiDefinition = api;
    tracing::debug!(
        api = %api.name,
        resources = api.resources.len(),
        media_types = api.media_types.len(),
        types = api.types.len(),
        defaulted,
        "validating design"
    );

    let index = DesignIndex::build(api);
    let result = Validator::new(&index).validate_api(api);

    match &result {
        Ok(()) => tracing::debug!(api = %api.name, "design is valid"),
        Err(verr) => tracing::debug!(api = %api.name, errors = verr.len(), "design is invalid"),
    }
    result
}

/// Extracts the `{name}` placeholders of a path, in order.
pub fn extract_path_params(path: &str) -> Vec<String> {
    let re = Regex::new(PATH_PARAM_PATTERN).expect("Invalid regex constant");
    re.captures_iter(path).map(|c| c[1].to_string()).collect()
}

/// Joins a context path and the next part with ` - `.
fn join(ctx: &str, part: &str) -> String {
    if ctx.is_empty() {
        part.to_string()
    } else {
        format!("{} - {}", ctx, part)
    }
}

/// Formats `a, b and c`.
fn and_list(items: &[String]) -> String {
    match items.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, init)) => format!("{} and {}", init.join(", "), last),
    }
}

/// Indices `(i, j)`, `i < j`, of items sharing a key.
fn duplicate_pairs<T, K: PartialEq>(items: &[T], key: impl Fn(&T) -> K) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..items.len() {
        for j in (i + 1)..items.len() {
            if key(&items[i]) == key(&items[j]) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Checks designs against the names collected in a [`DesignIndex`].
pub struct Validator<'i, 'a> {
    index: &'i DesignIndex<'a>,
}

impl<'i, 'a> Validator<'i, 'a> {
    /// Creates a validator resolving names through `index`.
    pub fn new(index: &'i DesignIndex<'a>) -> Self {
        Self { index }
    }

    /// Validates the API root and everything it owns.
    pub fn validate_api(&self, api: &ApiDefinition) -> ValidationResult {
        let mut verr = ValidationErrors::new();
        if api.name.is_empty() {
            verr.add(api, "API name cannot be empty");
        }
        for name in self.index.duplicate_resources() {
            verr.add(api, format!("duplicate resource name {:?}", name));
        }
        for name in self.index.duplicate_types() {
            verr.add(api, format!("duplicate type name {:?}", name));
        }

        if let Some(base_params) = &api.base_params {
            verr.merge_result(self.validate_attribute(base_params, "base parameters", api));
        }
        for r in &api.resources {
            verr.merge_result(self.validate_resource(r));
        }
        for mt in &api.media_types {
            verr.merge_result(self.validate_media_type(mt));
        }
        for t in &api.types {
            verr.merge_result(self.validate_user_type(t));
        }
        for resp in &api.responses {
            verr.merge_result(self.validate_response(resp));
        }
        verr.into_result()
    }

    /// Validates a resource: its name, canonical action, base path variables
    /// and parent, then its actions, responses and parameters.
    pub fn validate_resource(&self, r: &ResourceDefinition) -> ValidationResult {
        tracing::trace!(resource = %r.name, "validating resource");
        let mut verr = ValidationErrors::new();
        if r.name.is_empty() {
            verr.add(r, "Resource name cannot be empty");
        }
        for (_, j) in duplicate_pairs(&r.actions, |a| a.name.clone()) {
            verr.add(r, format!("duplicate action name {:?}", r.actions[j].name));
        }

        if let Some(canonical) = &r.canonical_action_name {
            if !r.actions.iter().any(|a| &a.name == canonical) {
                verr.add(r, format!("unknown canonical action {:?}", canonical));
            }
        }
        self.check_base_params(r, &mut verr);
        if let Some(parent) = &r.parent_name {
            if self.index.resource(parent).is_none() {
                verr.add(r, format!("Parent resource named {:?} not found", parent));
            } else if let Some(chain) = self.index.parent_cycle(&r.name) {
                verr.add(
                    r,
                    format!(
                        "parent chain of resource {:?} contains a cycle: {} -> {}",
                        r.name,
                        r.name,
                        chain.join(" -> ")
                    ),
                );
            }
        }

        for a in &r.actions {
            verr.merge_result(self.validate_action(a, r));
        }
        for resp in &r.responses {
            verr.merge_result(self.validate_response(resp));
        }
        if let Some(params) = &r.params {
            verr.merge_result(self.validate_attribute(params, "resource parameters", r));
        }
        if let Some(base_params) = &r.base_params {
            verr.merge_result(self.validate_attribute(base_params, "base parameters", r));
        }
        verr.into_result()
    }

    /// The `{var}` placeholders of the base path must match the base
    /// parameter fields one to one.
    fn check_base_params(&self, r: &ResourceDefinition, verr: &mut ValidationErrors) {
        let vars = extract_path_params(&r.base_path);
        let Some(base_params) = &r.base_params else {
            if !vars.is_empty() {
                verr.add(
                    r,
                    format!(
                        "BasePath uses variables {} but no BaseParams are defined",
                        and_list(&vars)
                    ),
                );
            }
            return;
        };
        let Some(params) = base_params.as_object() else {
            verr.add(r, "invalid type for BaseParams, must be an Object");
            return;
        };

        if vars.is_empty() {
            if !params.is_empty() {
                verr.add(r, "BasePath does not use variables defined in BaseParams");
            }
            return;
        }

        let mut all_found = true;
        for v in &vars {
            if !params.contains_key(v) {
                all_found = false;
                verr.add(
                    r,
                    format!(
                        "Variable {} from base path {} does not match any parameter from BaseParams",
                        v, r.base_path
                    ),
                );
            }
        }
        if all_found && vars.len() != params.len() {
            verr.add(
                r,
                format!(
                    "BasePath defines parameters {} but BaseParams has {} elements",
                    and_list(&vars),
                    params.len()
                ),
            );
            return;
        }
        // Repeated variables can balance the count and still leave fields unused.
        for n in params.keys() {
            if !vars.contains(n) {
                verr.add(
                    r,
                    format!(
                        "BaseParams field {} is not used by base path {}",
                        n, r.base_path
                    ),
                );
            }
        }
    }

    /// Validates an action owned by `owner`.
    pub fn validate_action(
        &self,
        a: &ActionDefinition,
        owner: &ResourceDefinition,
    ) -> ValidationResult {
        let mut verr = ValidationErrors::new();
        if a.name.is_empty() {
            verr.add(a, "Action name cannot be empty");
        }
        if a.routes.is_empty() {
            verr.add(a, "No route defined for action");
        }
        match &a.parent {
            None => verr.add(a, "missing parent resource"),
            Some(parent) if parent != &owner.name => verr.add(
                a,
                format!(
                    "parent resource {:?} does not match owning resource {:?}",
                    parent, owner.name
                ),
            ),
            Some(_) => {}
        }
        for (_, j) in duplicate_pairs(&a.responses, |resp| resp.status) {
            let resp = &a.responses[j];
            if resp.status != 0 {
                verr.add(
                    resp,
                    format!(
                        "Multiple response definitions with status code {}",
                        resp.status
                    ),
                );
            }
        }

        for route in &a.routes {
            verr.merge_result(self.validate_route(route, a));
        }
        for resp in &a.responses {
            verr.merge_result(self.validate_response(resp));
        }
        verr.merge_result(self.validate_params(a));
        if let Some(payload) = &a.payload {
            verr.merge_result(self.validate_attribute(payload, "action payload", a));
        }
        if let Some(headers) = &a.headers {
            verr.merge_result(self.validate_attribute(headers, "action headers", a));
        }
        verr.into_result()
    }

    /// Action parameters must be an object whose fields are not objects.
    pub fn validate_params(&self, a: &ActionDefinition) -> ValidationResult {
        let mut verr = ValidationErrors::new();
        let Some(params) = &a.params else {
            return Ok(());
        };
        let Some(fields) = params.as_object() else {
            verr.add(a, r#""Params" field of action is not an object"#);
            return verr.into_result();
        };

        for (n, p) in fields {
            if n.is_empty() {
                verr.add(a, "action has parameter with no name");
            }
            match &p.data_type {
                None => {
                    verr.add(a, format!("type of parameter {} cannot be nil", n));
                    continue;
                }
                // Named types count as objects when they resolve to one.
                Some(dt) if self.object_of(dt).is_some() => verr.add(
                    a,
                    format!(
                        "parameter {} cannot be an object, only action payloads may be of type object",
                        n
                    ),
                ),
                Some(_) => {}
            }
            let ctx = format!("parameter {}", n);
            verr.merge_result(self.validate_attribute(p, &ctx, a));
        }
        verr.into_result()
    }

    /// Validates a route served by `owner`.
    pub fn validate_route(
        &self,
        route: &RouteDefinition,
        owner: &ActionDefinition,
    ) -> ValidationResult {
        let mut verr = ValidationErrors::new();
        match &route.parent {
            None => verr.add(route, "missing route parent action"),
            Some(parent) if parent != &owner.name => verr.add(
                route,
                format!(
                    "parent action {:?} does not match owning action {:?}",
                    parent, owner.name
                ),
            ),
            Some(_) => {}
        }
        if !HTTP_VERBS.contains(&route.verb.as_str()) {
            verr.add(route, format!("unknown HTTP verb {:?}", route.verb));
        }
        if route.path.is_empty() {
            verr.add(route, "route path cannot be empty");
        }
        verr.into_result()
    }

    /// A response needs a status; its headers must validate.
    pub fn validate_response(&self, resp: &ResponseDefinition) -> ValidationResult {
        let mut verr = ValidationErrors::new();
        if resp.status == 0 {
            verr.add(resp, "response status not defined");
        }
        if let Some(headers) = &resp.headers {
            verr.merge_result(self.validate_attribute(headers, "response headers", resp));
        }
        verr.into_result()
    }

    /// Validates an attribute and everything nested in it.
    ///
    /// Attributes do not know where they live: `ctx` describes the path to
    /// the attribute and errors are recorded against `owner`.
    pub fn validate_attribute(
        &self,
        att: &AttributeDefinition,
        ctx: &str,
        owner: &dyn Definition,
    ) -> ValidationResult {
        let mut verr = ValidationErrors::new();
        let Some(data_type) = &att.data_type else {
            verr.add(owner, join(ctx, "attribute type is nil"));
            return verr.into_result();
        };

        self.check_rules(att, data_type, ctx, owner, &mut verr);
        match data_type {
            DataType::UserType(n) if self.index.user_type(n).is_none() => {
                verr.add(owner, join(ctx, &format!("unknown user type {:?}", n)));
            }
            DataType::MediaType(n) if self.index.media_type(n).is_none() => {
                verr.add(owner, join(ctx, &format!("unknown media type {:?}", n)));
            }
            _ => {}
        }

        match data_type {
            DataType::Object(fields) => {
                for (n, field) in fields {
                    let field_ctx = join(ctx, &format!("field {}", n));
                    verr.merge_result(self.validate_attribute(field, &field_ctx, owner));
                }
            }
            DataType::Array(elem) => {
                let elem_ctx = join(ctx, "array element");
                verr.merge_result(self.validate_attribute(elem, &elem_ctx, owner));
            }
            DataType::Primitive(_) | DataType::UserType(_) | DataType::MediaType(_) => {}
        }
        verr.into_result()
    }

    fn check_rules(
        &self,
        att: &AttributeDefinition,
        data_type: &DataType,
        ctx: &str,
        owner: &dyn Definition,
        verr: &mut ValidationErrors,
    ) {
        let (mut min, mut max) = (None, None);
        let (mut min_len, mut max_len) = (None, None);
        for rule in &att.validations {
            match rule {
                ValidationDefinition::Required(names) => {
                    // Named types count as objects when they resolve to one.
                    let Some(fields) = self.object_of(data_type) else {
                        verr.add(
                            owner,
                            join(ctx, r#"only objects may define a "Required" validation"#),
                        );
                        continue;
                    };
                    for n in names {
                        if !fields.contains_key(n) {
                            verr.add(
                                owner,
                                join(ctx, &format!("required field {:?} does not exist", n)),
                            );
                        }
                    }
                }
                ValidationDefinition::Enum(values) if values.is_empty() => {
                    verr.add(owner, join(ctx, "enum validation must list at least one value"));
                }
                ValidationDefinition::Pattern(p) => {
                    if let Err(e) = Regex::new(p) {
                        verr.add(owner, join(ctx, &format!("invalid pattern {:?}: {}", p, e)));
                    }
                }
                ValidationDefinition::Minimum(v) => min = Some(*v),
                ValidationDefinition::Maximum(v) => max = Some(*v),
                ValidationDefinition::MinLength(v) => min_len = Some(*v),
                ValidationDefinition::MaxLength(v) => max_len = Some(*v),
                ValidationDefinition::Enum(_) | ValidationDefinition::Format(_) => {}
            }
        }
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                verr.add(
                    owner,
                    join(ctx, &format!("minimum {} is greater than maximum {}", min, max)),
                );
            }
        }
        if let (Some(min), Some(max)) = (min_len, max_len) {
            if min > max {
                verr.add(
                    owner,
                    join(
                        ctx,
                        &format!("minimum length {} is greater than maximum length {}", min, max),
                    ),
                );
            }
        }
    }

    /// The inline object of `data_type`, following named types.
    fn object_of<'t>(&self, data_type: &'t DataType) -> Option<&'t Object>
    where
        'a: 't,
    {
        match data_type {
            DataType::Object(o) => Some(o),
            DataType::UserType(n) | DataType::MediaType(n) => {
                let target = self.index.user_type(n)?.attribute.data_type.as_ref()?;
                self.index.resolve_object(target)
            }
            _ => None,
        }
    }

    /// The object rendered by a media type: its own object, or the object of
    /// its elements for collections.
    fn rendered_object<'t>(&self, mt: &'t MediaTypeDefinition) -> Option<&'t Object>
    where
        'a: 't,
    {
        match mt.data_type()? {
            DataType::Array(elem) => self.object_of(elem.data_type.as_ref()?),
            other => self.object_of(other),
        }
    }

    /// Validates a user type.
    pub fn validate_user_type(&self, t: &UserTypeDefinition) -> ValidationResult {
        self.validate_named_type(t, t)
    }

    fn validate_named_type(
        &self,
        t: &UserTypeDefinition,
        owner: &dyn Definition,
    ) -> ValidationResult {
        let mut verr = ValidationErrors::new();
        if t.type_name.is_empty() {
            verr.add(owner, "User type must have a name");
        } else if let Some(chain) = self.index.alias_cycle(&t.type_name) {
            verr.add(
                owner,
                format!(
                    "type {:?} is defined in terms of itself: {} -> {}",
                    t.type_name,
                    t.type_name,
                    chain.join(" -> ")
                ),
            );
        }
        verr.merge_result(self.validate_attribute(&t.attribute, "", owner));
        verr.into_result()
    }

    /// Validates a media type, its views and its links.
    ///
    /// Expects defaults to be applied already, see [`validate_api`].
    pub fn validate_media_type(&self, mt: &MediaTypeDefinition) -> ValidationResult {
        tracing::trace!(media_type = %mt.name(), "validating media type");
        let mut verr = ValidationErrors::new();
        if !mt.identifier.is_empty() {
            if let Err(e) = parse_media_type(&mt.identifier) {
                verr.add(mt, format!("invalid media type identifier: {}", e));
            }
        }
        for (_, j) in duplicate_pairs(&mt.views, |v| v.name.clone()) {
            verr.add(mt, format!("duplicate view name {:?}", mt.views[j].name));
        }

        if let Some(fields) = self.rendered_object(mt) {
            self.check_rendered_views(mt, fields, &mut verr);
        }

        verr.merge_result(self.validate_named_type(&mt.user_type, mt));
        for v in &mt.views {
            verr.merge_result(self.validate_view(v, mt));
        }
        for l in &mt.links {
            verr.merge_result(self.validate_link(l, mt));
        }
        verr.into_result()
    }

    /// Attributes that name a rendering view must be media types (or
    /// collections of them) defining that view.
    fn check_rendered_views(
        &self,
        mt: &MediaTypeDefinition,
        fields: &Object,
        verr: &mut ValidationErrors,
    ) {
        for (n, att) in fields {
            let Some(view) = &att.view else {
                continue;
            };
            let target = match &att.data_type {
                Some(DataType::MediaType(name)) => Some(name),
                Some(DataType::Array(elem)) => match &elem.data_type {
                    Some(DataType::MediaType(name)) => Some(name),
                    _ => None,
                },
                _ => None,
            };
            let Some(target) = target else {
                verr.add(
                    mt,
                    format!(
                        "attribute {} of media type defines a view for rendering but its type is not a media type",
                        n
                    ),
                );
                continue;
            };
            // Unknown media types are reported by attribute validation.
            if let Some(target) = self.index.media_type(target) {
                if target.view(view).is_none() {
                    verr.add(
                        mt,
                        format!("attribute {} of media type uses unknown view {:?}", n, view),
                    );
                }
            }
        }
    }

    /// Validates a view of `owner`.
    pub fn validate_view(
        &self,
        v: &ViewDefinition,
        owner: &MediaTypeDefinition,
    ) -> ValidationResult {
        let mut verr = ValidationErrors::new();
        match &v.parent {
            None => verr.add(v, "View must have a parent media type"),
            Some(parent) if parent != owner.name() => verr.add(
                v,
                format!(
                    "parent media type {:?} does not match owning media type {:?}",
                    parent,
                    owner.name()
                ),
            ),
            Some(_) => {}
        }
        if let (Some(view_fields), Some(fields)) =
            (v.attribute.as_object(), self.rendered_object(owner))
        {
            for n in view_fields.keys() {
                if !fields.contains_key(n) {
                    verr.add(
                        v,
                        format!("view attribute {:?} is not defined on parent media type", n),
                    );
                }
            }
        }
        verr.merge_result(self.validate_attribute(&v.attribute, "", v));
        verr.into_result()
    }

    /// Validates a link of `owner`.
    pub fn validate_link(
        &self,
        l: &LinkDefinition,
        owner: &MediaTypeDefinition,
    ) -> ValidationResult {
        let mut verr = ValidationErrors::new();
        if l.name.is_empty() {
            verr.add(l, "Links must have a name");
        }
        match &l.parent {
            None => verr.add(l, "Link must have a parent media type"),
            Some(parent) if parent != owner.name() => verr.add(
                l,
                format!(
                    "parent media type {:?} does not match owning media type {:?}",
                    parent,
                    owner.name()
                ),
            ),
            Some(_) => {}
        }

        let Some(fields) = owner.data_type().and_then(|dt| self.object_of(dt)) else {
            verr.add(l, "Link parent media type must be an Object");
            return verr.into_result();
        };
        let Some(att) = fields.get(&l.name) else {
            verr.add(
                l,
                "Link name must match one of the parent media type attribute names",
            );
            return verr.into_result();
        };
        match &att.data_type {
            Some(DataType::MediaType(target)) => {
                if let Some(target) = self.index.media_type(target) {
                    if target.view(&l.view).is_none() {
                        verr.add(
                            l,
                            format!(
                                "view {:?} does not exist on target media type {:?}",
                                l.view, target.identifier
                            ),
                        );
                    }
                }
            }
            _ => verr.add(l, "attribute type must be a media type"),
        }
        verr.into_result()
    }
}
