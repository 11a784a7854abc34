//! Nested resource routes.
//!
//! A nested resource is a sub-route whose URL is built from condition values,
//! e.g. `/1.1/lists/{list_id}/members.json`. A read whose conditions carry
//! every required field is sent there instead of the endpoint's index.

use serde_json::Value;

use crate::types::{Fields, param_value};

/// One registered sub-route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedResource {
    template: String,
    required_fields: Vec<String>,
}

impl NestedResource {
    /// `template` uses `{field}` placeholders.
    pub fn new<I, S>(template: impl Into<String>, required_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            template: template.into(),
            required_fields: required_fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn required_fields(&self) -> &[String] {
        &self.required_fields
    }

    /// Render the route if every required field is a scalar condition.
    pub fn render(&self, conditions: &Fields) -> Option<String> {
        let mut url = self.template.clone();
        for field in &self.required_fields {
            let value = match conditions.get(field)? {
                Value::Null | Value::Array(_) | Value::Object(_) => return None,
                scalar => param_value(scalar),
            };
            url = url.replace(&format!("{{{field}}}"), &urlencoding::encode(&value));
        }
        Some(url)
    }
}

/// Ordered table of nested resources; the first match wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NestedResources {
    routes: Vec<NestedResource>,
}

impl NestedResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, resource: NestedResource) {
        self.routes.push(resource);
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// URL of the first route the conditions satisfy.
    pub fn resolve(&self, conditions: &Fields) -> Option<String> {
        self.routes.iter().find_map(|route| route.render(conditions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn conditions(value: serde_json::Value) -> Fields {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn renders_when_all_required_fields_are_present() {
        let route = NestedResource::new("/1.1/lists/{list_id}/members.json", ["list_id"]);
        assert_eq!(
            route.render(&conditions(json!({"list_id": 42, "count": 5}))),
            Some("/1.1/lists/42/members.json".to_string())
        );
        assert_eq!(route.render(&conditions(json!({"count": 5}))), None);
    }

    #[test]
    fn list_values_do_not_satisfy_a_placeholder() {
        let route = NestedResource::new("/1.1/lists/{list_id}/members.json", ["list_id"]);
        assert_eq!(route.render(&conditions(json!({"list_id": [1, 2]}))), None);
    }

    #[test]
    fn placeholder_values_are_percent_encoded() {
        let route = NestedResource::new("/1.1/users/{screen_name}/lists.json", ["screen_name"]);
        assert_eq!(
            route.render(&conditions(json!({"screen_name": "a b/c"}))),
            Some("/1.1/users/a%20b%2Fc/lists.json".to_string())
        );
    }

    #[test]
    fn first_matching_route_wins() {
        let mut table = NestedResources::new();
        table.add(NestedResource::new(
            "/1.1/lists/{list_id}/members/{user_id}.json",
            ["list_id", "user_id"],
        ));
        table.add(NestedResource::new("/1.1/lists/{list_id}/members.json", ["list_id"]));

        assert_eq!(
            table.resolve(&conditions(json!({"list_id": 1}))),
            Some("/1.1/lists/1/members.json".to_string())
        );
        assert_eq!(
            table.resolve(&conditions(json!({"list_id": 1, "user_id": 2}))),
            Some("/1.1/lists/1/members/2.json".to_string())
        );
    }
}
