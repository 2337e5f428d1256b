use indexmap::IndexMap;
use serde::Deserialize;

use super::parameter::ParameterOrRef;

/// An API operation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId", default)]
    pub operation_id: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub parameters: Vec<ParameterOrRef>,

    /// Routing hint naming the controller that owns this operation.
    #[serde(rename = "x-router-controller", default)]
    pub router_controller: Option<String>,
}

/// A path item. Operations are kept in the order the document declares them.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(try_from = "RawPathItem")]
pub struct PathItem {
    pub parameters: Vec<ParameterOrRef>,
    /// Operations keyed by the method name exactly as written in the document.
    pub operations: IndexMap<String, Operation>,
}

/// Path-item keys that never hold an operation.
const NON_OPERATION_KEYS: &[&str] = &["summary", "description", "parameters", "servers", "$ref"];

fn is_operation_key(key: &str) -> bool {
    !NON_OPERATION_KEYS.contains(&key) && !key.starts_with("x-")
}

#[derive(Deserialize)]
struct RawPathItem {
    #[serde(default)]
    parameters: Vec<ParameterOrRef>,
    #[serde(flatten)]
    rest: IndexMap<String, serde_json::Value>,
}

impl TryFrom<RawPathItem> for PathItem {
    type Error = serde_json::Error;

    fn try_from(raw: RawPathItem) -> Result<Self, Self::Error> {
        let mut operations = IndexMap::new();
        for (method_key, value) in raw.rest {
            if !is_operation_key(&method_key) {
                continue;
            }
            let op: Operation = serde_json::from_value(value)?;
            operations.insert(method_key, op);
        }
        Ok(Self {
            parameters: raw.parameters,
            operations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operations_keep_declaration_order() {
        let item: PathItem = serde_json::from_value(serde_json::json!({
            "summary": "votes",
            "post": { "responses": { "201": { "description": "created" } } },
            "get": { "responses": { "200": { "description": "ok" } } },
            "x-internal": true,
            "delete": { "responses": { "204": { "description": "gone" } } }
        }))
        .unwrap();

        let methods: Vec<&str> = item.operations.keys().map(String::as_str).collect();
        assert_eq!(methods, ["post", "get", "delete"]);
    }

    #[test]
    fn test_router_controller_hint() {
        let item: PathItem = serde_json::from_value(serde_json::json!({
            "get": {
                "operationId": "getResults",
                "x-router-controller": "resultsController",
                "responses": { "200": { "description": "ok" } }
            }
        }))
        .unwrap();

        let op = &item.operations["get"];
        assert_eq!(op.operation_id.as_deref(), Some("getResults"));
        assert_eq!(op.router_controller.as_deref(), Some("resultsController"));
    }
}
