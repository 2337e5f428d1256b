use indexmap::IndexMap;
use serde::Deserialize;

use super::operation::PathItem;
use super::parameter::ParameterOrRef;

/// Info object describing the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Info {
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    pub version: String,
}

/// The subset of `components` the generator looks at.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub parameters: IndexMap<String, ParameterOrRef>,
}

/// Top-level OpenAPI 3.0 specification.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OpenApiSpec {
    pub openapi: String,

    pub info: Info,

    /// Paths in declaration order.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,

    #[serde(default)]
    pub components: Option<Components>,
}
