pub mod operation;
pub mod parameter;
pub mod spec;
pub mod validate;

use crate::error::{ParseError, SpecError};
use spec::OpenApiSpec;

/// Parse raw document text as YAML, without any OpenAPI checks.
pub fn document_from_yaml(input: &str) -> Result<serde_json::Value, ParseError> {
    Ok(serde_yaml_ng::from_str(input)?)
}

/// Parse raw document text as JSON, without any OpenAPI checks.
pub fn document_from_json(input: &str) -> Result<serde_json::Value, ParseError> {
    Ok(serde_json::from_str(input)?)
}

/// Validate a raw document and convert it into the typed spec model.
pub fn from_document(document: serde_json::Value) -> Result<OpenApiSpec, SpecError> {
    validate::validate(&document)?;
    let spec = serde_json::from_value(document).map_err(ParseError::from)?;
    Ok(spec)
}

/// Parse and validate an OpenAPI spec from YAML.
pub fn from_yaml(input: &str) -> Result<OpenApiSpec, SpecError> {
    from_document(document_from_yaml(input)?)
}

/// Parse and validate an OpenAPI spec from JSON.
pub fn from_json(input: &str) -> Result<OpenApiSpec, SpecError> {
    from_document(document_from_json(input)?)
}
