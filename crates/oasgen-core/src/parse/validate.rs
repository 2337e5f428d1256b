//! Validation of a raw document against the OpenAPI 3.0 schema.
//!
//! Runs on the untyped document so that every problem can be reported at once,
//! each located by a JSON pointer, before the typed model is built.

use serde_json::Value;

use crate::error::{ValidationError, ValidationIssue};

/// JSON Schema for OpenAPI 3.0.x documents, as published by the OpenAPI
/// Initiative (draft-04, id `https://spec.openapis.org/oas/3.0/schema/2021-09-28`).
const OPENAPI_30_SCHEMA: &str = include_str!("../../schemas/openapi-3.0.json");

/// Validate a raw document, collecting every issue found.
pub fn validate(document: &Value) -> Result<(), ValidationError> {
    let validator = schema_validator()?;
    let issues: Vec<ValidationIssue> = validator
        .iter_errors(document)
        .map(|error| ValidationIssue {
            pointer: error.instance_path().to_string(),
            message: error.to_string(),
        })
        .collect();

    if issues.is_empty() {
        Ok(())
    } else {
        log::debug!("document failed schema validation with {} issue(s)", issues.len());
        Err(ValidationError { issues })
    }
}

fn schema_validator() -> Result<jsonschema::Validator, ValidationError> {
    let schema: Value =
        serde_json::from_str(OPENAPI_30_SCHEMA).map_err(|err| unusable_schema(err.to_string()))?;
    jsonschema::validator_for(&schema).map_err(|err| unusable_schema(err.to_string()))
}

fn unusable_schema(reason: String) -> ValidationError {
    ValidationError {
        issues: vec![ValidationIssue {
            pointer: String::new(),
            message: format!("the OpenAPI 3.0 schema could not be compiled: {reason}"),
        }],
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use serde_json::json;

    fn pointers(document: Value) -> BTreeSet<String> {
        match validate(&document) {
            Ok(()) => BTreeSet::new(),
            Err(err) => err.issues.into_iter().map(|i| i.pointer).collect(),
        }
    }

    #[test]
    fn test_embedded_schema_compiles() {
        assert!(schema_validator().is_ok());
    }

    #[test]
    fn test_minimal_document_is_valid() {
        let doc = json!({
            "openapi": "3.0.0",
            "info": { "title": "Votes", "version": "1.0.0" },
            "paths": {}
        });
        assert!(validate(&doc).is_ok());
    }

    #[test]
    fn test_missing_top_level_fields() {
        let err = validate(&json!({ "openapi": "3.0.0" })).unwrap_err();
        assert_eq!(err.issues.len(), 2);
        assert!(err.issues.iter().all(|i| i.pointer.is_empty()));
        assert!(err.issues.iter().any(|i| i.message.contains("info")));
        assert!(err.issues.iter().any(|i| i.message.contains("paths")));
    }

    #[test]
    fn test_rejects_other_versions() {
        let doc = json!({
            "openapi": "2.0",
            "info": { "title": "Votes", "version": "1.0.0" },
            "paths": {}
        });
        assert_eq!(pointers(doc), BTreeSet::from(["/openapi".to_string()]));
    }

    #[test]
    fn test_reports_nested_problems_with_pointers() {
        let doc = json!({
            "openapi": "3.0.3",
            "info": { "title": "Votes", "version": 1 },
            "paths": {
                "votes": { "get": { "responses": { "200": { "description": "ok" } } } },
                "/votes/{id}": {
                    "get": {
                        "parameters": [{ "name": "id", "in": "body" }],
                        "responses": {}
                    },
                    "fetch": {}
                }
            }
        });
        let expected: BTreeSet<String> = [
            "/info/version",
            "/paths",
            "/paths/~1votes~1{id}",
            "/paths/~1votes~1{id}/get/parameters/0",
            "/paths/~1votes~1{id}/get/responses",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        assert_eq!(pointers(doc), expected);
    }

    #[test]
    fn test_response_without_description_is_rejected() {
        let doc = json!({
            "openapi": "3.0.0",
            "info": { "title": "Votes", "version": "1.0.0" },
            "paths": {
                "/votes": {
                    "get": { "responses": { "200": { "content": {} } } }
                }
            }
        });
        assert_eq!(
            pointers(doc),
            BTreeSet::from(["/paths/~1votes/get/responses/200".to_string()])
        );
    }

    #[test]
    fn test_unknown_fields_and_wrong_types_are_rejected() {
        let doc = json!({
            "openapi": "3.0.0",
            "info": { "title": "T", "version": "1", "contact": 42 },
            "bogus": true,
            "paths": {
                "/votes": { "get": { "responses": { "200": {} } } }
            }
        });
        let expected: BTreeSet<String> = ["", "/info/contact", "/paths/~1votes/get/responses/200"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(pointers(doc), expected);
    }

    #[test]
    fn test_non_object_root() {
        let err = validate(&json!(["not", "a", "spec"])).unwrap_err();
        assert_eq!(err.issues.len(), 1);
        assert_eq!(err.issues[0].pointer, "");
        assert!(err.issues[0].to_string().starts_with("/: "));
        assert!(err.issues[0].message.contains("object"));
    }

    #[test]
    fn test_ref_parameters_and_extensions_are_accepted() {
        let doc = json!({
            "openapi": "3.0.0",
            "info": { "title": "Votes", "version": "1.0.0" },
            "paths": {
                "/votes/{id}": {
                    "parameters": [{ "$ref": "#/components/parameters/VoteId" }],
                    "delete": {
                        "x-router-controller": "votesController",
                        "responses": { "204": { "description": "gone" } }
                    }
                }
            }
        });
        assert!(validate(&doc).is_ok());
    }
}
