use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One rule violation found while validating a document, located by JSON pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub pointer: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pointer = if self.pointer.is_empty() {
            "/"
        } else {
            &self.pointer
        };
        write!(f, "{}: {}", pointer, self.message)
    }
}

#[derive(Debug, Error)]
#[error("document is not a valid OpenAPI 3.0 description ({} error(s)): {}", .issues.len(), join_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failure to turn document text into a typed, validated spec.
#[derive(Debug, Error)]
pub enum SpecError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("cannot name {method} {path}: HTTP method `{method}` has no default operation name, add an operationId")]
    UnsupportedVerb { method: String, path: String },

    #[error("duplicate operationId `{operation_id}`: used by {first} and {second}")]
    DuplicateOperationId {
        operation_id: String,
        first: String,
        second: String,
    },

    #[error("controller `{controller}` for {path} clashes with the generated file `{existing}.js`")]
    ControllerNameClash {
        controller: String,
        existing: String,
        path: String,
    },
}

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("invalid {kind} `{name}` for {method} {path}: not a valid JavaScript identifier")]
    InvalidIdentifier {
        kind: &'static str,
        name: String,
        method: String,
        path: String,
    },

    #[error("operationId `{operation_id}` for {method} {path} must differ from its controller name")]
    OperationNamedAfterController {
        operation_id: String,
        method: String,
        path: String,
    },

    #[error("failed to render template {template}: {message}")]
    Render { template: String, message: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml_ng::Error,
    },
}
