use std::fs;
use std::path::Path;

use oasgen_core::error::SpecError;
use oasgen_core::parse;
use oasgen_core::parse::spec::OpenApiSpec;

use crate::error::RunError;

/// Read the document text.
pub fn read_document(path: &Path) -> Result<String, RunError> {
    fs::read_to_string(path).map_err(|source| RunError::SpecRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse and validate a document; `.json` files are read as JSON, anything else as YAML.
pub fn parse_document(path: &Path, text: &str) -> Result<OpenApiSpec, RunError> {
    let parsed = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => parse::from_json(text),
        _ => parse::from_yaml(text),
    };

    parsed.map_err(|err| match err {
        SpecError::Parse(source) => RunError::SpecParse {
            path: path.to_path_buf(),
            source,
        },
        SpecError::Validation(source) => RunError::SpecValidation {
            path: path.to_path_buf(),
            source,
        },
    })
}
