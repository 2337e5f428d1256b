use crate::error::TransformError;
use crate::ir::grouping::first_path_segment;

/// Default number of characters dropped to turn a collection name into an item name.
pub const DEFAULT_SINGULAR_TRIM: usize = 1;

/// Resolves operation identifiers from explicit operationIds or from method + path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameResolver {
    /// Characters dropped from the resource name when the operation has parameters.
    pub singular_trim: usize,
}

impl Default for NameResolver {
    fn default() -> Self {
        Self {
            singular_trim: DEFAULT_SINGULAR_TRIM,
        }
    }
}

impl NameResolver {
    pub fn new(singular_trim: usize) -> Self {
        Self { singular_trim }
    }

    /// Resolve the operationId for one operation.
    ///
    /// An explicit, non-empty identifier always wins and is returned unchanged.
    /// Otherwise the name is `verb_word(method) + resource_name(path)`, e.g.
    /// - `GET /votes` → `listVotes`
    /// - `GET /votes/{id}` with parameters → `listVote`
    /// - `POST /votes` → `createVotes`
    pub fn resolve(
        &self,
        path: &str,
        method: &str,
        explicit_id: Option<&str>,
        has_parameters: bool,
    ) -> Result<String, TransformError> {
        if let Some(id) = explicit_id.filter(|id| !id.is_empty()) {
            return Ok(id.to_string());
        }

        let verb = verb_word(method).ok_or_else(|| TransformError::UnsupportedVerb {
            method: method.to_string(),
            path: path.to_string(),
        })?;
        let name = format!("{verb}{}", self.resource_name(path, has_parameters));
        log::debug!("no operationId for {method} {path}, using synthesized name {name}");
        Ok(name)
    }

    /// First path segment with its first character upper-cased.
    ///
    /// When `singular` is set the last `singular_trim` characters are dropped,
    /// which only works for nouns pluralized with a fixed suffix (`votes` → `Vote`
    /// with the default trim of one); it is not a general singularizer.
    pub fn resource_name(&self, path: &str, singular: bool) -> String {
        let segment = first_path_segment(path);
        let mut chars = segment.chars();
        let Some(first) = chars.next() else {
            return String::new();
        };

        let mut resource: String = first.to_uppercase().chain(chars).collect();
        if singular {
            let keep = resource.chars().count().saturating_sub(self.singular_trim);
            resource = resource.chars().take(keep).collect();
        }
        resource
    }
}

/// Resolve an operationId with the default trim.
pub fn resolve(
    path: &str,
    method: &str,
    explicit_id: Option<&str>,
    has_parameters: bool,
) -> Result<String, TransformError> {
    NameResolver::default().resolve(path, method, explicit_id, has_parameters)
}

/// The verb prefix for a method, or `None` if the method has no default name.
pub fn verb_word(method: &str) -> Option<&'static str> {
    match method.to_ascii_lowercase().as_str() {
        "get" => Some("list"),
        "post" => Some("create"),
        "put" => Some("update"),
        "delete" => Some("delete"),
        _ => None,
    }
}
