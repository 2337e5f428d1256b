use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Top-level project configuration loaded from `.oas-generator.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OasgenConfig {
    /// Name of the generated project directory (and base name of the archive).
    pub output: String,
    pub naming: NamingConfig,
    pub project: ProjectConfig,
    pub package: PackageConfig,
}

impl Default for OasgenConfig {
    fn default() -> Self {
        Self {
            output: "nodejs-server-generated".to_string(),
            naming: NamingConfig::default(),
            project: ProjectConfig::default(),
            package: PackageConfig::default(),
        }
    }
}

/// Operation naming heuristics and conflict policies.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Characters dropped from a resource name when an operation targets a single resource.
    pub singular_trim: usize,
    pub unsupported_verb: UnsupportedVerbPolicy,
    pub duplicate_operation_id: DuplicatePolicy,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            singular_trim: 1,
            unsupported_verb: UnsupportedVerbPolicy::Skip,
            duplicate_operation_id: DuplicatePolicy::Fail,
        }
    }
}

/// What to do with an operation whose HTTP method has no default name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsupportedVerbPolicy {
    #[default]
    Skip,
    Fail,
}

/// What to do when two operations end up with the same operationId.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    #[default]
    Fail,
    Suffix,
}

/// Values written into the generated `package.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub version: String,
    pub description: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
            description: "No description provided (generated by OAS Codegen)".to_string(),
        }
    }
}

/// Post-generation steps.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PackageConfig {
    /// Run `npm install` inside the generated project before archiving.
    pub install: bool,
    /// Keep the generated directory next to the archive.
    pub keep_directory: bool,
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".oas-generator.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<OasgenConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let config: OasgenConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# oas-generator configuration
output: nodejs-server-generated

naming:
  singular_trim: 1                  # characters dropped from `/votes/{id}` style resources
  unsupported_verb: skip            # skip | fail
  duplicate_operation_id: fail      # fail | suffix

project:
  version: 1.0.0
  description: No description provided (generated by OAS Codegen)

package:
  install: false                    # run `npm install` before archiving
  keep_directory: false             # keep the generated directory next to the archive
"#
}
