use indexmap::IndexMap;
use minijinja::context;
use oasgen_core::config::ProjectConfig;
use oasgen_core::ir::IrInfo;
use oasgen_core::{GeneratedFile, GeneratorError};
use serde::Serialize;

/// Version recorded in `.oas-generator/VERSION`.
pub const GENERATOR_VERSION: &str = "1.0.0";

/// Package name used when the API title has no usable characters.
const FALLBACK_PACKAGE_NAME: &str = "nodejs-server";

/// `package.json` of the generated server.
#[derive(Debug, Serialize)]
struct PackageManifest<'a> {
    name: String,
    version: &'a str,
    description: &'a str,
    main: &'static str,
    scripts: IndexMap<&'static str, &'static str>,
    keywords: [&'static str; 1],
    license: &'static str,
    private: bool,
    dependencies: IndexMap<&'static str, &'static str>,
}

/// Generate the project files around the controllers: README, manifest,
/// response helper and generator metadata.
pub fn emit_scaffold(
    info: &IrInfo,
    project: &ProjectConfig,
) -> Result<Vec<GeneratedFile>, GeneratorError> {
    Ok(vec![
        GeneratedFile {
            path: "README.md".to_string(),
            content: emit_readme(info)?,
        },
        GeneratedFile {
            path: "package.json".to_string(),
            content: emit_package_json(info, project)?,
        },
        GeneratedFile {
            path: "utils/writer.js".to_string(),
            content: include_str!("../../templates/writer.js").to_string(),
        },
        GeneratedFile {
            path: ".oas-generator-ignore".to_string(),
            content: String::new(),
        },
        GeneratedFile {
            path: ".oas-generator/VERSION".to_string(),
            content: GENERATOR_VERSION.to_string(),
        },
    ])
}

fn emit_readme(info: &IrInfo) -> Result<String, GeneratorError> {
    let env = super::environment(&[("README.md.j2", include_str!("../../templates/README.md.j2"))])?;
    env.get_template("README.md.j2")
        .and_then(|tmpl| {
            tmpl.render(context! {
                title => info.title.clone(),
                description => info.description.clone(),
                version => info.version.clone(),
            })
        })
        .map_err(|e| super::render_error("README.md.j2", e))
}

fn emit_package_json(info: &IrInfo, project: &ProjectConfig) -> Result<String, GeneratorError> {
    let manifest = PackageManifest {
        name: package_name(&info.title),
        version: &project.version,
        description: &project.description,
        main: "index.js",
        scripts: IndexMap::from([("prestart", "npm install"), ("start", "node index.js")]),
        keywords: ["OAI"],
        license: "Unlicense",
        private: true,
        dependencies: IndexMap::from([("express", "^4.16.3"), ("js-yaml", "^3.3.0")]),
    };
    let mut json = serde_json::to_string_pretty(&manifest).map_err(|e| GeneratorError::Render {
        template: "package.json".to_string(),
        message: e.to_string(),
    })?;
    json.push('\n');
    Ok(json)
}

/// npm package name derived from the API title.
fn package_name(title: &str) -> String {
    let slug = slugify(title);
    if slug.is_empty() {
        FALLBACK_PACKAGE_NAME.to_string()
    } else {
        slug
    }
}

/// Convert a title to a lowercase, dash-separated ASCII name.
fn slugify(title: &str) -> String {
    let mut result = String::new();
    let mut prev_dash = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            prev_dash = false;
        } else {
            if !prev_dash && !result.is_empty() {
                result.push('-');
            }
            prev_dash = true;
        }
    }
    result.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(title: &str) -> IrInfo {
        IrInfo {
            title: title.to_string(),
            description: None,
            version: "1.0.0".to_string(),
        }
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Voting API"), "voting-api");
        assert_eq!(slugify("Petstore - OpenAPI 3.0"), "petstore-openapi-3-0");
        assert_eq!(slugify("  Café Orders  "), "caf-orders");
        assert_eq!(package_name("¿?"), "nodejs-server");
    }

    #[test]
    fn test_package_json() {
        let content = emit_package_json(&info("Voting API"), &ProjectConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["name"], "voting-api");
        assert_eq!(value["version"], "1.0.0");
        assert_eq!(
            value["description"],
            "No description provided (generated by OAS Codegen)"
        );
        assert_eq!(value["main"], "index.js");
        assert_eq!(value["scripts"]["prestart"], "npm install");
        assert_eq!(value["scripts"]["start"], "node index.js");
        assert_eq!(value["keywords"], serde_json::json!(["OAI"]));
        assert_eq!(value["license"], "Unlicense");
        assert_eq!(value["private"], true);
        assert_eq!(value["dependencies"]["express"], "^4.16.3");
        assert_eq!(value["dependencies"]["js-yaml"], "^3.3.0");
        assert!(content.ends_with("}\n"));
    }

    #[test]
    fn test_package_json_field_order() {
        let content = emit_package_json(&info("Voting API"), &ProjectConfig::default()).unwrap();
        let name = content.find("\"name\"").unwrap();
        let main = content.find("\"main\"").unwrap();
        let deps = content.find("\"dependencies\"").unwrap();
        assert!(name < main && main < deps);
    }

    #[test]
    fn test_scaffold_files() {
        let mut api = info("Voting API");
        api.description = Some("Cast and count votes.".to_string());
        let files = emit_scaffold(&api, &ProjectConfig::default()).unwrap();
        let paths: Vec<_> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "README.md",
                "package.json",
                "utils/writer.js",
                ".oas-generator-ignore",
                ".oas-generator/VERSION",
            ]
        );
        assert!(files[0].content.starts_with("# Voting API\n\nCast and count votes.\n"));
        assert!(files[2].content.contains("exports.writeJson"));
        assert_eq!(files[3].content, "");
        assert_eq!(files[4].content, "1.0.0");
    }
}
