pub mod controllers;
pub mod entry;
pub mod layout;
pub mod scaffold;

use minijinja::{AutoEscape, Environment};
use oasgen_core::GeneratorError;

/// Template environment with the given embedded templates registered.
///
/// Output is JavaScript and Markdown, so nothing is auto-escaped, and each
/// template keeps its final newline.
pub(crate) fn environment(
    templates: &[(&'static str, &'static str)],
) -> Result<Environment<'static>, GeneratorError> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.set_keep_trailing_newline(true);
    for &(name, source) in templates {
        env.add_template(name, source)
            .map_err(|e| render_error(name, e))?;
    }
    Ok(env)
}

pub(crate) fn render_error(template: &str, err: minijinja::Error) -> GeneratorError {
    GeneratorError::Render {
        template: template.to_string(),
        message: err.to_string(),
    }
}
