use minijinja::context;
use oasgen_core::ir::IrSpec;
use oasgen_core::{GeneratedFile, GeneratorError};
use serde::Serialize;

use super::layout;
use crate::js;

#[derive(Debug, Serialize)]
struct Route {
    method: &'static str,
    /// Quoted Express route, e.g. `'/votes/:id'`.
    path: String,
    controller: String,
    operation_id: String,
}

/// Emit `index.js`, the Express entry point mounting one route per operation.
///
/// Controller and operation names are expected to be checked already by the
/// controller emitter.
pub fn emit_entry(ir: &IrSpec) -> Result<GeneratedFile, GeneratorError> {
    let env = super::environment(&[("index.js.j2", include_str!("../../templates/index.js.j2"))])?;

    let routes: Vec<Route> = ir
        .operations
        .iter()
        .map(|op| Route {
            method: op.method.as_key(),
            path: js::single_quoted(&js::express_path(&op.path)),
            controller: op.controller_name.clone(),
            operation_id: op.operation_id.clone(),
        })
        .collect();
    let controllers: Vec<&str> = ir.registry.controllers().collect();

    let content = env
        .get_template("index.js.j2")
        .and_then(|tmpl| {
            tmpl.render(context! {
                controllers => controllers,
                routes => routes,
            })
        })
        .map_err(|e| super::render_error("index.js.j2", e))?;

    Ok(GeneratedFile {
        path: "index.js".to_string(),
        content: layout::reformat(&content),
    })
}
