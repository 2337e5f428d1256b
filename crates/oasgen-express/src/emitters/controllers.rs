use std::collections::HashSet;

use indexmap::IndexMap;
use minijinja::{Environment, context};
use oasgen_core::GeneratedFile;
use oasgen_core::GeneratorError;
use oasgen_core::ir::grouping::service_name;
use oasgen_core::ir::{ControllerRegistry, IrSpec, OperationRecord};

use super::layout;
use crate::js;

/// The two files every controller group writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// `controllers/<Controller>.js`, the functions Express routes call.
    Router,
    /// `controllers/<Controller>Service.js`, where the handler bodies live.
    Service,
}

impl TargetKind {
    fn header_template(self) -> &'static str {
        match self {
            TargetKind::Router => "router_header.js.j2",
            TargetKind::Service => "service_header.js.j2",
        }
    }

    fn stub_template(self) -> &'static str {
        match self {
            TargetKind::Router => "router_stub.js.j2",
            TargetKind::Service => "service_stub.js.j2",
        }
    }

    fn file_stem(self, controller: &str) -> String {
        match self {
            TargetKind::Router => controller.to_string(),
            TargetKind::Service => service_name(controller),
        }
    }
}

/// Path of a controller or service module inside the generated project.
pub fn controller_path(name: &str) -> String {
    format!("controllers/{name}.js")
}

/// Appends router and service stubs, writing each file's header exactly once.
///
/// Header state is kept per (controller, target kind), so the first
/// operation of every group gets a header in both of its files regardless of
/// what other groups have already written.
pub struct ControllerEmitter {
    env: Environment<'static>,
    headers_written: HashSet<(String, TargetKind)>,
    buffers: IndexMap<String, String>,
}

impl ControllerEmitter {
    pub fn new() -> Result<Self, GeneratorError> {
        let env = super::environment(&[
            (
                "router_header.js.j2",
                include_str!("../../templates/router_header.js.j2"),
            ),
            (
                "router_stub.js.j2",
                include_str!("../../templates/router_stub.js.j2"),
            ),
            (
                "service_header.js.j2",
                include_str!("../../templates/service_header.js.j2"),
            ),
            (
                "service_stub.js.j2",
                include_str!("../../templates/service_stub.js.j2"),
            ),
        ])?;
        Ok(Self {
            env,
            headers_written: HashSet::new(),
            buffers: IndexMap::new(),
        })
    }

    /// Append one operation to its controller's router and service files.
    pub fn emit(&mut self, op: &OperationRecord) -> Result<(), GeneratorError> {
        check_identifier("operationId", &op.operation_id, op)?;
        check_identifier("controller name", &op.controller_name, op)?;
        // Inside the router stub the function's own name would hide the service binding.
        if op.operation_id == op.controller_name {
            return Err(GeneratorError::OperationNamedAfterController {
                operation_id: op.operation_id.clone(),
                method: op.method.to_string(),
                path: op.path.clone(),
            });
        }

        for kind in [TargetKind::Router, TargetKind::Service] {
            self.append(op, kind)?;
        }
        Ok(())
    }

    fn append(&mut self, op: &OperationRecord, kind: TargetKind) -> Result<(), GeneratorError> {
        let ctx = context! {
            controller => op.controller_name.clone(),
            service => service_name(&op.controller_name),
            operation_id => op.operation_id.clone(),
            summary => op.summary.as_deref().map(js::line_comment_text),
        };

        let mut block = String::new();
        if self
            .headers_written
            .insert((op.controller_name.clone(), kind))
        {
            block.push_str(&self.render(kind.header_template(), &ctx)?);
        }
        block.push_str(&self.render(kind.stub_template(), &ctx)?);

        self.buffers
            .entry(kind.file_stem(&op.controller_name))
            .or_default()
            .push_str(&block);
        Ok(())
    }

    fn render(&self, name: &str, ctx: &minijinja::Value) -> Result<String, GeneratorError> {
        self.env
            .get_template(name)
            .and_then(|tmpl| tmpl.render(ctx))
            .map_err(|e| super::render_error(name, e))
    }

    /// Whether the header for `(controller, kind)` has been written.
    pub fn header_written(&self, controller: &str, kind: TargetKind) -> bool {
        self.headers_written
            .contains(&(controller.to_string(), kind))
    }

    /// Lay out every buffered file, in registry order.
    pub fn finish(mut self, registry: &ControllerRegistry) -> Vec<GeneratedFile> {
        registry
            .names()
            .filter_map(|name| {
                self.buffers
                    .shift_remove(name)
                    .map(|content| GeneratedFile {
                        path: controller_path(name),
                        content: layout::reformat(&content),
                    })
            })
            .collect()
    }
}

fn check_identifier(
    kind: &'static str,
    name: &str,
    op: &OperationRecord,
) -> Result<(), GeneratorError> {
    if js::is_identifier(name) {
        return Ok(());
    }
    Err(GeneratorError::InvalidIdentifier {
        kind,
        name: name.to_string(),
        method: op.method.to_string(),
        path: op.path.clone(),
    })
}

/// Emit the router and service module of every controller group.
pub fn emit_controllers(ir: &IrSpec) -> Result<Vec<GeneratedFile>, GeneratorError> {
    let mut emitter = ControllerEmitter::new()?;
    for op in &ir.operations {
        emitter.emit(op)?;
    }
    Ok(emitter.finish(&ir.registry))
}
