use std::collections::HashMap;

use indexmap::IndexMap;

use crate::config::{DuplicatePolicy, NamingConfig, UnsupportedVerbPolicy};
use crate::error::TransformError;
use crate::ir::grouping::group_for;
use crate::ir::*;
use crate::parse::operation::Operation;
use crate::parse::parameter::ParameterOrRef;
use crate::parse::spec::OpenApiSpec;

use super::naming::NameResolver;

/// Options controlling how operations are named.
#[derive(Debug, Clone, Default)]
pub struct TransformOptions {
    pub resolver: NameResolver,
    pub unsupported_verb: UnsupportedVerbPolicy,
    pub duplicate_operation_id: DuplicatePolicy,
}

impl From<&NamingConfig> for TransformOptions {
    fn from(naming: &NamingConfig) -> Self {
        Self {
            resolver: NameResolver::new(naming.singular_trim),
            unsupported_verb: naming.unsupported_verb,
            duplicate_operation_id: naming.duplicate_operation_id,
        }
    }
}

/// Name and group every operation of a parsed spec.
pub fn transform(spec: &OpenApiSpec) -> Result<IrSpec, TransformError> {
    transform_with_options(spec, &TransformOptions::default())
}

/// Transform with explicit naming options.
///
/// Paths are visited in declaration order and methods in declaration order
/// within each path. Explicit operationIds are reserved before the visit, so
/// suffixing only ever renames synthesized names.
pub fn transform_with_options(
    spec: &OpenApiSpec,
    options: &TransformOptions,
) -> Result<IrSpec, TransformError> {
    let mut planner = Planner::new(spec, options);

    for (route, path_item) in &spec.paths {
        let path_has_params = declares_parameters(spec, &path_item.parameters);
        for (method_key, op) in &path_item.operations {
            planner.visit(route, method_key, op, path_has_params)?;
        }
    }

    Ok(planner.finish())
}

struct Planner<'a> {
    spec: &'a OpenApiSpec,
    options: &'a TransformOptions,
    operations: Vec<OperationRecord>,
    groups: IndexMap<String, Vec<usize>>,
    registry: ControllerRegistry,
    skipped: Vec<SkippedOperation>,
    /// operationId → label of the operation that claimed it first.
    claimed: HashMap<String, String>,
    /// Explicit operationId → label of the first operation declaring it.
    reserved: HashMap<String, String>,
}

impl<'a> Planner<'a> {
    fn new(spec: &'a OpenApiSpec, options: &'a TransformOptions) -> Self {
        Self {
            spec,
            options,
            operations: Vec::new(),
            groups: IndexMap::new(),
            registry: ControllerRegistry::new(),
            skipped: Vec::new(),
            claimed: HashMap::new(),
            reserved: explicit_operation_ids(spec),
        }
    }

    fn visit(
        &mut self,
        route: &str,
        method_key: &str,
        op: &Operation,
        path_has_params: bool,
    ) -> Result<(), TransformError> {
        let has_parameters = path_has_params || declares_parameters(self.spec, &op.parameters);

        let resolved = match HttpMethod::from_key(method_key) {
            Some(method) => self
                .options
                .resolver
                .resolve(
                    route,
                    method_key,
                    op.operation_id.as_deref(),
                    has_parameters,
                )
                .map(|id| (method, id)),
            None => Err(TransformError::UnsupportedVerb {
                method: method_key.to_string(),
                path: route.to_string(),
            }),
        };

        let (method, operation_id) = match resolved {
            Ok(named) => named,
            Err(err @ TransformError::UnsupportedVerb { .. })
                if self.options.unsupported_verb == UnsupportedVerbPolicy::Skip =>
            {
                log::warn!("skipping operation: {err}");
                self.skipped.push(SkippedOperation {
                    path: route.to_string(),
                    method: method_key.to_string(),
                    reason: err.to_string(),
                });
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        let label = format!("{method} {route}");
        let explicit = op.operation_id.as_deref().is_some_and(|id| !id.is_empty());
        let operation_id = self.claim(operation_id, &label, explicit)?;
        let controller_name = group_for(route, op.router_controller.as_deref(), &mut self.registry)?;

        let index = self.operations.len();
        self.groups
            .entry(controller_name.clone())
            .or_default()
            .push(index);
        self.operations.push(OperationRecord {
            path: route.to_string(),
            method,
            operation_id,
            has_parameters,
            controller_name,
            summary: op.summary.clone(),
        });
        Ok(())
    }

    /// Enforce globally unique operationIds according to the duplicate policy.
    ///
    /// An explicit operationId is never renamed: reusing one is always an
    /// error. Under the suffix policy a synthesized name also steps aside for
    /// explicit ids declared later in the document.
    fn claim(
        &mut self,
        operation_id: String,
        label: &str,
        explicit: bool,
    ) -> Result<String, TransformError> {
        let suffixing = self.options.duplicate_operation_id == DuplicatePolicy::Suffix;
        let first = match self.claimed.get(&operation_id) {
            Some(first) => Some(first),
            None if suffixing && !explicit => self.reserved.get(&operation_id),
            None => None,
        };
        let Some(first) = first.cloned() else {
            self.claimed.insert(operation_id.clone(), label.to_string());
            return Ok(operation_id);
        };

        if explicit || !suffixing {
            return Err(TransformError::DuplicateOperationId {
                operation_id,
                first,
                second: label.to_string(),
            });
        }

        let unique = (2..)
            .map(|n| format!("{operation_id}{n}"))
            .find(|candidate| {
                !self.claimed.contains_key(candidate) && !self.reserved.contains_key(candidate)
            })
            .unwrap_or_default();
        log::warn!(
            "operationId `{operation_id}` of {label} is already used by {first}, renamed to `{unique}`"
        );
        self.claimed.insert(unique.clone(), label.to_string());
        Ok(unique)
    }

    fn finish(self) -> IrSpec {
        let info = IrInfo {
            title: self.spec.info.title.clone(),
            description: self.spec.info.description.clone(),
            version: self.spec.info.version.clone(),
        };

        let groups = self
            .groups
            .into_iter()
            .map(|(name, operations)| ControllerGroup { name, operations })
            .collect();

        IrSpec {
            info,
            operations: self.operations,
            groups,
            registry: self.registry,
            skipped: self.skipped,
        }
    }
}

/// Every non-empty operationId the document declares, with the first declaring operation.
fn explicit_operation_ids(spec: &OpenApiSpec) -> HashMap<String, String> {
    let mut reserved = HashMap::new();
    for (route, path_item) in &spec.paths {
        for (method_key, op) in &path_item.operations {
            let Some(id) = op.operation_id.as_deref().filter(|id| !id.is_empty()) else {
                continue;
            };
            reserved
                .entry(id.to_string())
                .or_insert_with(|| format!("{} {route}", method_key.to_uppercase()));
        }
    }
    reserved
}

/// Whether a parameter list declares any path or query parameter.
///
/// References are looked up in `components.parameters`; a reference that cannot
/// be resolved is assumed to declare one.
fn declares_parameters(spec: &OpenApiSpec, params: &[ParameterOrRef]) -> bool {
    params.iter().any(|param| match param {
        ParameterOrRef::Parameter(p) => p.targets_resource(),
        ParameterOrRef::Ref { ref_path } => match lookup_parameter(spec, ref_path) {
            Some(ParameterOrRef::Parameter(p)) => p.targets_resource(),
            _ => true,
        },
    })
}

fn lookup_parameter<'a>(spec: &'a OpenApiSpec, ref_path: &str) -> Option<&'a ParameterOrRef> {
    let name = ref_path.strip_prefix("#/components/parameters/")?;
    spec.components.as_ref()?.parameters.get(name)
}
