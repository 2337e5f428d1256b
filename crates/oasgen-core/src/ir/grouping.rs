use indexmap::IndexSet;

use crate::error::TransformError;

/// Appended to a path segment to name its controller.
pub const CONTROLLER_SUFFIX: &str = "Controller";

/// Appended to a controller name to name its companion service.
pub const SERVICE_SUFFIX: &str = "Service";

/// Segment used when a path has nothing after its leading `/`.
pub const DEFAULT_SEGMENT: &str = "default";

/// A controller and the operations routed to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerGroup {
    pub name: String,
    pub operations: Vec<usize>, // indices into IrSpec.operations
}

impl ControllerGroup {
    pub fn service_name(&self) -> String {
        service_name(&self.name)
    }
}

/// Ordered, duplicate-free list of controller file names seen so far.
///
/// Every controller is followed immediately by its companion service, so
/// `["votesController", "votesControllerService", "resultsController", ...]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerRegistry {
    names: IndexSet<String>,
    controllers: IndexSet<String>,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a controller and its service.
    ///
    /// Returns `Ok(false)` if the controller was already known, and `Err` with the
    /// clashing file name when the controller or its service would take a name
    /// that already belongs to another controller's files.
    pub fn register(&mut self, controller: &str) -> Result<bool, String> {
        if self.controllers.contains(controller) {
            return Ok(false);
        }
        let service = service_name(controller);
        for candidate in [controller, service.as_str()] {
            if self.names.contains(candidate) {
                return Err(candidate.to_string());
            }
        }
        self.controllers.insert(controller.to_string());
        self.names.insert(controller.to_string());
        self.names.insert(service);
        Ok(true)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Controller and service names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Controller names only, in registration order.
    pub fn controllers(&self) -> impl Iterator<Item = &str> {
        self.controllers.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

pub fn service_name(controller: &str) -> String {
    format!("{controller}{SERVICE_SUFFIX}")
}

/// The segment right after the leading `/`.
/// e.g. "/votes/{id}" → "votes", "/" → "default"
pub fn first_path_segment(path: &str) -> &str {
    path.split('/')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .unwrap_or(DEFAULT_SEGMENT)
}

/// Name the controller for an operation: the routing hint if given, else derived from the path.
pub fn controller_name(path: &str, hint: Option<&str>) -> String {
    match hint.filter(|h| !h.is_empty()) {
        Some(hint) => hint.to_string(),
        None => {
            let derived = format!("{}{CONTROLLER_SUFFIX}", first_path_segment(path));
            log::debug!("no x-router-controller for {path}, using derived controller {derived}");
            derived
        }
    }
}

/// Pick the controller for an operation and record it in the registry.
pub fn group_for(
    path: &str,
    hint: Option<&str>,
    registry: &mut ControllerRegistry,
) -> Result<String, TransformError> {
    let controller = controller_name(path, hint);
    if let Err(existing) = registry.register(&controller) {
        return Err(TransformError::ControllerNameClash {
            controller,
            existing,
            path: path.to_string(),
        });
    }
    Ok(controller)
}
