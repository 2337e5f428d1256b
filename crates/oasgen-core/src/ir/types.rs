use super::grouping::{ControllerGroup, ControllerRegistry};
use super::operations::OperationRecord;

/// The named and grouped operations of one document, ready for emission.
#[derive(Debug, Clone)]
pub struct IrSpec {
    pub info: IrInfo,
    /// Operations in document traversal order.
    pub operations: Vec<OperationRecord>,
    /// Controller groups in first-seen order.
    pub groups: Vec<ControllerGroup>,
    pub registry: ControllerRegistry,
    pub skipped: Vec<SkippedOperation>,
}

impl IrSpec {
    /// Operations of one group, in traversal order.
    pub fn group_operations<'a>(
        &'a self,
        group: &'a ControllerGroup,
    ) -> impl Iterator<Item = &'a OperationRecord> + 'a {
        group.operations.iter().map(|&i| &self.operations[i])
    }

    pub fn group(&self, name: &str) -> Option<&ControllerGroup> {
        self.groups.iter().find(|g| g.name == name)
    }
}

/// API metadata.
#[derive(Debug, Clone)]
pub struct IrInfo {
    pub title: String,
    pub description: Option<String>,
    pub version: String,
}

/// An operation the generator could not name and left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedOperation {
    pub path: String,
    pub method: String,
    pub reason: String,
}
