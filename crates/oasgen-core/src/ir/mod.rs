pub mod grouping;
pub mod operations;
pub mod types;

pub use grouping::{ControllerGroup, ControllerRegistry};
pub use operations::*;
pub use types::{IrInfo, IrSpec, SkippedOperation};
