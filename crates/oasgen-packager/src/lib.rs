//! Turns an API description into a packaged Express server project.
//!
//! [`run`] drives the whole pipeline: load and validate the document, name and
//! group its operations, render every file in memory, publish the project
//! directory, optionally install its npm dependencies, then archive it.

pub mod archive;
pub mod error;
pub mod install;
pub mod load;
pub mod pipeline;
pub mod writer;

pub use error::RunError;
pub use pipeline::{RunOptions, RunReport, run};
