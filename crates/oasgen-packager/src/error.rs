use std::path::PathBuf;

use oasgen_core::GeneratorError;
use oasgen_core::error::{ParseError, TransformError, ValidationError};
use thiserror::Error;

/// Why a generation run stopped.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to read {}: {source}", .path.display())]
    SpecRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    SpecParse { path: PathBuf, source: ParseError },

    #[error("{}: {source}", .path.display())]
    SpecValidation {
        path: PathBuf,
        source: ValidationError,
    },

    #[error("{}: {source}", .path.display())]
    Transform {
        path: PathBuf,
        source: TransformError,
    },

    #[error(transparent)]
    Generate(#[from] GeneratorError),

    #[error("invalid output directory name `{name}`: expected a single path component")]
    InvalidOutput { name: String },

    #[error("output directory {} already exists (use --force to replace it)", .path.display())]
    OutputExists { path: PathBuf },

    #[error("failed to write {}: {source}", .path.display())]
    EmissionIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to package {} (generated files kept in {}): {source}", .archive.display(), .directory.display())]
    Packaging {
        archive: PathBuf,
        directory: PathBuf,
        source: std::io::Error,
    },
}
