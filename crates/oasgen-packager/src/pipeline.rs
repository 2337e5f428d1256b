use std::fs;
use std::path::{Component, Path, PathBuf};

use oasgen_core::CodeGenerator;
use oasgen_core::config::OasgenConfig;
use oasgen_core::ir::SkippedOperation;
use oasgen_core::transform::{TransformOptions, transform_with_options};
use oasgen_express::ExpressServerGenerator;

use crate::error::RunError;
use crate::{archive, install, load, writer};

/// Inputs of one generation run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// API description, relative to `base_dir` unless absolute.
    pub input: PathBuf,
    pub base_dir: PathBuf,
    pub config: OasgenConfig,
    /// Replace an existing output directory.
    pub force: bool,
}

impl RunOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            base_dir: PathBuf::from("."),
            config: OasgenConfig::default(),
            force: false,
        }
    }

    /// The document path actually read.
    pub fn input_path(&self) -> PathBuf {
        self.base_dir.join(&self.input)
    }
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub output_dir: PathBuf,
    pub archive: PathBuf,
    pub files: usize,
    pub operations: usize,
    pub controllers: usize,
    pub skipped: Vec<SkippedOperation>,
    /// `npm install` ran and succeeded.
    pub installed: bool,
    /// The project directory is still on disk next to the archive.
    pub kept_directory: bool,
}

/// Generate, write and archive a server project for one document.
///
/// Everything up to and including rendering happens in memory, so a document
/// that fails to load, validate, name or render leaves no output behind.
pub fn run(options: &RunOptions) -> Result<RunReport, RunError> {
    let input = options.input_path();
    let config = &options.config;
    check_output_name(&config.output)?;

    let text = load::read_document(&input)?;
    let spec = load::parse_document(&input, &text)?;
    let ir = transform_with_options(&spec, &TransformOptions::from(&config.naming)).map_err(
        |source| RunError::Transform {
            path: input.clone(),
            source,
        },
    )?;
    log::info!(
        "planned {} operations in {} controllers from {}",
        ir.operations.len(),
        ir.groups.len(),
        input.display()
    );

    let files = ExpressServerGenerator::new()
        .with_document(text)
        .generate(&ir, config)?;

    let output_dir = output_root(&input).join(&config.output);
    let archive_path = archive::archive_path(&output_dir);
    writer::publish(&output_dir, &files, options.force)?;

    let installed = config.package.install && install::npm_install(&output_dir);

    archive::write_archive(&output_dir, &archive_path)?;

    let kept_directory = config.package.keep_directory || !remove_directory(&output_dir);

    Ok(RunReport {
        output_dir,
        archive: archive_path,
        files: files.len(),
        operations: ir.operations.len(),
        controllers: ir.groups.len(),
        skipped: ir.skipped,
        installed,
        kept_directory,
    })
}

/// Output lands next to the input document.
fn output_root(input: &Path) -> &Path {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn check_output_name(name: &str) -> Result<(), RunError> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(RunError::InvalidOutput {
            name: name.to_string(),
        }),
    }
}

/// Returns whether the directory is gone.
fn remove_directory(dir: &Path) -> bool {
    match fs::remove_dir_all(dir) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("could not remove {}: {err}", dir.display());
            false
        }
    }
}
