use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use oasgen_core::config::{self, CONFIG_FILE_NAME, OasgenConfig};
use oasgen_packager::{RunOptions, RunReport};

#[derive(Parser)]
#[command(
    name = "oas-generator",
    about = "Generate a Node.js/Express server scaffold from an OpenAPI 3.0 description",
    version
)]
struct Cli {
    /// Path to the OpenAPI description (YAML, or JSON with a `.json` extension)
    #[arg(required_unless_present = "init")]
    file: Option<PathBuf>,

    /// Write a default `.oas-generator.yaml` into the base directory and exit
    #[arg(long)]
    init: bool,

    /// Directory the input path is resolved against
    #[arg(long, default_value = ".")]
    base_dir: PathBuf,

    /// Config file (defaults to `.oas-generator.yaml` in the base directory, if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run `npm install` in the generated project before archiving
    #[arg(long)]
    install: bool,

    /// Keep the generated directory next to the archive
    #[arg(long)]
    keep_dir: bool,

    /// Replace an existing output directory (or config file, with `--init`)
    #[arg(long)]
    force: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    if cli.init {
        let path = init_config(&cli.base_dir, cli.force)?;
        eprintln!("Created {}", path.display());
        return Ok(());
    }

    let file = cli
        .file
        .clone()
        .context("an OpenAPI description file is required")?;
    let mut cfg = load_config(&cli)?;
    cfg.package.install |= cli.install;
    cfg.package.keep_directory |= cli.keep_dir;

    let options = RunOptions {
        input: file,
        base_dir: cli.base_dir,
        config: cfg,
        force: cli.force,
    };

    let input = options.input_path();
    eprintln!("Generating Express server from {}", input.display());
    let report = oasgen_packager::run(&options)
        .with_context(|| format!("generation from {} failed", input.display()))?;
    print_summary(&report);
    Ok(())
}

/// Load the explicit config file, or the default one from the base directory.
fn load_config(cli: &Cli) -> Result<OasgenConfig> {
    let (path, explicit) = match &cli.config {
        Some(path) => (path.clone(), true),
        None => (cli.base_dir.join(CONFIG_FILE_NAME), false),
    };

    match config::load_config(&path)? {
        Some(cfg) => {
            log::info!("loaded config from {}", path.display());
            Ok(cfg)
        }
        None if explicit => anyhow::bail!("config file {} does not exist", path.display()),
        None => Ok(OasgenConfig::default()),
    }
}

/// Write the default config file into `base_dir`.
fn init_config(base_dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = base_dir.join(CONFIG_FILE_NAME);
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    Ok(config_path)
}

fn print_summary(report: &RunReport) {
    for skipped in &report.skipped {
        eprintln!(
            "  skipped {} {}: {}",
            skipped.method.to_uppercase(),
            skipped.path,
            skipped.reason
        );
    }
    eprintln!(
        "  {} operations in {} controllers, {} files",
        report.operations, report.controllers, report.files
    );
    if report.installed {
        eprintln!("  installed npm dependencies");
    }
    if report.kept_directory {
        eprintln!("  project directory: {}", report.output_dir.display());
    }
    eprintln!("Wrote {}", report.archive.display());
}
