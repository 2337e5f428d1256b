use std::fs;
use std::io;
use std::path::{Component, Path};

use oasgen_core::GeneratedFile;

use crate::error::RunError;

/// Prefix of the hidden staging directory created next to the target.
pub const STAGING_PREFIX: &str = ".oasgen-staging-";

/// Write `files` into a staging directory beside `target`, then move it into place.
///
/// Nothing appears at `target` until every file has been written. On failure
/// the staging directory is removed. An existing `target` is an error unless
/// `force` is set, in which case it is replaced.
pub fn publish(target: &Path, files: &[GeneratedFile], force: bool) -> Result<(), RunError> {
    if target.exists() && !force {
        return Err(RunError::OutputExists {
            path: target.to_path_buf(),
        });
    }

    let parent = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let staging = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .tempdir_in(parent)
        .map_err(|source| RunError::EmissionIo {
            path: parent.to_path_buf(),
            source,
        })?;

    for file in files {
        let dest = staging.path().join(checked_relative(&file.path)?);
        if let Some(dir) = dest.parent() {
            fs::create_dir_all(dir).map_err(|source| emission_io(target, &file.path, source))?;
        }
        fs::write(&dest, &file.content)
            .map_err(|source| emission_io(target, &file.path, source))?;
        log::debug!("staged {}", file.path);
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(staging.path(), fs::Permissions::from_mode(0o755)).map_err(
            |source| RunError::EmissionIo {
                path: staging.path().to_path_buf(),
                source,
            },
        )?;
    }

    if target.exists() {
        log::info!("replacing {}", target.display());
        fs::remove_dir_all(target).map_err(|source| RunError::EmissionIo {
            path: target.to_path_buf(),
            source,
        })?;
    }
    // The TempDir guard only cleans up if the rename fails.
    fs::rename(staging.path(), target).map_err(|source| RunError::EmissionIo {
        path: target.to_path_buf(),
        source,
    })?;

    log::info!("wrote {} files to {}", files.len(), target.display());
    Ok(())
}

/// Reject generated paths that would land outside the project directory.
fn checked_relative(path: &str) -> Result<&Path, RunError> {
    let relative = Path::new(path);
    let normal = !path.is_empty()
        && relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
    if normal {
        Ok(relative)
    } else {
        Err(RunError::EmissionIo {
            path: relative.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::InvalidInput,
                "generated path must stay inside the project directory",
            ),
        })
    }
}

fn emission_io(target: &Path, file: &str, source: io::Error) -> RunError {
    RunError::EmissionIo {
        path: target.join(file),
        source,
    }
}
