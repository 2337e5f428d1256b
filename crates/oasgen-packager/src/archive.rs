use std::ffi::OsString;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use tar::{Builder, HeaderMode};
use walkdir::WalkDir;

use crate::error::RunError;

/// Extension of the archive written next to the project directory.
pub const ARCHIVE_EXTENSION: &str = "tar.gz";

/// `<dir>.tar.gz`, beside `dir`.
pub fn archive_path(dir: &Path) -> PathBuf {
    let mut name = dir.file_name().map(OsString::from).unwrap_or_default();
    name.push(".");
    name.push(ARCHIVE_EXTENSION);
    dir.with_file_name(name)
}

fn partial_path(archive: &Path) -> PathBuf {
    let mut name = archive.as_os_str().to_os_string();
    name.push(".partial");
    PathBuf::from(name)
}

/// Archive `dir` into `archive`, with every entry under the directory's own name.
///
/// The archive is built under a `.partial` name and renamed once complete, so
/// `archive` is either the finished file or absent. Entries are added in
/// file-name order with normalized headers, so identical trees give identical bytes.
pub fn write_archive(dir: &Path, archive: &Path) -> Result<(), RunError> {
    let partial = partial_path(archive);
    let result = build(dir, &partial).and_then(|()| fs::rename(&partial, archive));

    if let Err(source) = result {
        if partial.exists() {
            if let Err(err) = fs::remove_file(&partial) {
                log::warn!("could not remove {}: {err}", partial.display());
            }
        }
        return Err(RunError::Packaging {
            archive: archive.to_path_buf(),
            directory: dir.to_path_buf(),
            source,
        });
    }

    log::info!("packaged {} into {}", dir.display(), archive.display());
    Ok(())
}

fn build(dir: &Path, dest: &Path) -> io::Result<()> {
    let root = dir.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} has no directory name", dir.display()),
        )
    })?;

    let file = File::create(dest)?;
    let mut builder = Builder::new(GzEncoder::new(file, Compression::default()));
    builder.mode(HeaderMode::Deterministic);

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(dir)
            .map_err(io::Error::other)?;
        let name = Path::new(root).join(relative);

        let file_type = entry.file_type();
        if file_type.is_dir() {
            builder.append_dir(&name, entry.path())?;
        } else if file_type.is_file() {
            builder.append_path_with_name(entry.path(), &name)?;
        } else {
            log::debug!("not archiving {}", entry.path().display());
        }
    }

    let encoder = builder.into_inner()?;
    encoder.finish()?.sync_all()
}
