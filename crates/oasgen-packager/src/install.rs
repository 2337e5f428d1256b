use std::path::Path;
use std::process::Command;

/// Run `npm install` in the generated project.
///
/// A missing `npm` or a failed install is logged and reported as `false`;
/// the project is still usable and the user can install later.
pub fn npm_install(dir: &Path) -> bool {
    log::info!("running npm install in {}", dir.display());
    match Command::new("npm").arg("install").current_dir(dir).output() {
        Ok(output) if output.status.success() => true,
        Ok(output) => {
            log::warn!(
                "npm install in {} exited with {}: {}",
                dir.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            false
        }
        Err(err) => {
            log::warn!("could not run npm install in {}: {err}", dir.display());
            false
        }
    }
}
