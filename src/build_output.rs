//! Build output roots
//!
//! A packaged build looks like:
//!
//! ```text
//! Shooter/
//! ├── Engine/Binaries/
//! ├── Shooter/
//! │   ├── Binaries/
//! │   └── Content/
//! └── Shooter.sh            ← ShooterClient.exe, ShooterServer.sh, ...
//! ```

use crate::build_name::{decode_standalone, Target};
use crate::engine::BINARIES_DIR;
use crate::platform::HostPlatform;
use crate::project::files_in;
use crate::report::Reporter;
use std::path::Path;

const PROJECT_BINARIES_DIR: &str = "Binaries";
const PROJECT_CONTENT_DIR: &str = "Content";

/// A build executable recognized inside a build output root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutput {
    pub build_name: String,
    pub project_name: String,
    pub target: Target,
}

/// Classify `dir` as a build output root
///
/// Executables are examined in file-name order and the first one whose
/// decoded project directory holds `Binaries` and `Content` wins.
pub fn detect(dir: &Path, host: &dyn HostPlatform, reporter: &Reporter) -> Option<BuildOutput> {
    if !dir.join(BINARIES_DIR).is_dir() {
        return None;
    }

    let files = files_in(dir).ok()?;
    files
        .iter()
        .filter(|path| host.is_build_executable(path))
        .find_map(|path| {
            let build_name = path.file_stem()?.to_str()?;
            let (project_name, target) = match decode_standalone(build_name) {
                Ok(Some(decoded)) => decoded,
                Ok(None) => return None,
                Err(e) => {
                    reporter.debug(format!("Skipping {}: {}", path.display(), e));
                    return None;
                }
            };

            let project_dir = dir.join(&project_name);
            let is_build = project_dir.join(PROJECT_BINARIES_DIR).is_dir()
                && project_dir.join(PROJECT_CONTENT_DIR).is_dir();

            is_build.then(|| BuildOutput {
                build_name: build_name.to_string(),
                project_name,
                target,
            })
        })
}
