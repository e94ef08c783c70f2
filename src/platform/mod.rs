//! Host platform abstraction and engine installation lookup
//!
//! Each operating system stores its engine registrations differently: the
//! Epic launcher writes a JSON manifest everywhere, source builds register
//! themselves in `Install.ini` on Linux/macOS and in the registry on
//! Windows. [`HostPlatform`] hides those differences; [`current`] picks the
//! implementation for the running OS once at startup.
//!
//! # Examples
//!
//! ```no_run
//! use uet::platform::{self, Installations};
//! use uet::report::Reporter;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let reporter = Reporter::silent();
//! let host = platform::current()?;
//! let installations = Installations::discover(host.as_ref(), &[], &reporter);
//!
//! for (id, root) in installations.all(&reporter) {
//!     println!("{} -> {}", id, root.display());
//! }
//! # Ok(())
//! # }
//! ```

mod unix;
mod windows;

pub use unix::{UnixFlavor, UnixPlatform};
pub use windows::WindowsPlatform;

use crate::engine::{is_engine_root, normalize_identifier, EngineInstallation};
use crate::report::Reporter;
use crate::selection::BuildPlatform;
use crate::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const LAUNCHER_DIR_NAME: &str = "UnrealEngineLauncher";
pub const LAUNCHER_FILE_NAME: &str = "LauncherInstalled.dat";
const LAUNCHER_ENGINE_PREFIX: &str = "UE_";

/// Identifier → engine root
pub type InstallationMap = BTreeMap<String, PathBuf>;

/// OS-specific knowledge uet needs from the host
pub trait HostPlatform {
    /// Human-readable platform name
    fn name(&self) -> &str;

    /// Every launcher-installed app, keyed by normalized app name
    fn read_launcher_installations(&self, reporter: &Reporter) -> InstallationMap;

    /// Validated source-build engines, keyed by normalized identifier
    fn read_source_engine_installations(&self, reporter: &Reporter) -> InstallationMap;

    /// Whether a file is a packaged game executable on this host
    fn is_build_executable(&self, path: &Path) -> bool;

    /// Location of the engine build script relative to the engine root
    fn relative_build_file_path(&self) -> PathBuf;

    fn default_build_platform(&self) -> BuildPlatform;

    /// Launcher apps that are engines (`UE_<version>`), validated
    fn launcher_engine_installations(&self, reporter: &Reporter) -> InstallationMap {
        let candidates = self
            .read_launcher_installations(reporter)
            .into_iter()
            .filter_map(|(app_name, location)| {
                app_name
                    .strip_prefix(LAUNCHER_ENGINE_PREFIX)
                    .map(|version| (version.to_string(), location))
            });

        let engines = accept_engine_roots(candidates, reporter);
        reporter.debug(format!("Launcher engine installations found: {:?}", engines));
        engines
    }
}

/// Pick the implementation for the running OS
pub fn current() -> Result<Box<dyn HostPlatform>> {
    match std::env::consts::OS {
        "linux" => Ok(Box::new(UnixPlatform::linux()?)),
        "macos" => Ok(Box::new(UnixPlatform::mac()?)),
        "windows" => Ok(Box::new(WindowsPlatform::new())),
        other => Err(Error::UnsupportedPlatform(other.to_string())),
    }
}

/// Keep the candidates whose path is an engine root
///
/// Identifiers are normalized. Invalid roots are dropped with a warning;
/// one root registered under several identifiers is only logged.
pub(crate) fn accept_engine_roots<I>(candidates: I, reporter: &Reporter) -> InstallationMap
where
    I: IntoIterator<Item = (String, PathBuf)>,
{
    let mut engines = InstallationMap::new();

    for (identifier, root) in candidates {
        if !is_engine_root(&root) {
            reporter.warn(format!(
                "{} is not a valid engine root directory",
                root.display()
            ));
            continue;
        }

        let identifier = normalize_identifier(&identifier);
        if let Some((other, _)) = engines
            .iter()
            .find(|(id, r)| **r == root && **id != identifier)
        {
            reporter.warn(format!(
                "{} is duplicated, name {} (already registered as {})",
                root.display(),
                identifier,
                other
            ));
        }

        engines.insert(identifier, root);
    }

    engines
}

#[derive(Debug, Deserialize)]
struct LauncherManifest {
    #[serde(rename = "InstallationList")]
    installation_list: Option<Vec<LauncherEntry>>,
}

#[derive(Debug, Deserialize)]
struct LauncherEntry {
    #[serde(rename = "AppName", default)]
    app_name: Option<String>,

    #[serde(rename = "InstallLocation", default)]
    install_location: Option<String>,
}

/// Parse a launcher manifest into normalized app name → install location
///
/// Returns `Ok(None)` when the manifest has no `InstallationList`.
pub fn parse_launcher_manifest(content: &str) -> Result<Option<InstallationMap>> {
    let manifest: LauncherManifest = serde_json::from_str(content)?;

    Ok(manifest.installation_list.map(|entries| {
        entries
            .into_iter()
            .filter_map(|entry| match (entry.app_name, entry.install_location) {
                (Some(name), Some(location)) if !name.is_empty() && !location.is_empty() => {
                    Some((normalize_identifier(&name), PathBuf::from(location)))
                }
                _ => None,
            })
            .collect()
    }))
}

/// Read a launcher manifest file; a missing or malformed file means no
/// installations
pub(crate) fn read_launcher_file(path: &Path, reporter: &Reporter) -> InstallationMap {
    reporter.debug(format!("Launcher installations file: {}", path.display()));

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            reporter.debug(format!("Can't read '{}': {}", path.display(), e));
            return InstallationMap::new();
        }
    };

    match parse_launcher_manifest(&content) {
        Ok(Some(installations)) => {
            reporter.debug(format!("Launcher installations found: {:?}", installations));
            installations
        }
        Ok(None) => {
            reporter.info(format!("No launcher installations found at {}", path.display()));
            InstallationMap::new()
        }
        Err(e) => {
            reporter.warn(format!(
                "Can't parse launcher installations file '{}': {}",
                path.display(),
                e
            ));
            InstallationMap::new()
        }
    }
}

/// Engine installations visible to uet, grouped by where they came from
#[derive(Debug, Clone, Default)]
pub struct Installations {
    pub launcher: InstallationMap,
    pub source: InstallationMap,
    pub configured: InstallationMap,
}

impl Installations {
    /// Scan the host stores and validate the engines registered in the
    /// uet config
    pub fn discover(
        host: &dyn HostPlatform,
        configured: &[EngineInstallation],
        reporter: &Reporter,
    ) -> Self {
        let configured = accept_engine_roots(
            configured
                .iter()
                .map(|e| (e.identifier.clone(), e.root.clone())),
            reporter,
        );

        Self {
            launcher: host.launcher_engine_installations(reporter),
            source: host.read_source_engine_installations(reporter),
            configured,
        }
    }

    /// Union of all sources: launcher, then source builds, then config
    /// entries, the later one winning an identifier conflict
    pub fn all(&self, reporter: &Reporter) -> InstallationMap {
        let mut all = InstallationMap::new();

        for (identifier, root) in self
            .launcher
            .iter()
            .chain(self.source.iter())
            .chain(self.configured.iter())
        {
            if let Some(previous) = all.insert(identifier.clone(), root.clone()) {
                if previous != *root {
                    reporter.debug(format!(
                        "Engine {} at {} overrides {}",
                        identifier,
                        root.display(),
                        previous.display()
                    ));
                }
            }
        }

        reporter.debug(format!("All engine installations: {:?}", all));
        all
    }

    /// Engine root for an identifier from a project's `EngineAssociation`
    pub fn find_root(&self, identifier: &str, reporter: &Reporter) -> Option<PathBuf> {
        self.all(reporter).remove(&normalize_identifier(identifier))
    }

    /// Identifier under which an engine root is registered
    ///
    /// Registered paths are compared in canonical form.
    pub fn identifier_of(&self, root: &Path, reporter: &Reporter) -> Option<String> {
        let root = dunce::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
        self.all(reporter)
            .into_iter()
            .find(|(_, r)| dunce::canonicalize(r).map(|r| r == root).unwrap_or(false))
            .map(|(identifier, _)| identifier)
    }

    pub fn is_empty(&self) -> bool {
        self.launcher.is_empty() && self.source.is_empty() && self.configured.is_empty()
    }
}
