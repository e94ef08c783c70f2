//! Linux and macOS hosts
//!
//! Both keep Epic's settings under the user's home directory:
//! - Linux: `~/.config/Epic`
//! - macOS: `~/Library/Application Support/Epic`
//!
//! Source builds are listed in `UnrealEngine/Install.ini` below that
//! directory, in an `[Installations]` section of `identifier=path` lines.

use super::{
    accept_engine_roots, read_launcher_file, HostPlatform, InstallationMap, LAUNCHER_DIR_NAME,
    LAUNCHER_FILE_NAME,
};
use crate::report::Reporter;
use crate::selection::BuildPlatform;
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

const LINUX_EPIC_SETTINGS_PATH: &str = ".config/Epic";
const MAC_EPIC_SETTINGS_PATH: &str = "Library/Application Support/Epic";
const UE_DIR_NAME: &str = "UnrealEngine";
const UE_CONFIG_NAME: &str = "Install.ini";
const INSTALLATIONS_SECTION: &str = "Installations";
const RELATIVE_BATCH_FILES_PATH: &str = "Engine/Build/BatchFiles";
const SH_EXTENSION: &str = "sh";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnixFlavor {
    Linux,
    Mac,
}

impl UnixFlavor {
    fn name(&self) -> &'static str {
        match self {
            UnixFlavor::Linux => "Linux",
            UnixFlavor::Mac => "Mac",
        }
    }

    fn relative_settings_path(&self) -> &'static str {
        match self {
            UnixFlavor::Linux => LINUX_EPIC_SETTINGS_PATH,
            UnixFlavor::Mac => MAC_EPIC_SETTINGS_PATH,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UnixPlatform {
    flavor: UnixFlavor,
    settings_dir: PathBuf,
}

impl UnixPlatform {
    pub fn linux() -> Result<Self> {
        Self::for_home(UnixFlavor::Linux)
    }

    pub fn mac() -> Result<Self> {
        Self::for_home(UnixFlavor::Mac)
    }

    fn for_home(flavor: UnixFlavor) -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Other("Could not find home directory".to_string()))?;
        Ok(Self::with_settings_dir(
            flavor,
            home.join(flavor.relative_settings_path()),
        ))
    }

    /// Host reading Epic's settings from an explicit directory
    pub fn with_settings_dir(flavor: UnixFlavor, settings_dir: impl Into<PathBuf>) -> Self {
        Self {
            flavor,
            settings_dir: settings_dir.into(),
        }
    }

    pub fn launcher_installations_file_path(&self) -> PathBuf {
        self.settings_dir
            .join(LAUNCHER_DIR_NAME)
            .join(LAUNCHER_FILE_NAME)
    }

    pub fn source_installations_file_path(&self) -> PathBuf {
        self.settings_dir.join(UE_DIR_NAME).join(UE_CONFIG_NAME)
    }
}

impl HostPlatform for UnixPlatform {
    fn name(&self) -> &str {
        self.flavor.name()
    }

    fn read_launcher_installations(&self, reporter: &Reporter) -> InstallationMap {
        read_launcher_file(&self.launcher_installations_file_path(), reporter)
    }

    fn read_source_engine_installations(&self, reporter: &Reporter) -> InstallationMap {
        let path = self.source_installations_file_path();
        reporter.debug(format!("Config: {}", path.display()));

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                reporter.debug(format!("Can't read '{}': {}", path.display(), e));
                return InstallationMap::new();
            }
        };

        let entries = parse_ini_section(&content, INSTALLATIONS_SECTION)
            .into_iter()
            .map(|(name, location)| (name, PathBuf::from(location)));
        let engines = accept_engine_roots(entries, reporter);

        reporter.debug(format!("Source engine installations: {:?}", engines));
        engines
    }

    fn is_build_executable(&self, path: &Path) -> bool {
        path.extension().and_then(|e| e.to_str()) == Some(SH_EXTENSION)
    }

    fn relative_build_file_path(&self) -> PathBuf {
        Path::new(RELATIVE_BATCH_FILES_PATH)
            .join(self.flavor.name())
            .join("Build.sh")
    }

    fn default_build_platform(&self) -> BuildPlatform {
        match self.flavor {
            UnixFlavor::Linux => BuildPlatform::Linux,
            UnixFlavor::Mac => BuildPlatform::Mac,
        }
    }
}

/// Key/value pairs of one INI section, in file order
///
/// Section names compare case-insensitively; `;` and `#` start comment
/// lines. Lines without `=` are ignored.
pub fn parse_ini_section(content: &str, section: &str) -> Vec<(String, String)> {
    let mut in_section = false;
    let mut entries = Vec::new();

    for line in content.lines().map(str::trim) {
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            in_section = name.trim().eq_ignore_ascii_case(section);
            continue;
        }

        if !in_section {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            let (key, value) = (key.trim(), value.trim());
            if !key.is_empty() && !value.is_empty() {
                entries.push((key.to_string(), value.to_string()));
            }
        }
    }

    entries
}
