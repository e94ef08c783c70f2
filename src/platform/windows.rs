//! Windows host
//!
//! Launcher manifest: `C:/ProgramData/Epic/UnrealEngineLauncher/LauncherInstalled.dat`
//! Source builds: `HKEY_CURRENT_USER\SOFTWARE\Epic Games\Unreal Engine\Builds`

use super::{
    read_launcher_file, HostPlatform, InstallationMap, LAUNCHER_DIR_NAME, LAUNCHER_FILE_NAME,
};
use crate::report::Reporter;
use crate::selection::BuildPlatform;
use std::path::{Path, PathBuf};

const EPIC_SETTINGS_PATH: &str = "C:/ProgramData/Epic";
const RELATIVE_BUILD_FILE_PATH: &str = "Engine/Build/BatchFiles/Build.bat";
const EXE_EXTENSION: &str = "exe";

#[derive(Debug, Clone)]
pub struct WindowsPlatform {
    settings_dir: PathBuf,
}

impl WindowsPlatform {
    pub fn new() -> Self {
        Self {
            settings_dir: PathBuf::from(EPIC_SETTINGS_PATH),
        }
    }

    pub fn launcher_installations_file_path(&self) -> PathBuf {
        self.settings_dir
            .join(LAUNCHER_DIR_NAME)
            .join(LAUNCHER_FILE_NAME)
    }
}

impl Default for WindowsPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl HostPlatform for WindowsPlatform {
    fn name(&self) -> &str {
        "Windows"
    }

    fn read_launcher_installations(&self, reporter: &Reporter) -> InstallationMap {
        read_launcher_file(&self.launcher_installations_file_path(), reporter)
    }

    fn read_source_engine_installations(&self, reporter: &Reporter) -> InstallationMap {
        let engines = super::accept_engine_roots(read_registry_builds(reporter), reporter);
        reporter.debug(format!("Source engine installations: {:?}", engines));
        engines
    }

    fn is_build_executable(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case(EXE_EXTENSION))
            .unwrap_or(false)
    }

    fn relative_build_file_path(&self) -> PathBuf {
        PathBuf::from(RELATIVE_BUILD_FILE_PATH)
    }

    fn default_build_platform(&self) -> BuildPlatform {
        BuildPlatform::Win64
    }
}

#[cfg(windows)]
fn read_registry_builds(reporter: &Reporter) -> Vec<(String, PathBuf)> {
    use winreg::enums::*;
    use winreg::RegKey;

    const INSTALLATION_SUB_KEY: &str = "SOFTWARE\\Epic Games\\Unreal Engine\\Builds";

    let hkcu = RegKey::predef(HKEY_CURRENT_USER);
    let builds_key = match hkcu.open_subkey_with_flags(INSTALLATION_SUB_KEY, KEY_READ) {
        Ok(key) => key,
        Err(e) => {
            reporter.warn(format!(
                "Can't open registry key HKEY_CURRENT_USER\\{} because of {}",
                INSTALLATION_SUB_KEY, e
            ));
            return Vec::new();
        }
    };

    builds_key
        .enum_values()
        .filter_map(|v| v.ok())
        .filter_map(|(name, _value)| {
            reporter.debug(&name);
            let path = builds_key.get_value::<String, _>(&name).ok()?;
            (!name.is_empty() && !path.is_empty()).then(|| (name, PathBuf::from(path)))
        })
        .collect()
}

#[cfg(not(windows))]
fn read_registry_builds(_reporter: &Reporter) -> Vec<(String, PathBuf)> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_file_layout() {
        let host = WindowsPlatform::new();
        assert_eq!(
            host.relative_build_file_path(),
            PathBuf::from("Engine/Build/BatchFiles/Build.bat")
        );
        assert!(host.is_build_executable(Path::new("MyGame.exe")));
        assert!(host.is_build_executable(Path::new("MyGame.EXE")));
        assert!(!host.is_build_executable(Path::new("MyGame.sh")));
        assert_eq!(host.default_build_platform(), BuildPlatform::Win64);
    }

    #[test]
    fn test_launcher_file_location() {
        let host = WindowsPlatform::new();
        assert!(host
            .launcher_installations_file_path()
            .ends_with("UnrealEngineLauncher/LauncherInstalled.dat"));
    }
}
