//! User configuration
//!
//! Configuration is stored in TOML format at `~/.uet/config.toml`.
//!
//! # Examples
//!
//! ```no_run
//! use uet::Config;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = Config::load()?;
//! println!("Default target: {}", config.build.target);
//!
//! config.add_engine("5.3".to_string(), "~/UnrealEngine".to_string());
//! config.save()?;
//! # Ok(())
//! # }
//! ```

use crate::engine::{normalize_identifier, EngineInstallation};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_DIR_ENV: &str = "UET_CONFIG_DIR";
const CONFIG_FILE_NAME: &str = "config.toml";

/// User configuration file (`~/.uet/config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Manually registered engine roots
    #[serde(default)]
    pub engines: Vec<EngineEntry>,

    #[serde(default)]
    pub build: BuildSettings,

    #[serde(default)]
    pub plugins: PluginSettings,

    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineEntry {
    pub identifier: String,
    /// May start with `~`
    pub path: String,
}

/// Defaults for `uet build` when a flag is omitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildSettings {
    #[serde(default = "default_build_target")]
    pub target: String,

    #[serde(default = "default_build_configuration")]
    pub configuration: String,

    /// Host default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

fn default_build_target() -> String {
    "Editor".to_string()
}

fn default_build_configuration() -> String {
    "Development".to_string()
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            target: default_build_target(),
            configuration: default_build_configuration(),
            platform: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginSettings {
    /// Nesting limit of the plugin directory scan
    #[serde(default = "default_max_scan_depth")]
    pub max_scan_depth: usize,
}

fn default_max_scan_depth() -> usize {
    16
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            max_scan_depth: default_max_scan_depth(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_color() -> bool {
    true
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}

impl Config {
    /// Get the default config file path
    ///
    /// Uses UET_CONFIG_DIR if set, otherwise ~/.uet/config.toml
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(config_dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(config_dir).join(CONFIG_FILE_NAME));
        }

        let home = dirs::home_dir()
            .ok_or_else(|| Error::Other("Could not find home directory".to_string()))?;
        Ok(home.join(".uet").join(CONFIG_FILE_NAME))
    }

    /// Load config from the default location, defaults if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Register an engine root, replacing any entry with the same identifier
    pub fn add_engine(&mut self, identifier: String, path: String) {
        let identifier = normalize_identifier(&identifier);
        self.engines.retain(|e| normalize_identifier(&e.identifier) != identifier);
        self.engines.push(EngineEntry { identifier, path });
    }

    /// Returns whether an entry was removed
    pub fn remove_engine(&mut self, identifier: &str) -> bool {
        let identifier = normalize_identifier(identifier);
        let before = self.engines.len();
        self.engines.retain(|e| normalize_identifier(&e.identifier) != identifier);
        self.engines.len() != before
    }

    /// Registered engines with identifiers normalized and `~` expanded
    pub fn engine_installations(&self) -> Vec<EngineInstallation> {
        self.engines
            .iter()
            .map(|e| EngineInstallation {
                identifier: normalize_identifier(&e.identifier),
                root: PathBuf::from(shellexpand::tilde(&e.path).into_owned()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.build.target, "Editor");
        assert_eq!(config.build.configuration, "Development");
        assert_eq!(config.build.platform, None);
        assert_eq!(config.plugins.max_scan_depth, 16);
        assert!(config.output.color);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [build]
            configuration = "Shipping"

            [[engines]]
            identifier = "5.3"
            path = "/opt/UE_5.3"
            "#,
        )
        .unwrap();

        assert_eq!(config.build.target, "Editor");
        assert_eq!(config.build.configuration, "Shipping");
        assert_eq!(config.engines.len(), 1);
        assert!(config.output.color);
    }

    #[test]
    fn test_engine_management() {
        let mut config = Config::default();

        config.add_engine("{abcd-12}".to_string(), "/path/to/source".to_string());
        config.add_engine("5.3".to_string(), "/path/to/ue5.3".to_string());
        config.add_engine("ABCD-12".to_string(), "/path/to/other".to_string());
        assert_eq!(config.engines.len(), 2);

        let installations = config.engine_installations();
        let engine = installations.iter().find(|e| e.identifier == "ABCD-12").unwrap();
        assert_eq!(engine.root, PathBuf::from("/path/to/other"));

        assert!(config.remove_engine("5.3"));
        assert!(!config.remove_engine("5.3"));
        let identifiers: Vec<String> = config
            .engine_installations()
            .into_iter()
            .map(|e| e.identifier)
            .collect();
        assert_eq!(identifiers, vec!["ABCD-12"]);
    }

    #[test]
    fn test_tilde_expansion() {
        let mut config = Config::default();
        config.add_engine("5.4".to_string(), "~/UnrealEngine".to_string());

        let engine = &config.engine_installations()[0];
        assert!(!engine.root.to_string_lossy().starts_with('~'));
        assert!(engine.root.ends_with("UnrealEngine"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.add_engine("5.3".to_string(), "/opt/UE_5.3".to_string());
        config.build.platform = Some("Linux".to_string());
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }
}
