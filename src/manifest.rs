//! Unreal Engine descriptor files (.uproject, .uplugin)
//!
//! Only the parts of a `.uproject` that uet acts on are modelled: the
//! engine association and the plugin declarations. Plugin descriptors are
//! identified by file name alone; their content is never parsed.
//!
//! # Examples
//!
//! ```
//! use uet::manifest::UProject;
//! use uet::report::Reporter;
//!
//! let uproject = UProject::parse(r#"{
//!     "EngineAssociation": "{1234abcd-0000-0000-0000-000000000000}",
//!     "Plugins": [{ "Name": "Niagara", "Enabled": true }]
//! }"#).unwrap();
//!
//! assert_eq!(uproject.engine_id().as_deref(), Some("1234ABCD-0000-0000-0000-000000000000"));
//! assert!(uproject.plugin_declarations(&Reporter::silent())[0].enabled);
//! ```

use crate::engine::normalize_identifier;
use crate::report::Reporter;
use crate::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const UPROJECT_EXTENSION: &str = "uproject";
pub const UPLUGIN_EXTENSION: &str = "uplugin";

/// Unreal Engine project file (.uproject)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UProject {
    #[serde(rename = "EngineAssociation", default)]
    pub engine_association: Option<String>,

    #[serde(rename = "Plugins", default)]
    pub plugins: Vec<UProjectPlugin>,
}

/// Raw plugin entry of a .uproject
///
/// `Enabled` is kept as a raw JSON value because projects in the wild
/// carry both `true` and `"true"`.
#[derive(Debug, Clone, Deserialize)]
pub struct UProjectPlugin {
    #[serde(rename = "Name")]
    pub name: Option<String>,

    #[serde(rename = "Enabled")]
    pub enabled: Option<serde_json::Value>,
}

/// A plugin's enablement as declared in the project file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDeclaration {
    pub name: String,
    pub enabled: bool,
}

impl UProject {
    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load a project file, treating unreadable or malformed JSON as an
    /// empty project
    pub fn load_lenient<P: AsRef<Path>>(path: P, reporter: &Reporter) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(uproject) => uproject,
            Err(e) => {
                reporter.warn(format!(
                    "Can't read project file '{}': {}",
                    path.display(),
                    e
                ));
                Self::default()
            }
        }
    }

    /// Normalized engine identifier from `EngineAssociation`
    pub fn engine_id(&self) -> Option<String> {
        self.engine_association
            .as_deref()
            .map(normalize_identifier)
            .filter(|id| !id.is_empty())
    }

    /// Plugin declarations, skipping entries without a name
    pub fn plugin_declarations(&self, reporter: &Reporter) -> Vec<PluginDeclaration> {
        self.plugins
            .iter()
            .filter_map(|plugin| {
                let name = plugin.name.clone()?;
                let enabled = match &plugin.enabled {
                    None => false,
                    Some(value) => parse_enabled(value).unwrap_or_else(|| {
                        reporter.warn(format!("Wrong status for plugin {}: {}", name, value));
                        false
                    }),
                };
                reporter.debug(format!(
                    "Plugin {} enabled in project file: {}",
                    name, enabled
                ));
                Some(PluginDeclaration { name, enabled })
            })
            .collect()
    }

    /// Project name from the project file name
    pub fn name<P: AsRef<Path>>(path: P) -> Option<String> {
        stem_with_extension(path.as_ref(), UPROJECT_EXTENSION)
    }
}

fn parse_enabled(value: &serde_json::Value) -> Option<bool> {
    match value {
        serde_json::Value::Bool(b) => Some(*b),
        serde_json::Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        serde_json::Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

/// Unreal Engine plugin descriptor (.uplugin)
pub struct UPlugin;

impl UPlugin {
    /// Plugin name from the descriptor file name
    pub fn name<P: AsRef<Path>>(path: P) -> Option<String> {
        stem_with_extension(path.as_ref(), UPLUGIN_EXTENSION)
    }

    pub fn is_descriptor<P: AsRef<Path>>(path: P) -> bool {
        Self::name(path).is_some()
    }
}

fn stem_with_extension(path: &Path, extension: &str) -> Option<String> {
    if path.extension().and_then(|s| s.to_str()) != Some(extension) {
        return None;
    }
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}
