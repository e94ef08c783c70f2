//! Plugin discovery and effective enablement
//!
//! The effective plugin set of a project combines three inputs:
//!
//! 1. plugins found under the project's `Plugins/` directory (enabled by default)
//! 2. plugins found under the engine's `Engine/Plugins/` directory (disabled by default)
//! 3. the `Plugins` array of the `.uproject`, which flips enablement
//!
//! Name collisions between 1 and 2 are resolved in favour of the engine
//! entry, which is inserted last, and are always reported.
//!
//! # Examples
//!
//! ```no_run
//! use uet::plugins::PluginRegistry;
//! use uet::project::Project;
//! use uet::report::Reporter;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let reporter = Reporter::silent();
//! let project = Project::open("/work/Shooter", &reporter)?.expect("project root");
//! let registry = PluginRegistry::load(&project, None, 16, &reporter)?;
//!
//! if registry.is_plugin_enabled("Niagara") {
//!     println!("Niagara is on");
//! }
//! # Ok(())
//! # }
//! ```

use crate::manifest::{PluginDeclaration, UPlugin};
use crate::project::{dirs_in, files_in, Project};
use crate::report::Reporter;
use crate::{engine, Error, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

const PLUGIN_CONTENT_DIR: &str = "Content";
const PLUGIN_SOURCE_DIR: &str = "Source";

/// Where a plugin was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginSource {
    Engine,
    Project,
}

impl PluginSource {
    fn enabled_by_default(&self) -> bool {
        matches!(self, PluginSource::Project)
    }
}

impl fmt::Display for PluginSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginSource::Engine => f.write_str("Engine"),
            PluginSource::Project => f.write_str("Project"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDescriptor {
    pub name: String,
    /// Path of the `.uplugin` file
    pub path: PathBuf,
    pub enabled: bool,
    pub source: PluginSource,
    /// Mentioned in the project's `Plugins` array
    pub in_project_file: bool,
    /// Has a `Source` or `Content` directory next to the descriptor
    pub valid: bool,
}

pub type PluginMap = BTreeMap<String, PluginDescriptor>;

/// Recursively scan `dir` for plugins
///
/// A directory holding a `.uplugin` file is a plugin and is not descended
/// into; any other directory is searched. With several descriptors in one
/// directory the lexicographically first one is used. Recursing deeper
/// than `max_depth` levels is an error.
pub fn scan(dir: &Path, source: PluginSource, max_depth: usize, reporter: &Reporter) -> Result<PluginMap> {
    let mut plugins = PluginMap::new();
    if dir.is_dir() {
        scan_into(dir, source, 0, max_depth, &mut plugins, reporter)?;
    }
    Ok(plugins)
}

fn scan_into(
    parent: &Path,
    source: PluginSource,
    depth: usize,
    max_depth: usize,
    plugins: &mut PluginMap,
    reporter: &Reporter,
) -> Result<()> {
    if depth > max_depth {
        return Err(Error::ScanDepthExceeded {
            path: parent.to_path_buf(),
            limit: max_depth,
        });
    }

    for plugin_dir in dirs_in(parent)? {
        let descriptors: Vec<PathBuf> = files_in(&plugin_dir)?
            .into_iter()
            .filter(|path| UPlugin::is_descriptor(path))
            .collect();

        let Some(descriptor) = descriptors.first() else {
            scan_into(&plugin_dir, source, depth + 1, max_depth, plugins, reporter)?;
            continue;
        };

        if descriptors.len() > 1 {
            reporter.warn(format!(
                "More than one plugin file in directory '{}', choosing '{}'",
                plugin_dir.display(),
                descriptor.display()
            ));
        }

        let Some(name) = UPlugin::name(descriptor) else {
            continue;
        };

        let valid = is_valid_plugin_directory(&plugin_dir);
        if !valid {
            reporter.warn(format!(
                "Plugin directory seems broken: {}",
                plugin_dir.display()
            ));
        }

        let plugin = PluginDescriptor {
            name: name.clone(),
            path: descriptor.clone(),
            enabled: source.enabled_by_default(),
            source,
            in_project_file: false,
            valid,
        };

        if let Some(previous) = plugins.insert(name.clone(), plugin) {
            reporter.warn(format!(
                "Plugin {} found twice, '{}' replaces '{}'",
                name,
                descriptor.display(),
                previous.path.display()
            ));
        }
    }

    Ok(())
}

/// A plugin directory needs a `Source` or `Content` subdirectory
pub fn is_valid_plugin_directory(dir: &Path) -> bool {
    dir.join(PLUGIN_CONTENT_DIR).is_dir() || dir.join(PLUGIN_SOURCE_DIR).is_dir()
}

/// Effective plugin set of a project
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginRegistry {
    plugins: PluginMap,
}

impl PluginRegistry {
    pub fn from_plugins(plugins: PluginMap) -> Self {
        Self { plugins }
    }

    /// Combine project and engine scans; engine entries overwrite
    /// same-named project entries
    pub fn merge(project: PluginMap, engine: PluginMap, reporter: &Reporter) -> Self {
        let common: Vec<&str> = project
            .keys()
            .filter(|name| engine.contains_key(*name))
            .map(String::as_str)
            .collect();
        if !common.is_empty() {
            reporter.warn(format!(
                "Duplicated plugins in project and in engine, using the engine ones: {}",
                common.join(", ")
            ));
        }

        let mut plugins = project;
        plugins.extend(engine);
        Self { plugins }
    }

    /// Scan project and engine plugins and apply the project file on top
    pub fn load(
        project: &Project,
        engine_root: Option<&Path>,
        max_depth: usize,
        reporter: &Reporter,
    ) -> Result<Self> {
        let project_plugins = scan(&project.plugins_path(), PluginSource::Project, max_depth, reporter)?;
        let engine_plugins = match engine_root {
            Some(root) => scan(&engine::plugins_path(root), PluginSource::Engine, max_depth, reporter)?,
            None => PluginMap::new(),
        };

        let mut registry = Self::merge(project_plugins, engine_plugins, reporter);
        let declarations = project.uproject.plugin_declarations(reporter);
        registry.apply_declarations(&declarations, &project.file.display().to_string(), reporter);
        Ok(registry)
    }

    /// Overlay the project file's plugin declarations
    ///
    /// Only flips state that differs, so applying the same declarations
    /// again changes nothing. Declarations of unknown plugins are warned
    /// about and skipped.
    pub fn apply_declarations(
        &mut self,
        declarations: &[PluginDeclaration],
        origin: &str,
        reporter: &Reporter,
    ) {
        for declaration in declarations {
            let Some(plugin) = self.plugins.get_mut(&declaration.name) else {
                reporter.warn(format!(
                    "Invalid plugin {} in {}",
                    declaration.name, origin
                ));
                continue;
            };

            plugin.in_project_file = true;
            if plugin.enabled != declaration.enabled {
                plugin.enabled = declaration.enabled;
                reporter.debug(format!(
                    "Setting {} plugin {}",
                    if plugin.enabled { "enabled" } else { "disabled" },
                    plugin.name
                ));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&PluginDescriptor> {
        self.plugins.get(name)
    }

    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    /// `false` for unknown plugins
    pub fn is_plugin_enabled(&self, name: &str) -> bool {
        self.plugins.get(name).map(|p| p.enabled).unwrap_or(false)
    }

    /// Enabled plugins, ordered by name
    pub fn list_enabled(&self) -> Vec<&PluginDescriptor> {
        self.plugins.values().filter(|p| p.enabled).collect()
    }

    /// Disabled plugins, ordered by name
    ///
    /// Without `include_engine_only` only the ones the project file
    /// mentions are listed; with it, every disabled plugin the engine
    /// ships is included as well.
    pub fn list_available(&self, include_engine_only: bool) -> Vec<&PluginDescriptor> {
        self.plugins
            .values()
            .filter(|p| !p.enabled && (include_engine_only || p.in_project_file))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
