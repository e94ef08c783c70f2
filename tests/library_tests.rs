//! Library-level tests over a full workspace tree.

mod test_utils;

use std::fs;
use test_utils::{create_plugin, write_file, TestWorkspace, ENGINE_ID, PROJECT_NAME};
use uet::build_name::Target;
use uet::context::{self, ContextKind};
use uet::platform::{Installations, UnixFlavor, UnixPlatform};
use uet::plugins::{PluginRegistry, PluginSource};
use uet::project::Project;
use uet::report::{Level, MemorySink, Reporter};
use uet::{Config, EngineVersion, Error};

fn host(ws: &TestWorkspace) -> UnixPlatform {
    UnixPlatform::with_settings_dir(UnixFlavor::Linux, ws.home_dir.join(".config/Epic"))
}

fn config(ws: &TestWorkspace) -> Config {
    Config::load_from(&ws.config_dir.join("config.toml")).unwrap()
}

#[test]
fn test_project_engine_lookup() {
    let ws = TestWorkspace::new();
    let reporter = Reporter::silent();
    let host = host(&ws);

    let ctx = context::resolve(ws.project_root.join("Source"), &host, &reporter)
        .unwrap()
        .unwrap();
    assert_eq!(ctx.kind, ContextKind::Project);

    let project = Project::open(&ctx.root, &reporter).unwrap().unwrap();
    assert_eq!(project.name, PROJECT_NAME);
    assert_eq!(project.build_targets(&reporter), vec![Target::Editor, Target::Game]);

    let installations = Installations::discover(&host, &config(&ws).engine_installations(), &reporter);
    let engine_root = installations
        .find_root(&project.engine_id().unwrap(), &reporter)
        .unwrap();
    assert_eq!(engine_root, ws.engine_root);
    assert_eq!(EngineVersion::from_root(&engine_root).to_string(), "5.3.2");
    assert_eq!(
        installations.identifier_of(&ws.engine_root, &reporter),
        Some(ENGINE_ID.to_string())
    );
}

#[test]
fn test_effective_plugins() {
    let ws = TestWorkspace::new();
    let sink = MemorySink::new();
    let reporter = Reporter::with_sink(Level::Info, false, Box::new(sink.clone()));

    let project = Project::open(&ws.project_root, &reporter).unwrap().unwrap();
    let registry = PluginRegistry::load(&project, Some(&ws.engine_root), 16, &reporter).unwrap();

    assert!(registry.is_plugin_enabled("Inventory"));
    assert!(registry.is_plugin_enabled("Niagara"));
    assert!(!registry.is_plugin_enabled("OnlineSubsystem"));
    assert!(!registry.is_plugin_enabled("ModelingToolsEditorMode"));
    assert!(!registry.has_plugin("Missing"));
    assert!(sink.contents().contains("Invalid plugin Missing in"));

    let niagara = registry.get("Niagara").unwrap();
    assert_eq!(niagara.source, PluginSource::Engine);
    assert!(niagara.in_project_file);

    let enabled: Vec<&str> = registry.list_enabled().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(enabled, vec!["Inventory", "Niagara"]);

    let declared: Vec<&str> = registry
        .list_available(false)
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(declared, vec!["OnlineSubsystem"]);
    assert_eq!(registry.list_available(true).len(), 2);
}

#[test]
fn test_engine_plugin_overrides_project_plugin() {
    let ws = TestWorkspace::new();
    ws.add_project_plugin("Vendor/Niagara", "Niagara");
    let sink = MemorySink::new();
    let reporter = Reporter::with_sink(Level::Info, false, Box::new(sink.clone()));

    let project = Project::open(&ws.project_root, &reporter).unwrap().unwrap();
    let registry = PluginRegistry::load(&project, Some(&ws.engine_root), 16, &reporter).unwrap();

    assert_eq!(registry.get("Niagara").unwrap().source, PluginSource::Engine);
    assert!(sink.contents().contains("Duplicated plugins in project and in engine"));
}

#[test]
fn test_plugins_without_engine() {
    let ws = TestWorkspace::new();
    let reporter = Reporter::silent();

    let project = Project::open(&ws.project_root, &reporter).unwrap().unwrap();
    let registry = PluginRegistry::load(&project, None, 16, &reporter).unwrap();

    assert_eq!(registry.len(), 1);
    assert!(registry.is_plugin_enabled("Inventory"));
}

#[test]
fn test_plugin_scan_depth_is_bounded() {
    let ws = TestWorkspace::new();
    create_plugin(&ws.project_root.join("Plugins/a/b/c/d/e/f"), "Deep");
    let reporter = Reporter::silent();

    let project = Project::open(&ws.project_root, &reporter).unwrap().unwrap();
    let result = PluginRegistry::load(&project, None, 3, &reporter);
    assert!(matches!(result, Err(Error::ScanDepthExceeded { limit: 3, .. })));
}

#[test]
fn test_build_output_context() {
    let ws = TestWorkspace::new();
    let build_root = ws.temp_dir.path().join("Packaged/LinuxServer");
    fs::create_dir_all(build_root.join("Engine/Binaries/Linux")).unwrap();
    fs::create_dir_all(build_root.join("Shooter/Binaries/Linux")).unwrap();
    fs::create_dir_all(build_root.join("Shooter/Content/Paks")).unwrap();
    write_file(&build_root.join("ShooterServer.sh"), "#!/bin/sh\n");

    let reporter = Reporter::silent();
    let host = host(&ws);
    let ctx = context::resolve(build_root.join("Shooter/Content/Paks"), &host, &reporter)
        .unwrap()
        .unwrap();
    assert_eq!(ctx.kind, ContextKind::BuildOutput);

    let output = uet::build_output::detect(&ctx.root, &host, &reporter).unwrap();
    assert_eq!(output.project_name, "Shooter");
    assert_eq!(output.target, Target::Server);
}

#[test]
fn test_source_installations_from_settings() {
    let ws = TestWorkspace::new();
    write_file(
        &ws.home_dir.join(".config/Epic/UnrealEngine/Install.ini"),
        &format!(
            "[Installations]\n{{0A1B-2C3D}}={}\nBroken=/does/not/exist\n",
            ws.engine_root.display()
        ),
    );
    let sink = MemorySink::new();
    let reporter = Reporter::with_sink(Level::Info, false, Box::new(sink.clone()));

    let installations = Installations::discover(&host(&ws), &[], &reporter);
    assert_eq!(installations.source.len(), 1);
    assert_eq!(installations.source["0A1B-2C3D"], ws.engine_root);
    assert!(sink.contents().contains("is not a valid engine root directory"));
}
