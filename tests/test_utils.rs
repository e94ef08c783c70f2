//! Test utilities and fixtures for uet integration tests.
//!
//! A [`TestWorkspace`] is an isolated temporary tree holding a fake home
//! directory, a uet config directory, an engine installation and a
//! project associated with it.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const PROJECT_NAME: &str = "Shooter";
pub const ENGINE_ID: &str = "5.3";

const VERSION_HEADER: &str = r#"#pragma once

#define ENGINE_MAJOR_VERSION	5
#define ENGINE_MINOR_VERSION	3
#define ENGINE_PATCH_VERSION	2
"#;

/// Isolated home, config, engine and project
pub struct TestWorkspace {
    pub temp_dir: TempDir,
    pub home_dir: PathBuf,
    pub config_dir: PathBuf,
    pub engine_root: PathBuf,
    pub project_root: PathBuf,
}

impl TestWorkspace {
    /// Engine registered in the uet config, project associated with it
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();

        let workspace = Self {
            home_dir: root.join("home"),
            config_dir: root.join("config"),
            engine_root: root.join("Engines").join("UE_5.3"),
            project_root: root.join("Projects").join(PROJECT_NAME),
            temp_dir,
        };

        fs::create_dir_all(&workspace.home_dir).expect("Failed to create home directory");
        fs::create_dir_all(&workspace.config_dir).expect("Failed to create config directory");
        workspace.create_engine();
        workspace.create_project(ENGINE_ID);
        workspace.register_engine(ENGINE_ID, &workspace.engine_root);
        workspace
    }

    fn create_engine(&self) {
        for dir in ["Engine/Binaries/Linux", "Engine/Build/BatchFiles/Linux", "Engine/Build/BatchFiles/Mac"] {
            fs::create_dir_all(self.engine_root.join(dir)).expect("Failed to create engine tree");
        }

        let version = self
            .engine_root
            .join("Engine/Source/Runtime/Launch/Resources/Version.h");
        write_file(&version, VERSION_HEADER);

        for script in [
            "Engine/Build/BatchFiles/Linux/Build.sh",
            "Engine/Build/BatchFiles/Mac/Build.sh",
            "Engine/Build/BatchFiles/Build.bat",
        ] {
            write_file(&self.engine_root.join(script), "#!/bin/sh\nexit 0\n");
        }

        self.add_engine_plugin("FX/Niagara", "Niagara");
        self.add_engine_plugin("Editor/ModelingToolsEditorMode", "ModelingToolsEditorMode");
        self.add_engine_plugin("Online/OnlineSubsystem", "OnlineSubsystem");
    }

    /// Project with Editor and Game targets and one project plugin
    pub fn create_project(&self, engine_association: &str) {
        let uproject = format!(
            r#"{{
    "FileVersion": 3,
    "EngineAssociation": "{}",
    "Category": "",
    "Description": "Test project for uet integration tests",
    "Modules": [],
    "Plugins": [
        {{ "Name": "Niagara", "Enabled": true }},
        {{ "Name": "OnlineSubsystem", "Enabled": false }},
        {{ "Name": "Missing", "Enabled": true }}
    ]
}}"#,
            engine_association
        );
        write_file(&self.project_file(), &uproject);

        for target in ["Shooter.Target.cs", "ShooterEditor.Target.cs"] {
            write_file(&self.project_root.join("Source").join(target), "// target");
        }
        write_file(&self.project_root.join("Source/Shooter/Shooter.Build.cs"), "// module");

        self.add_project_plugin("Gameplay/Inventory", "Inventory");

        for dir in ["Binaries/Linux", "Intermediate/Build", "Saved/Logs", "Content/Maps"] {
            fs::create_dir_all(self.project_root.join(dir)).expect("Failed to create project tree");
        }
    }

    pub fn add_engine_plugin(&self, rel: &str, name: &str) {
        create_plugin(&self.engine_root.join("Engine/Plugins").join(rel), name);
    }

    pub fn add_project_plugin(&self, rel: &str, name: &str) {
        create_plugin(&self.project_root.join("Plugins").join(rel), name);
    }

    pub fn register_engine(&self, identifier: &str, root: &Path) {
        let config = format!(
            r#"[[engines]]
identifier = "{}"
path = '{}'

[output]
color = false
"#,
            identifier,
            root.display()
        );
        write_file(&self.config_dir.join("config.toml"), &config);
    }

    pub fn project_file(&self) -> PathBuf {
        self.project_root.join(format!("{}.uproject", PROJECT_NAME))
    }

    /// `uet` with HOME and the config directory pointed into the workspace
    pub fn uet(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_uet"));
        cmd.env("HOME", &self.home_dir)
            .env("USERPROFILE", &self.home_dir)
            .env("UET_CONFIG_DIR", &self.config_dir);
        cmd
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

pub fn create_plugin(dir: &Path, name: &str) {
    fs::create_dir_all(dir.join("Source")).expect("Failed to create plugin directory");
    write_file(
        &dir.join(format!("{}.uplugin", name)),
        r#"{ "FileVersion": 3, "Version": 1, "VersionName": "1.0" }"#,
    );
}

pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(path, content).expect("Failed to write file");
}
