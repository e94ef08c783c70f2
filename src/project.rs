//! Project roots and project metadata
//!
//! A project root is a directory holding exactly one `.uproject` file.
//!
//! # Examples
//!
//! ```no_run
//! use uet::project::Project;
//! use uet::report::Reporter;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let reporter = Reporter::silent();
//! if let Some(project) = Project::open("/work/Shooter", &reporter)? {
//!     println!("{} targets: {:?}", project.name, project.build_targets(&reporter));
//! }
//! # Ok(())
//! # }
//! ```

use crate::build_name::{decode, Target};
use crate::manifest::UProject;
use crate::report::Reporter;
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const SOURCE_DIR: &str = "Source";
pub const PLUGINS_DIR: &str = "Plugins";
pub const TARGET_FILE_ENDING: &str = ".Target.cs";

/// The project file directly inside `dir`, if there is exactly one
///
/// More than one `.uproject` is an error rather than a guess. An
/// unreadable directory is simply not a project root.
pub fn find_project_file(dir: &Path) -> Result<Option<PathBuf>> {
    let Ok(files) = files_in(dir) else {
        return Ok(None);
    };

    let mut files = files
        .into_iter()
        .filter(|path| UProject::name(path).is_some())
        .collect::<Vec<_>>();

    match files.len() {
        0 => Ok(None),
        1 => Ok(files.pop()),
        _ => Err(Error::MultipleProjectFiles {
            dir: dir.to_path_buf(),
            files: files
                .iter()
                .filter_map(|f| f.file_name())
                .map(|f| f.to_string_lossy().into_owned())
                .collect(),
        }),
    }
}

/// Whether `dir` is a project root
pub fn is_project_root(dir: &Path) -> Result<bool> {
    Ok(find_project_file(dir)?.is_some())
}

/// An opened project
#[derive(Debug, Clone)]
pub struct Project {
    pub name: String,
    pub root: PathBuf,
    pub file: PathBuf,
    /// Parsed project file; empty when the JSON could not be read
    pub uproject: UProject,
}

impl Project {
    /// Open the project rooted at `root`, `None` if it isn't a project root
    pub fn open<P: AsRef<Path>>(root: P, reporter: &Reporter) -> Result<Option<Self>> {
        let root = root.as_ref();
        let Some(file) = find_project_file(root)? else {
            return Ok(None);
        };

        let name = UProject::name(&file)
            .ok_or_else(|| Error::Other(format!("Invalid project file name: {}", file.display())))?;
        reporter.debug(format!("ProjectFilePath: {}", file.display()));

        let uproject = UProject::load_lenient(&file, reporter);

        Ok(Some(Self {
            name,
            root: root.to_path_buf(),
            file,
            uproject,
        }))
    }

    pub fn engine_id(&self) -> Option<String> {
        self.uproject.engine_id()
    }

    pub fn plugins_path(&self) -> PathBuf {
        self.root.join(PLUGINS_DIR)
    }

    /// `*.Target.cs` files in the project's `Source` directory, sorted
    pub fn target_files(&self) -> Vec<PathBuf> {
        let source = self.root.join(SOURCE_DIR);
        let mut files: Vec<PathBuf> = files_in(&source)
            .unwrap_or_default()
            .into_iter()
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| n.ends_with(TARGET_FILE_ENDING))
                    .unwrap_or(false)
            })
            .collect();
        files.sort();
        files
    }

    /// Targets the project declares, in table order with custom targets last
    pub fn build_targets(&self, reporter: &Reporter) -> Vec<Target> {
        let target_files = self.target_files();
        reporter.debug(format!("Target files: {:?}", target_files));

        let mut targets: Vec<Target> = target_files
            .iter()
            .filter_map(|path| path.file_name().and_then(|n| n.to_str()))
            .filter_map(|name| name.strip_suffix(TARGET_FILE_ENDING))
            .map(|build_name| decode(build_name, &self.name, reporter))
            .collect();

        targets.sort();
        targets.dedup();
        targets
    }

    pub fn has_build_target(&self, target: &Target, reporter: &Reporter) -> bool {
        self.build_targets(reporter).contains(target)
    }
}

/// Regular files directly inside `dir`, sorted by name
pub(crate) fn files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Subdirectories directly inside `dir`, sorted by name
pub(crate) fn dirs_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::UPROJECT_EXTENSION;

    fn project_dir(name: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(format!("{}.{}", name, UPROJECT_EXTENSION)),
            r#"{"FileVersion": 3, "EngineAssociation": "5.3"}"#,
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_find_project_file() {
        let dir = project_dir("Shooter");
        let file = find_project_file(dir.path()).unwrap().unwrap();
        assert_eq!(file.file_name().unwrap(), "Shooter.uproject");
        assert!(is_project_root(dir.path()).unwrap());

        let empty = tempfile::tempdir().unwrap();
        assert!(!is_project_root(empty.path()).unwrap());
    }

    #[test]
    fn test_multiple_project_files_is_an_error() {
        let dir = project_dir("Shooter");
        fs::write(dir.path().join("Other.uproject"), "{}").unwrap();

        match find_project_file(dir.path()) {
            Err(Error::MultipleProjectFiles { files, .. }) => {
                assert_eq!(files, vec!["Other.uproject", "Shooter.uproject"]);
            }
            other => panic!("expected MultipleProjectFiles, got {:?}", other),
        }
    }

    #[test]
    fn test_build_targets() {
        let dir = project_dir("TestProject");
        let source = dir.path().join(SOURCE_DIR);
        fs::create_dir_all(&source).unwrap();
        for file in [
            "TestProjectEditor.Target.cs",
            "TestProject.Target.cs",
            "TestProjectServer.Target.cs",
            "TestProjectBenchmark.Target.cs",
            "TestProject.Build.cs",
        ] {
            fs::write(source.join(file), "// target").unwrap();
        }

        let reporter = Reporter::silent();
        let project = Project::open(dir.path(), &reporter).unwrap().unwrap();
        assert_eq!(project.name, "TestProject");
        assert_eq!(project.engine_id(), Some("5.3".to_string()));

        let targets = project.build_targets(&reporter);
        assert_eq!(
            targets,
            vec![
                Target::Editor,
                Target::Game,
                Target::Server,
                Target::Other("Benchmark".to_string()),
            ]
        );
        assert!(project.has_build_target(&Target::Editor, &reporter));
        assert!(!project.has_build_target(&Target::Client, &reporter));
    }

    #[test]
    fn test_build_targets_not_prefixed_by_project_name() {
        let dir = project_dir("LyraStarterGame");
        let source = dir.path().join(SOURCE_DIR);
        fs::create_dir_all(&source).unwrap();
        for file in ["LyraEditor.Target.cs", "LyraGame.Target.cs", "LyraStarterGameServer.Target.cs"] {
            fs::write(source.join(file), "// target").unwrap();
        }

        let reporter = Reporter::silent();
        let project = Project::open(dir.path(), &reporter).unwrap().unwrap();
        let targets = project.build_targets(&reporter);
        assert_eq!(
            targets,
            vec![
                Target::Server,
                Target::Named("LyraEditor".to_string()),
                Target::Named("LyraGame".to_string()),
            ]
        );

        let commands = crate::builder::plan(
            Path::new("/engine/Build.sh"),
            &project,
            &targets,
            &[crate::selection::Configuration::Development],
            &[crate::selection::BuildPlatform::Linux],
            &crate::builder::BuildOptions::default(),
        );
        let names: Vec<&str> = commands.iter().map(|c| c.build_name.as_str()).collect();
        assert_eq!(names, vec!["LyraStarterGameServer", "LyraEditor", "LyraGame"]);
    }

    #[test]
    fn test_project_without_source_has_no_targets() {
        let dir = project_dir("Blueprint");
        let reporter = Reporter::silent();
        let project = Project::open(dir.path(), &reporter).unwrap().unwrap();
        assert!(project.build_targets(&reporter).is_empty());
    }
}
