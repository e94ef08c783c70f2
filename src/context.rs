//! Directory context resolution
//!
//! Given any path inside a project, a packaged build or an engine tree,
//! walk up the directory hierarchy until one of the classifiers matches.
//! At each level the order is fixed: Project, then BuildOutput, then
//! Engine. A directory that looks like both a project and an engine root
//! is a project.
//!
//! # Examples
//!
//! ```no_run
//! use uet::context::{self, ContextKind};
//! use uet::platform;
//! use uet::report::Reporter;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let reporter = Reporter::silent();
//! let host = platform::current()?;
//!
//! match context::resolve("Source/Shooter/Private", host.as_ref(), &reporter)? {
//!     Some(ctx) if ctx.kind == ContextKind::Project => println!("project at {}", ctx.root.display()),
//!     Some(ctx) => println!("{} at {}", ctx.kind, ctx.root.display()),
//!     None => println!("not inside anything Unreal"),
//! }
//! # Ok(())
//! # }
//! ```

use crate::build_output;
use crate::engine::is_engine_root;
use crate::platform::HostPlatform;
use crate::project::is_project_root;
use crate::report::Reporter;
use crate::Result;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextKind {
    Project,
    BuildOutput,
    Engine,
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContextKind::Project => "project",
            ContextKind::BuildOutput => "build",
            ContextKind::Engine => "engine",
        };
        f.write_str(name)
    }
}

/// A classified root directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryContext {
    pub kind: ContextKind,
    pub root: PathBuf,
}

/// Classify a single directory
pub fn classify(dir: &Path, host: &dyn HostPlatform, reporter: &Reporter) -> Result<Option<ContextKind>> {
    if is_project_root(dir)? {
        return Ok(Some(ContextKind::Project));
    }
    if build_output::detect(dir, host, reporter).is_some() {
        return Ok(Some(ContextKind::BuildOutput));
    }
    if is_engine_root(dir) {
        return Ok(Some(ContextKind::Engine));
    }
    Ok(None)
}

/// Find the nearest enclosing root of `path` (inclusive)
///
/// `Ok(None)` when nothing matches up to the filesystem root or the path
/// does not exist; that is a normal outcome, not an error.
pub fn resolve<P: AsRef<Path>>(
    path: P,
    host: &dyn HostPlatform,
    reporter: &Reporter,
) -> Result<Option<DirectoryContext>> {
    let path = path.as_ref();
    reporter.debug(format!("Input SourcePath: {}", path.display()));

    let start = match dunce::canonicalize(path) {
        Ok(start) => start,
        Err(e) => {
            reporter.warn(format!("SourcePath is invalid: {} ({})", path.display(), e));
            return Ok(None);
        }
    };

    let mut current = if start.is_dir() {
        start.as_path()
    } else {
        match start.parent() {
            Some(parent) => parent,
            None => return Ok(None),
        }
    };

    loop {
        if let Some(kind) = classify(current, host, reporter)? {
            reporter.debug(format!(
                "Found Unreal Engine {} root directory, using it '{}'",
                kind,
                current.display()
            ));
            return Ok(Some(DirectoryContext {
                kind,
                root: current.to_path_buf(),
            }));
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => break,
        }
    }

    reporter.debug(format!("No Unreal Engine root above {}", start.display()));
    Ok(None)
}
