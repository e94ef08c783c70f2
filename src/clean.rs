//! Removal of generated directories from a project tree

use crate::report::Reporter;
use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const DEFAULT_CLEAN_DIRS: [&str; 3] = ["Binaries", "Intermediate", "Saved"];

/// Directories under `root` (inclusive of nested plugins) named like one
/// of `names`, without descending into the ones that match
pub fn find_clean_targets(root: &Path, names: &[String]) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    let mut walker = WalkDir::new(root).min_depth(1).sort_by_file_name().into_iter();

    while let Some(entry) = walker.next() {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let matches = entry
            .file_name()
            .to_str()
            .map(|name| names.iter().any(|n| n == name))
            .unwrap_or(false);
        if matches {
            found.push(entry.into_path());
            walker.skip_current_dir();
        }
    }

    Ok(found)
}

/// Remove the matching directories; with `dry_run` only report them
pub fn clean(root: &Path, names: &[String], dry_run: bool, reporter: &Reporter) -> Result<Vec<PathBuf>> {
    let targets = find_clean_targets(root, names)?;
    if targets.is_empty() {
        reporter.info(format!("Nothing to clean in {}", root.display()));
    }

    for dir in &targets {
        if dry_run {
            reporter.debug(format!("Would remove {}", dir.display()));
        } else {
            reporter.info(format!("Removing {}", dir.display()));
            fs::remove_dir_all(dir)?;
        }
    }

    Ok(targets)
}
