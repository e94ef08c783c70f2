//! Engine root classification and engine metadata

use regex::Regex;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const BINARIES_DIR: &str = "Engine/Binaries";
pub const BUILD_DIR: &str = "Engine/Build";
pub const PLUGINS_DIR: &str = "Engine/Plugins";
pub const VERSION_FILE_PATH: &str = "Engine/Source/Runtime/Launch/Resources/Version.h";

/// An engine installation known to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineInstallation {
    /// Launcher build id (`"5.3"`) or normalized source-build GUID
    pub identifier: String,
    pub root: PathBuf,
}

/// Normalize an engine identifier: uppercase, surrounding braces removed
pub fn normalize_identifier(identifier: &str) -> String {
    identifier
        .trim()
        .to_uppercase()
        .trim_start_matches('{')
        .trim_end_matches('}')
        .to_string()
}

/// Whether `path` is the root of an engine installation
pub fn is_engine_root(path: &Path) -> bool {
    path.join(BINARIES_DIR).is_dir() && path.join(BUILD_DIR).is_dir()
}

pub fn plugins_path(root: &Path) -> PathBuf {
    root.join(PLUGINS_DIR)
}

/// Engine version as declared in `Version.h`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineVersion {
    pub major: Option<u32>,
    pub minor: Option<u32>,
    pub patch: Option<u32>,
}

impl EngineVersion {
    /// Read the version of the engine at `root`
    ///
    /// A missing or unreadable header yields an empty version.
    pub fn from_root(root: &Path) -> Self {
        fs::read_to_string(root.join(VERSION_FILE_PATH))
            .map(|content| Self::parse(&content))
            .unwrap_or_default()
    }

    /// Pick the `#define ENGINE_*_VERSION <n>` macros out of a header
    ///
    /// This is token matching, not preprocessing: the first definition of
    /// each macro wins and conditional blocks are ignored.
    pub fn parse(header: &str) -> Self {
        let mut version = Self::default();
        let Ok(re) = Regex::new(r"^\s*#\s*define\s+ENGINE_(MAJOR|MINOR|PATCH)_VERSION\s+(\d+)")
        else {
            return version;
        };

        for caps in header.lines().filter_map(|line| re.captures(line)) {
            let value = caps[2].parse().ok();
            let slot = match &caps[1] {
                "MAJOR" => &mut version.major,
                "MINOR" => &mut version.minor,
                _ => &mut version.patch,
            };
            if slot.is_none() {
                *slot = value;
            }
        }
        version
    }

    pub fn is_known(&self) -> bool {
        self.major.is_some()
    }
}

impl fmt::Display for EngineVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let part = |p: Option<u32>| p.map(|v| v.to_string()).unwrap_or_else(|| "?".to_string());
        write!(f, "{}.{}.{}", part(self.major), part(self.minor), part(self.patch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_identifier() {
        assert_eq!(normalize_identifier("4.27"), "4.27");
        assert_eq!(
            normalize_identifier("{1234abcd-5678-90ef-aaaa-bbbbccccdddd}"),
            "1234ABCD-5678-90EF-AAAA-BBBBCCCCDDDD"
        );
        assert_eq!(normalize_identifier("ue_5.3"), "UE_5.3");
    }

    #[test]
    fn test_is_engine_root() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_engine_root(dir.path()));

        fs::create_dir_all(dir.path().join(BINARIES_DIR)).unwrap();
        assert!(!is_engine_root(dir.path()));

        fs::create_dir_all(dir.path().join(BUILD_DIR)).unwrap();
        assert!(is_engine_root(dir.path()));
    }

    #[test]
    fn test_parse_version_header() {
        let header = r#"
// Copyright Epic Games, Inc. All Rights Reserved.
#pragma once

#define ENGINE_MAJOR_VERSION	5
#define ENGINE_MINOR_VERSION	3
#define ENGINE_PATCH_VERSION	2

#define ENGINE_IS_LICENSEE_VERSION 0
"#;
        let version = EngineVersion::parse(header);
        assert_eq!(version.major, Some(5));
        assert_eq!(version.minor, Some(3));
        assert_eq!(version.patch, Some(2));
        assert_eq!(version.to_string(), "5.3.2");
    }

    #[test]
    fn test_parse_version_first_definition_wins() {
        let header = "#define ENGINE_MAJOR_VERSION 4\n#define ENGINE_MAJOR_VERSION 9\n";
        let version = EngineVersion::parse(header);
        assert_eq!(version.major, Some(4));
        assert_eq!(version.to_string(), "4.?.?");
    }

    #[test]
    fn test_missing_version_file() {
        let dir = tempfile::tempdir().unwrap();
        let version = EngineVersion::from_root(dir.path());
        assert!(!version.is_known());
    }
}
