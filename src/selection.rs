//! Build selections: which targets, configurations and platforms to build
//!
//! The command line accepts one value, several values, or the `all`
//! sentinel for each axis. [`Selection`] captures that shape once and one
//! resolve function per axis turns it into a concrete list.
//!
//! # Examples
//!
//! ```
//! use uet::selection::{resolve_configurations, Configuration, Selection};
//!
//! # fn main() -> uet::Result<()> {
//! let selection = Selection::from_values(&["all".to_string()])?;
//! assert_eq!(resolve_configurations(&selection)?, Configuration::ALL.to_vec());
//!
//! let selection = Selection::from_values(&["shipping".to_string()])?;
//! assert_eq!(resolve_configurations(&selection)?, vec![Configuration::Shipping]);
//! # Ok(())
//! # }
//! ```

use crate::build_name::Target;
use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

const ALL_SENTINEL: &str = "all";

/// One axis of a build request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    Single(T),
    Many(Vec<T>),
    All,
}

impl Selection<String> {
    /// Shape raw command-line values
    pub fn from_values(values: &[String]) -> Result<Self> {
        let has_all = values.iter().any(|v| v.eq_ignore_ascii_case(ALL_SENTINEL));

        match values {
            [] => Err(Error::BuildConfig("no value given".to_string())),
            [_] if has_all => Ok(Selection::All),
            _ if has_all => Err(Error::BuildConfig(format!(
                "'all' cannot be combined with other values: {}",
                values.join(" ")
            ))),
            [single] => Ok(Selection::Single(single.clone())),
            many => Ok(Selection::Many(many.to_vec())),
        }
    }
}

impl<T> Selection<T> {
    /// Resolve against the full value list, validating each literal
    ///
    /// Literals naming the same value collapse to its first occurrence.
    fn resolve<U, F>(&self, all: &[U], mut parse: F) -> Result<Vec<U>>
    where
        U: Clone + PartialEq,
        F: FnMut(&T) -> Result<U>,
    {
        match self {
            Selection::All => Ok(all.to_vec()),
            Selection::Single(value) => Ok(vec![parse(value)?]),
            Selection::Many(values) => {
                let mut resolved = Vec::with_capacity(values.len());
                for value in values {
                    let value = parse(value)?;
                    if !resolved.contains(&value) {
                        resolved.push(value);
                    }
                }
                Ok(resolved)
            }
        }
    }
}

/// Build configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Configuration {
    Debug,
    Development,
    Test,
    Shipping,
}

impl Configuration {
    pub const ALL: [Configuration; 4] = [
        Configuration::Debug,
        Configuration::Development,
        Configuration::Test,
        Configuration::Shipping,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Configuration::Debug => "Debug",
            Configuration::Development => "Development",
            Configuration::Test => "Test",
            Configuration::Shipping => "Shipping",
        }
    }
}

/// Target platform of a build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildPlatform {
    Win64,
    Linux,
    Mac,
}

impl BuildPlatform {
    pub const ALL: [BuildPlatform; 3] = [BuildPlatform::Win64, BuildPlatform::Linux, BuildPlatform::Mac];

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildPlatform::Win64 => "Win64",
            BuildPlatform::Linux => "Linux",
            BuildPlatform::Mac => "Mac",
        }
    }
}

macro_rules! impl_name_parsing {
    ($ty:ty, $what:literal) => {
        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::ALL
                    .iter()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s))
                    .copied()
                    .ok_or_else(|| {
                        let known: Vec<&str> = Self::ALL.iter().map(|v| v.as_str()).collect();
                        Error::BuildConfig(format!(
                            "unknown {} '{}', expected one of: {}",
                            $what,
                            s,
                            known.join(", ")
                        ))
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl_name_parsing!(Configuration, "configuration");
impl_name_parsing!(BuildPlatform, "platform");

/// Targets to build
///
/// `all` means every target the project declares; a literal must be a
/// standard target kind or one of the declared targets, both matched
/// case-insensitively.
pub fn resolve_targets(selection: &Selection<String>, discovered: &[Target]) -> Result<Vec<Target>> {
    if matches!(selection, Selection::All) && discovered.is_empty() {
        return Err(Error::BuildConfig(
            "'all' targets requested but the project declares no *.Target.cs files".to_string(),
        ));
    }

    selection.resolve(discovered, |name| {
        let target = Target::parse(name);
        if target.is_known() {
            return Ok(target);
        }

        if let Some(declared) = discovered.iter().find(|t| t.name().eq_ignore_ascii_case(name)) {
            return Ok(declared.clone());
        }

        let known: Vec<&str> = discovered.iter().map(|t| t.name()).collect();
        Err(Error::BuildConfig(format!(
            "unknown target '{}', available: {}",
            name,
            known.join(", ")
        )))
    })
}

pub fn resolve_configurations(selection: &Selection<String>) -> Result<Vec<Configuration>> {
    selection.resolve(&Configuration::ALL, |name| name.parse())
}

pub fn resolve_platforms(selection: &Selection<String>) -> Result<Vec<BuildPlatform>> {
    selection.resolve(&BuildPlatform::ALL, |name| name.parse())
}
