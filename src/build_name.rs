//! Build-name codec
//!
//! Unreal Build Tool names a build by appending a target suffix to the
//! project name: `MyGameEditor` is the Editor target of `MyGame`, and the
//! Game target has no suffix at all (`MyGame`).
//!
//! # Examples
//!
//! ```
//! use uet::build_name::{decode_standalone, encode, Target};
//!
//! assert_eq!(encode("MyGame", &Target::Editor), "MyGameEditor");
//! assert_eq!(encode("MyGame", &Target::Game), "MyGame");
//!
//! let (project, target) = decode_standalone("MyGameServer").unwrap().unwrap();
//! assert_eq!(project, "MyGame");
//! assert_eq!(target, Target::Server);
//! ```

use crate::report::Reporter;
use crate::{Error, Result};
use std::fmt;

/// A build target of a project
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
    Editor,
    Game,
    Client,
    Server,
    /// Custom target fragment, e.g. `Benchmark` from `MyGameBenchmark.Target.cs`
    Other(String),
    /// Full build name of a target not prefixed by the project name, e.g.
    /// `LyraEditor` in a project whose file is `LyraStarterGame.uproject`
    Named(String),
}

impl Target {
    /// The four standard target kinds, in table order
    pub const KNOWN: [Target; 4] = [Target::Editor, Target::Game, Target::Client, Target::Server];

    /// Parse a target name; the standard kinds match case-insensitively
    pub fn parse(name: &str) -> Self {
        Self::KNOWN
            .iter()
            .find(|t| t.name().eq_ignore_ascii_case(name))
            .cloned()
            .unwrap_or_else(|| Target::Other(name.to_string()))
    }

    pub fn name(&self) -> &str {
        match self {
            Target::Editor => "Editor",
            Target::Game => "Game",
            Target::Client => "Client",
            Target::Server => "Server",
            Target::Other(name) | Target::Named(name) => name,
        }
    }

    /// Suffix appended to the project name to form the build name
    ///
    /// A [`Target::Named`] target is not built from a suffix; see [`encode`].
    pub fn suffix(&self) -> &str {
        match self {
            Target::Game | Target::Named(_) => "",
            other => other.name(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Target::Other(_) | Target::Named(_))
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        Self::KNOWN.iter().find(|t| t.suffix() == suffix).cloned()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Build name for a project and target
pub fn encode(project_name: &str, target: &Target) -> String {
    match target {
        Target::Named(build_name) => build_name.clone(),
        other => format!("{}{}", project_name, other.suffix()),
    }
}

/// Decode a build name whose project name is already known
///
/// An unknown suffix is not an error: the trailing fragment becomes a
/// [`Target::Other`] and a warning is logged. A build name that doesn't
/// start with the project name is kept whole as a [`Target::Named`].
pub fn decode(build_name: &str, project_name: &str, reporter: &Reporter) -> Target {
    let Some(suffix) = build_name.strip_prefix(project_name) else {
        reporter.debug(format!(
            "Build name '{}' does not start with project name '{}'",
            build_name, project_name
        ));
        return Target::Named(build_name.to_string());
    };

    Target::from_suffix(suffix).unwrap_or_else(|| {
        reporter.warn(format!("Unknown suffix: {}", suffix));
        Target::Other(suffix.to_string())
    })
}

/// Decode a build name without knowing the project name
///
/// Non-empty suffixes are tried in table order (case-insensitive) and the
/// Game target's empty suffix is the fallback. Returns `Ok(None)` for an
/// empty name. A name that is nothing but a suffix (`"Editor"`) could be a
/// project called `Editor` or an Editor target of an unnamed project, so
/// it is reported as [`Error::AmbiguousBuildName`].
pub fn decode_standalone(build_name: &str) -> Result<Option<(String, Target)>> {
    if build_name.is_empty() {
        return Ok(None);
    }

    for target in Target::KNOWN.iter().filter(|t| !t.suffix().is_empty()) {
        let suffix = target.suffix();
        if build_name.eq_ignore_ascii_case(suffix) {
            return Err(Error::AmbiguousBuildName(build_name.to_string()));
        }

        if let Some(project) = strip_suffix_ignore_case(build_name, suffix) {
            return Ok(Some((project.to_string(), target.clone())));
        }
    }

    Ok(Some((build_name.to_string(), Target::Game)))
}

fn strip_suffix_ignore_case<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    let split = name.len().checked_sub(suffix.len())?;
    if !name.is_char_boundary(split) {
        return None;
    }
    let (head, tail) = name.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        assert_eq!(encode("MyProject", &Target::Editor), "MyProjectEditor");
        assert_eq!(encode("MyProject", &Target::Game), "MyProject");
        assert_eq!(encode("MyProject", &Target::Client), "MyProjectClient");
        assert_eq!(encode("MyProject", &Target::Server), "MyProjectServer");
        assert_eq!(encode("MyProject", &Target::parse("editor")), "MyProjectEditor");
        assert_eq!(encode("MyProject", &Target::parse("game")), "MyProject");
    }

    #[test]
    fn test_decode_inverts_encode() {
        let reporter = Reporter::silent();
        for project in ["MyGame", "Shooter", "Editor", "A"] {
            for target in Target::KNOWN.iter() {
                let build_name = encode(project, target);
                assert_eq!(&decode(&build_name, project, &reporter), target);
            }
        }
    }

    #[test]
    fn test_decode_unknown_suffix_is_lenient() {
        let sink = crate::report::MemorySink::new();
        let reporter =
            Reporter::with_sink(crate::report::Level::Info, false, Box::new(sink.clone()));

        let target = decode("MyGameBenchmark", "MyGame", &reporter);
        assert_eq!(target, Target::Other("Benchmark".to_string()));
        assert_eq!(encode("MyGame", &target), "MyGameBenchmark");
        assert!(sink.contents().contains("Unknown suffix: Benchmark"));
    }

    #[test]
    fn test_decode_unprefixed_build_name() {
        let reporter = Reporter::silent();

        let target = decode("LyraEditor", "LyraStarterGame", &reporter);
        assert_eq!(target, Target::Named("LyraEditor".to_string()));
        assert_eq!(target.name(), "LyraEditor");
        assert!(!target.is_known());
        assert_eq!(encode("LyraStarterGame", &target), "LyraEditor");
    }

    #[test]
    fn test_decode_standalone() {
        let cases = [
            ("MyGameEditor", "MyGame", Target::Editor),
            ("MyGame", "MyGame", Target::Game),
            ("MyGameClient", "MyGame", Target::Client),
            ("MyGameServer", "MyGame", Target::Server),
            ("MyGameeditor", "MyGame", Target::Editor),
            ("EditorEditor", "Editor", Target::Editor),
        ];

        for (build_name, project, target) in cases {
            let decoded = decode_standalone(build_name).unwrap();
            assert_eq!(decoded, Some((project.to_string(), target)), "{}", build_name);
        }
    }

    #[test]
    fn test_decode_standalone_edge_cases() {
        assert_eq!(decode_standalone("").unwrap(), None);
        assert!(matches!(
            decode_standalone("Editor"),
            Err(Error::AmbiguousBuildName(_))
        ));
        assert!(matches!(
            decode_standalone("server"),
            Err(Error::AmbiguousBuildName(_))
        ));
    }

    #[test]
    fn test_parse_target() {
        assert_eq!(Target::parse("SERVER"), Target::Server);
        assert_eq!(Target::parse("Benchmark"), Target::Other("Benchmark".to_string()));
        assert!(!Target::parse("Benchmark").is_known());
    }
}
