use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialize error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("More than one project file in {}: {}\n\n\
             Hint: A project root must contain exactly one .uproject file.\n\
             Remove or rename the extra files, or point --source at the project you want.",
             .dir.display(), .files.join(", "))]
    MultipleProjectFiles { dir: PathBuf, files: Vec<String> },

    #[error("Unreal Engine installation not found{}\n\n\
             Hint: uet couldn't map the project's EngineAssociation to an installed engine.\n\n\
             Common locations:\n\
             - Windows: C:\\Program Files\\Epic Games\\UE_5.x\n\
             - Linux:   ~/UnrealEngine\n\
             - macOS:   /Users/Shared/Epic Games/UE_5.x\n\n\
             Solutions:\n\
             1. Run 'uet info' to list the installations uet can see\n\
             2. Register the engine manually:\n\
                uet config add-engine \"5.3\" \"/path/to/UE_5.3\"\n\
             3. Verify your .uproject has a valid EngineAssociation field",
             .0)]
    EngineNotFound(String),

    #[error("Ambiguous build name '{0}': it is both a project name and a target suffix\n\n\
             Hint: pass the project name explicitly so the target can be decoded.")]
    AmbiguousBuildName(String),

    #[error("Invalid build configuration: {0}")]
    BuildConfig(String),

    #[error("Build failed for {target} (exit code: {})\n{stderr}",
            .code.map(|c| c.to_string()).unwrap_or_else(|| "none".to_string()))]
    Build {
        target: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Plugin scan exceeded depth {limit} at {}\n\n\
             Hint: raise [plugins] max_scan_depth in the uet config if this tree is legitimate.",
             .path.display())]
    ScanDepthExceeded { path: PathBuf, limit: usize },

    #[error("Unsupported host platform: {0}")]
    UnsupportedPlatform(String),

    #[error("{0}")]
    Other(String),
}
