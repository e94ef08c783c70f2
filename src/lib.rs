//! uet - Unreal Engine tools for the command line
//!
//! uet works out what a directory belongs to (a project, a packaged build or
//! an engine tree), finds the engine a project is associated with, computes
//! the project's effective plugin set and drives the engine's build script.
//!
//! - Context resolution from any nested path
//! - Engine lookup across launcher, source-build and user registrations
//! - Plugin discovery with project-file overrides
//! - Sequential builds over target/configuration/platform selections
//!
//! # Examples
//!
//! ```no_run
//! use uet::context::{self, ContextKind};
//! use uet::platform::{self, Installations};
//! use uet::project::Project;
//! use uet::report::Reporter;
//! use uet::Config;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let reporter = Reporter::silent();
//! let host = platform::current()?;
//! let config = Config::load()?;
//!
//! if let Some(ctx) = context::resolve(".", host.as_ref(), &reporter)? {
//!     if ctx.kind == ContextKind::Project {
//!         let project = Project::open(&ctx.root, &reporter)?.expect("project root");
//!         let installations =
//!             Installations::discover(host.as_ref(), &config.engine_installations(), &reporter);
//!         let engine = project
//!             .engine_id()
//!             .and_then(|id| installations.find_root(&id, &reporter));
//!         println!("{} uses {:?}", project.name, engine);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`context`] - Classify directories and walk up to the nearest root
//! - [`project`] - Project roots, project files and build targets
//! - [`engine`] - Engine roots, identifiers and versions
//! - [`build_output`] - Packaged build roots
//! - [`build_name`] - Build name encoding and decoding
//! - [`plugins`] - Plugin scanning and effective enablement
//! - [`platform`] - Host platform abstraction and installation lookup
//! - [`selection`] - Target, configuration and platform selections
//! - [`builder`] - Build command construction and execution
//! - [`clean`] - Generated directory removal
//! - [`manifest`] - `.uproject` parsing
//! - [`config`] - User configuration
//! - [`report`] - Leveled console output
//! - [`error`] - Error types and result handling

pub mod build_name;
pub mod build_output;
pub mod builder;
pub mod clean;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod manifest;
pub mod platform;
pub mod plugins;
pub mod project;
pub mod report;
pub mod selection;

pub use build_name::Target;
pub use config::Config;
pub use context::{ContextKind, DirectoryContext};
pub use engine::{EngineInstallation, EngineVersion};
pub use error::{Error, Result};
pub use manifest::{UPlugin, UProject};
pub use platform::{HostPlatform, Installations};
pub use plugins::{PluginDescriptor, PluginRegistry, PluginSource};
pub use project::Project;
pub use report::{Level, Reporter};
pub use selection::{BuildPlatform, Configuration, Selection};
