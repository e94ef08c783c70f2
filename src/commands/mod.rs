pub mod build;
pub mod clean;
pub mod config;
pub mod info;
pub mod inspect;

use crate::SourceArgs;
use anyhow::Result;
use std::path::PathBuf;
use std::thread;
use uet::context::{self, ContextKind, DirectoryContext};
use uet::platform::{self, HostPlatform, Installations};
use uet::project::Project;
use uet::report::Reporter;
use uet::Config;

/// Everything a command needs, built once in `main`
pub struct Session {
    pub config: Config,
    pub reporter: Reporter,
    pub host: Box<dyn HostPlatform>,
    /// `--onlydebug`: no external effects
    pub dry_run: bool,
}

impl Session {
    pub fn new(config: Config, reporter: Reporter, dry_run: bool) -> Result<Self> {
        let host = platform::current()?;
        reporter.debug(format!("Host platform: {}", host.name()));
        Ok(Self {
            config,
            reporter,
            host,
            dry_run,
        })
    }

    pub fn installations(&self) -> Installations {
        Installations::discover(
            self.host.as_ref(),
            &self.config.engine_installations(),
            &self.reporter,
        )
    }

    /// Resolve the context of the source path, warning when there is none
    pub fn resolve(&self, source: &SourceArgs) -> Result<Option<DirectoryContext>> {
        let path = source_path(source)?;
        let ctx = context::resolve(&path, self.host.as_ref(), &self.reporter)?;
        if ctx.is_none() {
            self.reporter.warn(format!(
                "Unreal Engine project, build or engine not found from {}",
                path.display()
            ));
        }
        Ok(ctx)
    }

    /// Resolve and open a project, warning for any other context kind
    pub fn resolve_project(&self, source: &SourceArgs, action: &str) -> Result<Option<Project>> {
        let Some(ctx) = self.resolve(source)? else {
            return Ok(None);
        };

        if ctx.kind != ContextKind::Project {
            self.reporter.warn(format!(
                "Can only {} a project, found {} at {}",
                action,
                ctx.kind,
                ctx.root.display()
            ));
            return Ok(None);
        }

        Ok(Project::open(&ctx.root, &self.reporter)?)
    }

    /// Engine root of a project, warning when it can't be found
    pub fn project_engine_root(&self, project: &Project, installations: &Installations) -> Option<PathBuf> {
        let Some(engine_id) = project.engine_id() else {
            self.reporter
                .warn(format!("{} has no EngineAssociation", project.file.display()));
            return None;
        };

        let root = installations.find_root(&engine_id, &self.reporter);
        if root.is_none() {
            self.reporter
                .warn(uet::Error::EngineNotFound(format!(" for '{}'", engine_id)).to_string());
        }
        root
    }
}

/// `--source` wins over the positional path; the current directory is
/// the fallback
pub fn source_path(source: &SourceArgs) -> Result<PathBuf> {
    match source.source.as_ref().or(source.shell_source.as_ref()) {
        Some(path) => Ok(PathBuf::from(shellexpand::tilde(path).into_owned())),
        None => Ok(std::env::current_dir()?),
    }
}

/// Exit cleanly on the first Ctrl-C
pub fn install_interrupt_handler() {
    thread::spawn(|| {
        let Ok(runtime) = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        else {
            return;
        };

        runtime.block_on(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                println!();
                println!("Interrupted by user");
                std::process::exit(0);
            }
        });
    });
}
