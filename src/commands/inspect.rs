use super::Session;
use crate::SourceArgs;
use anyhow::Result;
use std::path::Path;
use uet::build_output;
use uet::context::ContextKind;
use uet::engine::EngineVersion;
use uet::plugins::{PluginDescriptor, PluginRegistry, PluginSource};
use uet::project::Project;

/// Which plugin lists `inspect` prints for a project
#[derive(Debug, Clone, Copy, Default)]
pub struct PluginListing {
    pub enabled: bool,
    /// Disabled plugins the project file mentions
    pub project_disabled: bool,
    /// Every disabled plugin
    pub all_disabled: bool,
}

pub fn run(session: &Session, source: &SourceArgs, listing: PluginListing) -> Result<()> {
    let Some(ctx) = session.resolve(source)? else {
        return Ok(());
    };

    match ctx.kind {
        ContextKind::Project => match Project::open(&ctx.root, &session.reporter)? {
            Some(project) => inspect_project(session, &project, listing),
            None => Ok(()),
        },
        ContextKind::BuildOutput => {
            inspect_build(session, &ctx.root);
            Ok(())
        }
        ContextKind::Engine => {
            inspect_engine(session, &ctx.root);
            Ok(())
        }
    }
}

fn inspect_project(session: &Session, project: &Project, listing: PluginListing) -> Result<()> {
    let reporter = &session.reporter;
    let installations = session.installations();

    reporter.info(format!("Project name: {}", project.name));
    reporter.info(format!("Project root: {}", project.root.display()));
    reporter.debug(format!("Project file: {}", project.file.display()));
    reporter.info(format!(
        "Engine association: {}",
        project.engine_id().unwrap_or_else(|| "none".to_string())
    ));

    let engine_root = session.project_engine_root(project, &installations);
    if let Some(root) = &engine_root {
        reporter.info(format!("Engine root: {}", root.display()));
        reporter.info(format!("Engine version: {}", EngineVersion::from_root(root)));
    }

    let targets: Vec<String> = project
        .build_targets(reporter)
        .iter()
        .map(|t| t.to_string())
        .collect();
    if targets.is_empty() {
        reporter.info("Build targets: none");
    } else {
        reporter.info(format!("Build targets: {}", targets.join(", ")));
    }

    if !listing.enabled {
        return Ok(());
    }

    let registry = PluginRegistry::load(
        project,
        engine_root.as_deref(),
        session.config.plugins.max_scan_depth,
        reporter,
    )?;

    print_plugins(session, "Enabled plugins:", registry.list_enabled());
    if listing.project_disabled || listing.all_disabled {
        print_plugins(
            session,
            "Disabled plugins:",
            registry.list_available(listing.all_disabled),
        );
    }
    Ok(())
}

fn print_plugins(session: &Session, title: &str, plugins: Vec<&PluginDescriptor>) {
    session.reporter.info(title);
    if plugins.is_empty() {
        session.reporter.info("  none");
    }
    for plugin in plugins {
        let suffix = match plugin.source {
            PluginSource::Engine => " (Engine)",
            PluginSource::Project => "",
        };
        session.reporter.info(format!("  {}{}", plugin.name, suffix));
        session
            .reporter
            .debug(format!("    {}", plugin.path.display()));
    }
}

fn inspect_build(session: &Session, root: &Path) {
    let reporter = &session.reporter;
    reporter.info(format!("Build root: {}", root.display()));

    match build_output::detect(root, session.host.as_ref(), reporter) {
        Some(output) => {
            reporter.info(format!("Build name: {}", output.build_name));
            reporter.info(format!("Project name: {}", output.project_name));
            reporter.info(format!("Target: {}", output.target));
        }
        None => reporter.warn(format!("No build executable found in {}", root.display())),
    }
}

fn inspect_engine(session: &Session, root: &Path) {
    let reporter = &session.reporter;
    let installations = session.installations();

    reporter.info(format!("Engine root: {}", root.display()));
    match installations.identifier_of(root, reporter) {
        Some(identifier) => reporter.info(format!("Engine identifier: {}", identifier)),
        None => reporter.info("Engine identifier: not registered"),
    }
    reporter.info(format!("Engine version: {}", EngineVersion::from_root(root)));
}
