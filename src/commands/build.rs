use super::Session;
use crate::SourceArgs;
use anyhow::Result;
use uet::builder::{self, BuildExecutor, BuildOptions, DryRunExecutor, ProcessExecutor};
use uet::selection::{resolve_configurations, resolve_platforms, resolve_targets, Selection};

/// Raw build flags; empty lists fall back to the configured defaults
#[derive(Debug, Clone, Default)]
pub struct BuildArgs {
    pub targets: Vec<String>,
    pub configurations: Vec<String>,
    pub platforms: Vec<String>,
    pub definitions: Vec<String>,
    pub non_unity: bool,
    pub no_precompiled_headers: bool,
}

pub fn run(session: &Session, source: &SourceArgs, args: BuildArgs) -> Result<()> {
    let reporter = &session.reporter;
    let Some(project) = session.resolve_project(source, "build")? else {
        return Ok(());
    };

    let installations = session.installations();
    let Some(engine_root) = session.project_engine_root(&project, &installations) else {
        return Ok(());
    };

    let build_script = engine_root.join(session.host.relative_build_file_path());
    if !build_script.is_file() {
        reporter.warn(format!("Build script not found: {}", build_script.display()));
        return Ok(());
    }

    let settings = &session.config.build;
    let targets = or_default(args.targets, &settings.target);
    let configurations = or_default(args.configurations, &settings.configuration);
    let default_platform = settings
        .platform
        .clone()
        .unwrap_or_else(|| session.host.default_build_platform().to_string());
    let platforms = or_default(args.platforms, &default_platform);

    let discovered = project.build_targets(reporter);
    let targets = resolve_targets(&Selection::from_values(&targets)?, &discovered)?;
    let configurations = resolve_configurations(&Selection::from_values(&configurations)?)?;
    let platforms = resolve_platforms(&Selection::from_values(&platforms)?)?;

    reporter.debug(format!(
        "Targets: {:?}, configurations: {:?}, platforms: {:?}",
        targets, configurations, platforms
    ));

    let options = BuildOptions {
        definitions: args.definitions,
        non_unity: args.non_unity,
        no_precompiled_headers: args.no_precompiled_headers,
    };
    let commands = builder::plan(
        &build_script,
        &project,
        &targets,
        &configurations,
        &platforms,
        &options,
    );

    let mut executor: Box<dyn BuildExecutor> = if session.dry_run {
        Box::new(DryRunExecutor)
    } else {
        Box::new(ProcessExecutor::new())
    };
    builder::run_all(&commands, executor.as_mut(), reporter)?;

    if !session.dry_run {
        reporter.info(format!(
            "✓ Built {} ({} command{})",
            project.name,
            commands.len(),
            if commands.len() == 1 { "" } else { "s" }
        ));
    }
    Ok(())
}

fn or_default(values: Vec<String>, default: &str) -> Vec<String> {
    if values.is_empty() {
        vec![default.to_string()]
    } else {
        values
    }
}
