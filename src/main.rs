use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io::IsTerminal;
use uet::report::{Level, Reporter};
use uet::Config;

mod commands;

/// uet - Unreal Engine tools: inspect, build and clean projects
#[derive(Parser)]
#[command(name = "uet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print debug messages
    #[arg(short, long, global = true)]
    debug: bool,

    /// Print debug messages and skip every external effect (no build, no deletion)
    #[arg(short = 'D', long, global = true)]
    onlydebug: bool,

    /// Disable colored output
    #[arg(short = 'g', long, global = true)]
    nocolor: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where to start looking for a project, build or engine root
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Path inside a project, build or engine (current directory if omitted)
    #[arg(value_name = "SHELL_SOURCE")]
    shell_source: Option<String>,

    /// Overrides SHELL_SOURCE
    #[arg(short, long)]
    source: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show what a directory belongs to and what it contains
    Inspect {
        #[command(flatten)]
        source: SourceArgs,

        /// List enabled plugins
        #[arg(short, long)]
        plugins: bool,

        /// Also list disabled plugins mentioned in the project file
        #[arg(long)]
        projectplugins: bool,

        /// Also list every disabled engine plugin
        #[arg(long)]
        allplugins: bool,
    },

    /// Build the project with the engine's build script
    Build {
        #[command(flatten)]
        source: SourceArgs,

        /// Targets to build (Editor, Game, Client, Server, a custom target or "all")
        #[arg(short, long, num_args = 1..)]
        target: Vec<String>,

        /// Configurations (Debug, Development, Test, Shipping or "all")
        #[arg(short, long, num_args = 1..)]
        config: Vec<String>,

        /// Platforms (Win64, Linux, Mac or "all")
        #[arg(short, long, num_args = 1..)]
        platform: Vec<String>,

        /// Preprocessor definitions (e.g. WITH_CHEATS=1)
        #[arg(short = 'e', long, num_args = 1..)]
        definitions: Vec<String>,

        /// Disable unity builds
        #[arg(short = 'u', long)]
        nonunity: bool,

        /// Disable precompiled headers
        #[arg(short = 'i', long)]
        noprecompiledheaders: bool,
    },

    /// List the engine installations uet can see
    Info {
        // Unused: installations don't depend on the working directory
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Delete generated directories from a project
    Clean {
        #[command(flatten)]
        source: SourceArgs,

        /// Directory names to delete
        #[arg(long, num_args = 1.., default_values_t = uet::clean::DEFAULT_CLEAN_DIRS.map(String::from))]
        dirs: Vec<String>,
    },

    /// Manage uet configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,

    /// Register an Unreal Engine installation
    AddEngine {
        /// Engine identifier (e.g. 5.3 or a source build GUID)
        identifier: String,
        /// Path to the engine root
        path: String,
    },

    /// Forget a registered Unreal Engine installation
    RemoveEngine {
        /// Engine identifier to remove
        identifier: String,
    },
}

fn main() {
    let cli = Cli::parse();
    commands::install_interrupt_handler();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let level = if cli.debug || cli.onlydebug {
        Level::Debug
    } else {
        Level::Info
    };
    let color = !cli.nocolor && config.output.color && std::io::stdout().is_terminal();
    let reporter = Reporter::stdout(level, color);

    let result = match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "uet", &mut std::io::stdout());
            Ok(())
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::AddEngine { identifier, path } => {
                commands::config::add_engine(config, &identifier, &path, &reporter)
            }
            ConfigAction::RemoveEngine { identifier } => {
                commands::config::remove_engine(config, &identifier, &reporter)
            }
        },
        command => commands::Session::new(config, reporter, cli.onlydebug).and_then(|session| {
            match command {
                Commands::Inspect {
                    source,
                    plugins,
                    projectplugins,
                    allplugins,
                } => commands::inspect::run(
                    &session,
                    &source,
                    commands::inspect::PluginListing {
                        enabled: plugins || projectplugins || allplugins,
                        project_disabled: projectplugins || allplugins,
                        all_disabled: allplugins,
                    },
                ),
                Commands::Build {
                    source,
                    target,
                    config,
                    platform,
                    definitions,
                    nonunity,
                    noprecompiledheaders,
                } => commands::build::run(
                    &session,
                    &source,
                    commands::build::BuildArgs {
                        targets: target,
                        configurations: config,
                        platforms: platform,
                        definitions,
                        non_unity: nonunity,
                        no_precompiled_headers: noprecompiledheaders,
                    },
                ),
                Commands::Info { .. } => commands::info::run(&session),
                Commands::Clean { source, dirs } => commands::clean::run(&session, &source, &dirs),
                Commands::Completions { .. } | Commands::Config { .. } => Ok(()),
            }
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
