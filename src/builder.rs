//! Build invocation
//!
//! One command per `(platform, configuration, target)` combination, run in
//! that nesting order. The first failing command aborts the rest; commands
//! that already ran are left as they are.

use crate::build_name::{encode, Target};
use crate::project::Project;
use crate::report::{Level, Reporter};
use crate::selection::{BuildPlatform, Configuration};
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;
use std::fmt;
use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const FAILURE_TAIL_LINES: usize = 30;

/// Extra switches passed to every build command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Preprocessor definitions, e.g. `WITH_CHEATS=1`
    pub definitions: Vec<String>,
    pub non_unity: bool,
    pub no_precompiled_headers: bool,
}

/// A fully expanded build invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub build_name: String,
    pub platform: BuildPlatform,
    pub configuration: Configuration,
}

impl fmt::Display for BuildCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

impl BuildCommand {
    /// Short label used in progress and error messages
    pub fn label(&self) -> String {
        format!("{} {} {}", self.build_name, self.platform, self.configuration)
    }
}

/// Arguments of one build script invocation
pub fn command_args(
    build_name: &str,
    platform: BuildPlatform,
    configuration: Configuration,
    project_file: &Path,
    options: &BuildOptions,
) -> Vec<String> {
    let mut args = vec![
        build_name.to_string(),
        platform.to_string(),
        configuration.to_string(),
        project_file.display().to_string(),
    ];

    if !options.definitions.is_empty() {
        args.push(format!("-define:{}", options.definitions.join(" ")));
    }
    if options.non_unity {
        args.push("-DisableUnity".to_string());
    }
    if options.no_precompiled_headers {
        args.push("-NoSharedPCH".to_string());
        args.push("-NoPCH".to_string());
    }

    args
}

/// Expand the selections into commands: platforms, then configurations,
/// then targets
pub fn plan(
    build_script: &Path,
    project: &Project,
    targets: &[Target],
    configurations: &[Configuration],
    platforms: &[BuildPlatform],
    options: &BuildOptions,
) -> Vec<BuildCommand> {
    let mut commands = Vec::with_capacity(platforms.len() * configurations.len() * targets.len());

    for &platform in platforms {
        for &configuration in configurations {
            for target in targets {
                let build_name = encode(&project.name, target);
                commands.push(BuildCommand {
                    program: build_script.to_path_buf(),
                    args: command_args(&build_name, platform, configuration, &project.file, options),
                    build_name,
                    platform,
                    configuration,
                });
            }
        }
    }

    commands
}

/// Runs build commands
pub trait BuildExecutor {
    fn execute(&mut self, command: &BuildCommand, reporter: &Reporter) -> Result<()>;
}

/// Run every command in order, stopping at the first failure
pub fn run_all(
    commands: &[BuildCommand],
    executor: &mut dyn BuildExecutor,
    reporter: &Reporter,
) -> Result<()> {
    for command in commands {
        reporter.debug(format!("Build command: {}", command));
        executor.execute(command, reporter)?;
    }
    Ok(())
}

/// Logs commands without running them (`--onlydebug`)
#[derive(Debug, Default)]
pub struct DryRunExecutor;

impl BuildExecutor for DryRunExecutor {
    fn execute(&mut self, command: &BuildCommand, reporter: &Reporter) -> Result<()> {
        reporter.debug(format!("Skipping build of {} (debug only)", command.label()));
        Ok(())
    }
}

/// Spawns the build script and follows its output with a spinner
pub struct ProcessExecutor {
    progress: Option<Regex>,
}

impl ProcessExecutor {
    pub fn new() -> Self {
        Self {
            progress: Regex::new(r"\[(\d+)/(\d+)\]").ok(),
        }
    }

    fn progress_bar(label: &str) -> ProgressBar {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg} [{elapsed_precise}]")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓▒░ ")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.set_message(format!("Building {}...", label));
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

impl Default for ProcessExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildExecutor for ProcessExecutor {
    fn execute(&mut self, command: &BuildCommand, reporter: &Reporter) -> Result<()> {
        let label = command.label();
        reporter.info(format!("Building {}", label));

        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Drained on its own thread so a chatty stderr can't stall stdout
        let stderr_reader = child.stderr.take().map(|mut stderr| {
            thread::spawn(move || {
                let mut buffer = Vec::new();
                let _ = stderr.read_to_end(&mut buffer);
                String::from_utf8_lossy(&buffer).into_owned()
            })
        });

        let pb = Self::progress_bar(&label);
        let start_time = Instant::now();
        let mut output = Vec::new();

        if let Some(stdout) = child.stdout.take() {
            // Output is not always UTF-8; decode lossily and drain to EOF
            let mut reader = BufReader::new(stdout);
            let mut raw = Vec::new();
            loop {
                raw.clear();
                match reader.read_until(b'\n', &mut raw) {
                    Ok(0) => break,
                    Ok(_) => {}
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => {
                        reporter.debug(format!("Stopped reading build output: {}", e));
                        break;
                    }
                }

                let line = String::from_utf8_lossy(&raw)
                    .trim_end_matches(['\n', '\r'])
                    .to_string();
                if let Some((current, total)) = self.progress.as_ref().and_then(|re| parse_build_progress(re, &line)) {
                    pb.set_length(total);
                    pb.set_position(current);
                    pb.set_message("Compiling...");
                }
                if reporter.is_enabled(Level::Debug) {
                    pb.suspend(|| reporter.debug(&line));
                }
                output.push(line);
            }
        }

        let status = child.wait()?;
        let stderr = stderr_reader
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default();

        if !status.success() {
            pb.finish_and_clear();
            reporter.error(format!("Build of {} failed", label));
            output.extend(stderr.lines().map(str::to_string));

            if !output.is_empty() {
                reporter.info(format!("Build output (last {} lines):", FAILURE_TAIL_LINES));
                let start = output.len().saturating_sub(FAILURE_TAIL_LINES);
                for line in &output[start..] {
                    reporter.info(format!("  {}", line));
                }
            }

            return Err(Error::Build {
                target: label,
                code: status.code(),
                stderr,
            });
        }

        pb.finish_with_message(format!(
            "{} built in {:.1}s",
            label,
            start_time.elapsed().as_secs_f32()
        ));
        Ok(())
    }
}

/// `[32/63]` → `(32, 63)`
fn parse_build_progress(re: &Regex, line: &str) -> Option<(u64, u64)> {
    let caps = re.captures(line)?;
    let current = caps.get(1)?.as_str().parse().ok()?;
    let total = caps.get(2)?.as_str().parse().ok()?;
    Some((current, total))
}
