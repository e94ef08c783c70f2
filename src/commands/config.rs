use anyhow::Result;
use std::path::Path;
use uet::engine::{is_engine_root, normalize_identifier};
use uet::report::Reporter;
use uet::Config;

pub fn show(config: &Config) -> Result<()> {
    let config_path = Config::default_path()?;

    println!("Config file: {}", config_path.display());
    println!();
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

pub fn add_engine(mut config: Config, identifier: &str, path: &str, reporter: &Reporter) -> Result<()> {
    let expanded = shellexpand::tilde(path).into_owned();
    if !is_engine_root(Path::new(&expanded)) {
        reporter.warn(format!(
            "{} is not a valid engine root directory (expected Engine/Binaries and Engine/Build)",
            expanded
        ));
    }

    config.add_engine(identifier.to_string(), path.to_string());
    config.save()?;

    reporter.info(format!(
        "✓ Registered engine '{}' at {}",
        normalize_identifier(identifier),
        expanded
    ));
    Ok(())
}

pub fn remove_engine(mut config: Config, identifier: &str, reporter: &Reporter) -> Result<()> {
    if !config.remove_engine(identifier) {
        reporter.warn(format!("Engine '{}' is not registered", identifier));
        return Ok(());
    }

    config.save()?;
    reporter.info(format!("✓ Removed engine '{}'", normalize_identifier(identifier)));
    Ok(())
}
