use clap::{Parser, Subcommand};

use cicerone_domain::config::{Config, ConfigSeverity};

/// cicerone — conversational virtual-guide backend for 360° tours.
#[derive(Debug, Parser)]
#[command(name = "cicerone", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the gateway server (default when no subcommand is given).
    Serve,
    /// Configuration utilities.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Print version information.
    Version,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Parse the config file and report any errors.
    Validate,
    /// Dump the resolved configuration (with defaults) as TOML.
    Show,
}

/// Load the configuration from the path specified by `CICERONE_CONFIG` (or
/// `config.toml` by default).  Returns the parsed [`Config`] and the path
/// that was used.
pub fn load_config() -> anyhow::Result<(Config, String)> {
    let config_path =
        std::env::var("CICERONE_CONFIG").unwrap_or_else(|_| "config.toml".into());

    let config = if std::path::Path::new(&config_path).exists() {
        let raw = std::fs::read_to_string(&config_path)
            .map_err(|e| anyhow::anyhow!("reading {config_path}: {e}"))?;
        toml::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("parsing {config_path}: {e}"))?
    } else {
        Config::default()
    };

    Ok((config, config_path))
}

/// Validate the config and print every issue. Returns false when at least
/// one error-severity issue was found.
pub fn validate(config: &Config, config_path: &str) -> bool {
    let issues = config.validate();
    if issues.is_empty() {
        println!("{config_path}: OK");
        return true;
    }
    for issue in &issues {
        println!("{issue}");
    }
    !issues
        .iter()
        .any(|i| i.severity == ConfigSeverity::Error)
}

/// Print the resolved configuration (defaults applied) as TOML.
pub fn show(config: &Config) {
    match toml::to_string_pretty(config) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("failed to serialize config: {e}"),
    }
}
