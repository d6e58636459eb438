pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::TimestampFormat;
#[cfg(feature = "cli")]
use crate::utils::error::{DeliveryError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use chrono::NaiveDateTime;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use toml_config::TomlConfig;

/// Command-line overrides. Without any of them the program uses the built-in
/// file names and asks for district and start time interactively.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "delivery-filter")]
#[command(about = "Select delivery orders for one district and a 30-minute window")]
pub struct CliConfig {
    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Input file with one order per line
    #[arg(long)]
    pub input: Option<String>,

    /// Output file, overwritten on every run
    #[arg(long)]
    pub output: Option<String>,

    /// Activity log file, appended on every run
    #[arg(long)]
    pub log_file: Option<String>,

    /// District to select (skips the district prompt)
    #[arg(long)]
    pub district: Option<String>,

    /// Window start in the configured timestamp format (skips the time prompt)
    #[arg(long)]
    pub start: Option<String>,

    /// Window length in minutes
    #[arg(long)]
    pub window_minutes: Option<u32>,

    /// Never prompt; use configured defaults and overrides only
    #[arg(long)]
    pub non_interactive: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Built-in defaults, then the TOML file if one was given, then the
    /// command-line overrides; the result is validated.
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(input) = &self.input {
            config.files.input = input.clone();
        }
        if let Some(output) = &self.output {
            config.files.output = output.clone();
        }
        if let Some(log) = &self.log_file {
            config.files.log = log.clone();
        }
        if let Some(district) = &self.district {
            config.filter.district = district.clone();
        }
        if let Some(minutes) = self.window_minutes {
            config.filter.window_minutes = minutes;
        }
        if self.non_interactive {
            config.prompt.enabled = false;
        }
    }

    pub fn start_override(&self, format: &TimestampFormat) -> Result<Option<NaiveDateTime>> {
        match &self.start {
            None => Ok(None),
            Some(text) => format
                .parse_exact(text.trim())
                .map(Some)
                .ok_or_else(|| DeliveryError::InvalidConfigValueError {
                    field: "--start".to_string(),
                    value: text.clone(),
                    reason: format!("Expected format {}", format.pattern()),
                }),
        }
    }
}
