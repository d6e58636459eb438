use crate::core::filter::DEFAULT_WINDOW_MINUTES;
use crate::core::{ConfigProvider, TimestampFormat};
use crate::utils::error::{DeliveryError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_INPUT_FILE: &str = "inputFile.txt";
pub const DEFAULT_OUTPUT_FILE: &str = "outputFile.txt";
pub const DEFAULT_LOG_FILE: &str = "loggs.txt";
pub const DEFAULT_DISTRICT: &str = "district1";
pub const DEFAULT_PROMPT_ATTEMPTS: u32 = 3;

pub const LOG_FORMATS: [&str; 2] = ["compact", "json"];

/// Every section and key is optional; a missing file behaves like an empty one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub files: FilesConfig,
    pub filter: FilterConfig,
    pub format: FormatConfig,
    pub prompt: PromptConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    pub input: String,
    pub output: String,
    pub log: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            input: DEFAULT_INPUT_FILE.to_string(),
            output: DEFAULT_OUTPUT_FILE.to_string(),
            log: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub district: String,
    pub window_minutes: u32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            district: DEFAULT_DISTRICT.to_string(),
            window_minutes: DEFAULT_WINDOW_MINUTES,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    pub timestamp: TimestampFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    pub enabled: bool,
    pub max_attempts: u32,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: DEFAULT_PROMPT_ATTEMPTS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: "compact".to_string(),
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DeliveryError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| DeliveryError::ConfigParseError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are
    /// left as written.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("files.input", &self.files.input)?;
        validation::validate_path("files.output", &self.files.output)?;
        validation::validate_path("files.log", &self.files.log)?;
        validation::validate_district("filter.district", &self.filter.district)?;
        validation::validate_range("filter.window_minutes", self.filter.window_minutes, 1, 1440)?;
        validation::validate_timestamp_format("format.timestamp", &self.format.timestamp)?;
        validation::validate_range("prompt.max_attempts", self.prompt.max_attempts, 1, 100)?;
        validation::validate_one_of("logging.format", &self.logging.format, &LOG_FORMATS)?;
        Ok(())
    }

    pub fn default_district(&self) -> &str {
        &self.filter.district
    }

    pub fn prompts_enabled(&self) -> bool {
        self.prompt.enabled
    }

    pub fn json_logging(&self) -> bool {
        self.logging.format == "json"
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.files.input
    }

    fn output_path(&self) -> &str {
        &self.files.output
    }

    fn log_path(&self) -> &str {
        &self.files.log
    }

    fn window_minutes(&self) -> u32 {
        self.filter.window_minutes
    }

    fn timestamp_format(&self) -> &TimestampFormat {
        &self.format.timestamp
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
