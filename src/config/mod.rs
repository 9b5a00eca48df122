// Configuration module

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::resize::{ImageConfig, OutputFormat};

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Environment variable '{0}' is referenced but not set")]
    MissingEnvVar(String),

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fonts: FontsConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where family font files live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontsConfig {
    #[serde(default = "default_fonts_dir")]
    pub dir: PathBuf,
}

impl Default for FontsConfig {
    fn default() -> Self {
        Self {
            dir: default_fonts_dir(),
        }
    }
}

fn default_fonts_dir() -> PathBuf {
    PathBuf::from("fonts")
}

/// Output encoding defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_quality")]
    pub quality: u8,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            quality: default_quality(),
        }
    }
}

fn default_quality() -> u8 {
    95
}

/// Input and output size limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_max_dimension")]
    pub max_width: u32,
    #[serde(default = "default_max_dimension")]
    pub max_height: u32,
    #[serde(default = "default_max_pixels")]
    pub max_pixels: u64,
    /// Maximum encoded input size in bytes (16 MiB)
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_width: default_max_dimension(),
            max_height: default_max_dimension(),
            max_pixels: default_max_pixels(),
            max_input_bytes: default_max_input_bytes(),
        }
    }
}

fn default_max_dimension() -> u32 {
    8192
}

fn default_max_pixels() -> u64 {
    50_000_000
}

fn default_max_input_bytes() -> usize {
    16 * 1024 * 1024
}

/// Log output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by RUST_LOG
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn from_yaml_with_env(yaml: &str) -> Result<Self, ConfigError> {
        // Replace ${VAR_NAME} with environment variable values
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        let mut missing = None;
        let substituted = re.replace_all(yaml, |caps: &regex::Captures| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    missing.get_or_insert_with(|| var_name.to_string());
                    String::new()
                }
            }
        });
        if let Some(var_name) = missing {
            return Err(ConfigError::MissingEnvVar(var_name));
        }

        // An empty document means "all defaults"
        if substituted.trim().is_empty() {
            return Ok(Config::default());
        }

        let config: Config = serde_yaml::from_str(&substituted)?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_with_env(&yaml)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.quality == 0 || self.output.quality > 100 {
            return Err(ConfigError::Invalid(format!(
                "output.quality must be between 1 and 100, got {}",
                self.output.quality
            )));
        }

        if self.limits.max_width == 0 || self.limits.max_height == 0 {
            return Err(ConfigError::Invalid(
                "limits.max_width and limits.max_height must be greater than 0".to_string(),
            ));
        }

        if self.limits.max_pixels == 0 {
            return Err(ConfigError::Invalid(
                "limits.max_pixels must be greater than 0".to_string(),
            ));
        }

        if self.limits.max_input_bytes == 0 {
            return Err(ConfigError::Invalid(
                "limits.max_input_bytes must be greater than 0".to_string(),
            ));
        }

        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "logging.level cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Limits and output defaults for the resize stage
    pub fn image_config(&self) -> ImageConfig {
        ImageConfig {
            max_width: self.limits.max_width,
            max_height: self.limits.max_height,
            max_pixels: self.limits.max_pixels,
            max_input_bytes: self.limits.max_input_bytes,
            default_format: self.output.format,
            default_quality: self.output.quality,
        }
    }
}
