//! Configuration management for qr-batch
//!
//! Config stored at: ~/.config/qr-batch/config.json

use std::path::{Path, PathBuf};

use qr_batch_infra::qr_renderer::{image_side, MAX_SYMBOL_MODULES};
use qr_batch_types::{ConfigError, EncodingOptions, MissingFieldPolicy, OutputFormat, Result};
use serde::{Deserialize, Serialize};

use crate::constants::{
    APP_NAME, CONFIG_FILE_NAME, DEFAULT_ID_FIELD, DEFAULT_INPUT, DEFAULT_INPUT_ENCODING,
    DEFAULT_NAME_FIELD, DEFAULT_OUTPUT_DIR,
};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// CSV file to read
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Directory receiving one PNG per record
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Column encoded into the QR code and used as the file name
    #[serde(default = "default_id_field")]
    pub id_field: String,

    /// Column reported alongside the identifier
    #[serde(default = "default_name_field")]
    pub name_field: String,

    /// WHATWG encoding label of the input file
    #[serde(default = "default_input_encoding")]
    pub input_encoding: String,

    #[serde(default)]
    pub encoding: EncodingOptions,

    #[serde(default)]
    pub on_missing_field: MissingFieldPolicy,

    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,
}

fn default_input() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT)
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_id_field() -> String {
    DEFAULT_ID_FIELD.to_string()
}

fn default_name_field() -> String {
    DEFAULT_NAME_FIELD.to_string()
}

fn default_input_encoding() -> String {
    DEFAULT_INPUT_ENCODING.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: default_input(),
            output_dir: default_output_dir(),
            id_field: default_id_field(),
            name_field: default_name_field(),
            input_encoding: default_input_encoding(),
            encoding: EncodingOptions::default(),
            on_missing_field: MissingFieldPolicy::default(),
            output_format: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join(APP_NAME);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load config from the default location, or fall back to defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from `path`, or fall back to defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the converter cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.id_field.is_empty() {
            return Err(invalid("id_field", "must not be empty"));
        }
        if self.name_field.is_empty() {
            return Err(invalid("name_field", "must not be empty"));
        }
        if self.encoding.module_scale == 0 {
            return Err(invalid("encoding.module_scale", "must be at least 1"));
        }
        // sized for the largest symbol so no record can fail on image size
        if let Err(e) = image_side(MAX_SYMBOL_MODULES, &self.encoding) {
            return Err(invalid("encoding.border/module_scale", &e.to_string()));
        }
        if !(1..=40).contains(&self.encoding.min_version) {
            return Err(invalid("encoding.min_version", "must be between 1 and 40"));
        }
        Ok(())
    }
}

fn invalid(key: &str, reason: &str) -> qr_batch_types::Error {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "QR Batch Configuration")?;
        writeln!(f, "======================")?;
        writeln!(f)?;
        writeln!(f, "Input:            {}", self.input.display())?;
        writeln!(f, "Input encoding:   {}", self.input_encoding)?;
        writeln!(f, "Output dir:       {}", self.output_dir.display())?;
        writeln!(f, "ID field:         {}", self.id_field)?;
        writeln!(f, "Name field:       {}", self.name_field)?;
        writeln!(f, "Missing field:    {}", self.on_missing_field)?;
        writeln!(f, "Output format:    {}", self.output_format)?;
        writeln!(f)?;
        writeln!(f, "Error correction: {}", self.encoding.error_correction)?;
        writeln!(f, "Min version:      {}", self.encoding.min_version)?;
        writeln!(f, "Auto fit:         {}", self.encoding.auto_fit)?;
        writeln!(f, "Module scale:     {} px", self.encoding.module_scale)?;
        writeln!(f, "Border:           {} modules", self.encoding.border)?;

        Ok(())
    }
}
