//! Configuration loading utilities

use crate::schema::Config;
use chrono::NaiveDate;
use sinadef_common::{Result as SinadefResult, SinadefError};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_VAR: &str = "SINADEF_CONFIG_PATH";

/// File names probed in the working directory, in order.
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["sinadef.yaml", "sinadef.yml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        /// Offending variable.
        var: String,
        /// Parse failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration validation error
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for SinadefError {
    fn from(err: ConfigError) -> Self {
        let message = err.to_string();
        Self::config_with_source(message, err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        Self::load_config_with(path, |var| env::var(var).ok())
    }

    /// Like [`ConfigLoader::load_config`], reading overrides through `lookup`.
    pub fn load_config_with<P, F>(path: P, lookup: F) -> Result<Config, ConfigError>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let path = path.as_ref();
        debug!(path = %path.display(), "Reading configuration file");
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;

        apply_overrides(&mut config, lookup)?;
        config.validate()?;

        info!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Parse YAML content; missing keys take their defaults.
    pub fn parse(content: &str) -> Result<Config, ConfigError> {
        // An empty document is valid and means "all defaults".
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load configuration from environment variables and files
    pub fn load() -> SinadefResult<Config> {
        let lookup = |var: &str| env::var(var).ok();
        let config = match Self::discover(&lookup) {
            Some(path) => Self::load_config_with(path, lookup)?,
            None => {
                debug!("No configuration file found, using defaults");
                let mut config = Config::default();
                apply_overrides(&mut config, lookup)?;
                config.validate()?;
                config
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SinadefResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// The file [`ConfigLoader::load`] would read, if any.
    pub fn discover<F>(lookup: F) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup(CONFIG_PATH_VAR).map(PathBuf::from).or_else(|| {
            DEFAULT_CONFIG_FILES
                .iter()
                .map(PathBuf::from)
                .find(|candidate| candidate.exists())
        })
    }
}

fn parse_var<T, F>(lookup: &F, var: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|raw| {
            raw.trim().parse().map_err(|e| ConfigError::EnvParseError {
                var: var.to_string(),
                source: Box::new(e),
            })
        })
        .transpose()
}

/// Apply overrides read through `lookup` (normally the process environment)
pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = lookup("SINADEF_INPUT") {
        config.input.path = PathBuf::from(path);
    }

    if let Some(dir) = lookup("SINADEF_OUTPUT_DIR") {
        config.output.directory = PathBuf::from(dir);
    }

    if let Some(trim) = parse_var(&lookup, "SINADEF_TAIL_TRIM")? {
        config.pipeline.tail_trim = trim;
    }

    if let Some(window) = parse_var(&lookup, "SINADEF_WINDOW_SIZE")? {
        config.pipeline.window_size = window;
    }

    if let Some(years) = parse_var(&lookup, "SINADEF_YEARS")? {
        config.pipeline.years = years;
    }

    if let Some(date) = parse_var::<NaiveDate, _>(&lookup, "SINADEF_CURRENT_DATE")? {
        config.pipeline.current_date = Some(date);
    }

    if let Some(regions) = lookup("SINADEF_REGIONS") {
        config.regions = regions
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }

    // Logging configuration overrides
    if let Some(level) = lookup("LOG_LEVEL") {
        config.logging.level = level;
    }

    if let Some(file) = lookup("LOG_FILE") {
        config.logging.file = Some(file);
    }

    Ok(())
}
