use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use zipnet_parser::DateConstruction;

use crate::ordering::OrderingPolicy;
use crate::outputs::OutputFormat;
use crate::pipeline::PipelineOptions;

pub const ENV_INPUT: &str = "ZIPNET_INPUT";
pub const ENV_REFERENCE_DATE: &str = "ZIPNET_REFERENCE_DATE";
pub const ENV_ORDERING: &str = "ZIPNET_ORDERING";
pub const ENV_DATE_CONSTRUCTION: &str = "ZIPNET_DATE_CONSTRUCTION";
pub const ENV_DELIMITER: &str = "ZIPNET_DELIMITER";
pub const ENV_FORMAT: &str = "ZIPNET_FORMAT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// Run settings. Layered as TOML file, then environment, then command-line flags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub input: Option<PathBuf>,
    /// Overrides "today" for age computation; `YYYY-MM-DD`.
    pub reference_date: Option<NaiveDate>,
    pub ordering: OrderingPolicy,
    pub date_construction: DateConstruction,
    pub delimiter: char,
    pub format: OutputFormat,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: None,
            reference_date: None,
            ordering: OrderingPolicy::default(),
            date_construction: DateConstruction::default(),
            delimiter: ',',
            format: OutputFormat::default(),
        }
    }
}

fn validate_delimiter(delimiter: char) -> Result<u8, ConfigError> {
    if delimiter.is_ascii() && delimiter != '\n' && delimiter != '\r' && delimiter != '"' {
        Ok(delimiter as u8)
    } else {
        Err(ConfigError::InvalidValue {
            key: "delimiter",
            message: format!(
                "'{}' is not a usable single-byte delimiter",
                delimiter.escape_default()
            ),
        })
    }
}

fn parse_env<T, E>(
    key: &'static str,
    value: &str,
    parse: impl FnOnce(&str) -> Result<T, E>,
) -> Result<T, ConfigError>
where
    E: std::fmt::Display,
{
    parse(value.trim()).map_err(|err| ConfigError::InvalidValue {
        key,
        message: err.to_string(),
    })
}

impl PipelineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: PipelineConfig = toml::from_str(content)?;
        validate_delimiter(config.delimiter)?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Applies `ZIPNET_*` variables found through `lookup` on top of `self`.
    pub fn overlay_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_INPUT).filter(|v| !v.trim().is_empty()) {
            self.input = Some(PathBuf::from(value));
        }
        if let Some(value) = lookup(ENV_REFERENCE_DATE) {
            self.reference_date = Some(parse_env(ENV_REFERENCE_DATE, &value, |v| {
                NaiveDate::parse_from_str(v, "%Y-%m-%d")
            })?);
        }
        if let Some(value) = lookup(ENV_ORDERING) {
            self.ordering = parse_env(ENV_ORDERING, &value, str::parse::<OrderingPolicy>)?;
        }
        if let Some(value) = lookup(ENV_DATE_CONSTRUCTION) {
            self.date_construction =
                parse_env(ENV_DATE_CONSTRUCTION, &value, str::parse::<DateConstruction>)?;
        }
        if let Some(value) = lookup(ENV_DELIMITER) {
            let delimiter = match value.as_str() {
                "\\t" | "\t" | "tab" => '\t',
                other => parse_env(ENV_DELIMITER, other, str::parse::<char>)?,
            };
            validate_delimiter(delimiter)?;
            self.delimiter = delimiter;
        }
        if let Some(value) = lookup(ENV_FORMAT) {
            self.format = parse_env(ENV_FORMAT, &value, str::parse::<OutputFormat>)?;
        }
        Ok(self)
    }

    pub fn overlay_process_env(self) -> Result<Self, ConfigError> {
        self.overlay_env(|key| std::env::var(key).ok())
    }

    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        validate_delimiter(self.delimiter)
    }

    /// Resolves the run options, using `today` unless a reference date is configured.
    pub fn pipeline_options(&self, today: NaiveDate) -> Result<PipelineOptions, ConfigError> {
        Ok(PipelineOptions {
            reference_date: self.reference_date.unwrap_or(today),
            ordering: self.ordering,
            date_construction: self.date_construction,
            delimiter: self.delimiter_byte()?,
        })
    }
}
