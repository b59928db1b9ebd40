// src/config/options.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use super::consts::*;
use crate::error::ConfigError;

/// Everything a run can be configured with. Missing keys in a settings file
/// fall back to the defaults below.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppOptions {
    pub fetch: FetchOptions,
    pub export: ExportOptions,
    /// Keep free-text remarks and report comments in the result sets.
    pub include_comments: bool,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            fetch: FetchOptions::default(),
            export: ExportOptions::default(),
            include_comments: false,
        }
    }
}

impl AppOptions {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let opts: AppOptions = toml::from_str(text)?;
        opts.fetch.validate()?;
        Ok(opts)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

/// Paging and retry policy for the fetch loop.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FetchOptions {
    /// Rows requested per page (`num_page`). A full page means another follows.
    pub batch_size: usize,
    /// Extra attempts per page after a transport failure.
    pub max_retries: u32,
    #[serde(rename = "retry_delay_ms", with = "millis")]
    pub retry_delay: Duration,
    #[serde(rename = "inter_page_delay_ms", with = "millis")]
    pub inter_page_delay: Duration,
    #[serde(rename = "timeout_secs", with = "secs")]
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            batch_size: BATCH_SIZE,
            max_retries: MAX_RETRIES,
            retry_delay: Duration::from_millis(RETRY_DELAY_MS),
            inter_page_delay: Duration::from_millis(REQUEST_PAUSE_MS),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}

impl FetchOptions {
    /// No sleeping at all; for fixtures and tests.
    pub fn immediate() -> Self {
        Self {
            retry_delay: Duration::ZERO,
            inter_page_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Tsv,
    Json,
    Yaml,
    Markdown,
    Table,
    Sql,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
            ExportFormat::Yaml => "yaml",
            ExportFormat::Markdown => "md",
            ExportFormat::Table => "txt",
            ExportFormat::Sql => "sql",
        }
    }

    /// Cell separator for the delimited formats.
    pub fn delimiter(&self) -> Option<char> {
        match self {
            ExportFormat::Csv => Some(','),
            ExportFormat::Tsv => Some('\t'),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Write files here instead of printing to stdout.
    pub out_dir: Option<PathBuf>,
    /// Table name prefix for SQL inserts.
    pub table_prefix: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Table,
            out_dir: None,
            table_prefix: s!(DEFAULT_TABLE_PREFIX),
        }
    }
}

impl ExportOptions {
    pub fn out_dir_or_default(&self) -> PathBuf {
        self.out_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR))
    }
}

mod millis {
    use std::time::Duration;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

mod secs {
    use std::time::Duration;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}
