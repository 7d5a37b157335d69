// trips2parquet-config - runtime configuration for the ETL job
//
// Sources, highest priority first:
// 1. CLI overrides applied by the binary
// 2. Config file passed via --config
// 3. Defaults (filesystem storage under ./data)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration and run-parameter failures, raised before any read occurs
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required run parameter '{0}' is missing or empty")]
    MissingParameter(&'static str),

    #[error("storage backend '{backend}' requires a [storage.{backend}] section")]
    IncompleteStorage { backend: StorageBackend },
}

/// Main runtime configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub job: JobConfig,
}

impl RuntimeConfig {
    /// Load configuration from a TOML file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Reject configurations the storage layer cannot act on.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        match self.storage.backend {
            StorageBackend::Fs if self.storage.fs.is_none() => Err(ConfigError::IncompleteStorage {
                backend: StorageBackend::Fs,
            }),
            StorageBackend::S3 if self.storage.s3.is_none() => Err(ConfigError::IncompleteStorage {
                backend: StorageBackend::S3,
            }),
            _ => Ok(()),
        }
    }
}

/// Job-level knobs that are not run parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Storage backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fs: Option<FsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3: Option<S3Config>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Fs,
            fs: Some(FsConfig::default()),
            s3: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Fs,
    S3,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Fs => write!(f, "fs"),
            StorageBackend::S3 => write!(f, "s3"),
        }
    }
}

/// Filesystem backend: locations are subdirectories of `path`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FsConfig {
    #[serde(default = "default_fs_path")]
    pub path: String,
}

fn default_fs_path() -> String {
    "./data".to_string()
}

impl Default for FsConfig {
    fn default() -> Self {
        Self {
            path: default_fs_path(),
        }
    }
}

/// S3 backend: locations name buckets; region/endpoint are shared
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Config {
    pub region: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

/// The four required run parameters
#[derive(Debug, Clone)]
pub struct JobParams {
    /// Run identifier, echoed in every log line
    pub job_name: String,
    /// Source location identifier (bucket or fs subdirectory)
    pub source: String,
    /// Target location identifier
    pub target: String,
    /// Catalog database identifier
    pub database: String,
}

impl JobParams {
    /// All four parameters are required; fail fast before any read.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        for (name, value) in [
            ("job_name", &self.job_name),
            ("source", &self.source),
            ("target", &self.target),
            ("database", &self.database),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingParameter(name));
            }
        }
        Ok(())
    }
}
