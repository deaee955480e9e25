//! TOML configuration file and settings resolution.
//!
//! Settings are layered, lowest precedence first: built-in defaults, the
//! configuration file, then command-line flags and environment variables.

use crate::args::PopulateArgs;
use seed_loader::{ConnectionParams, RecoveryPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// `[database]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub dbname: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

/// `[generation]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationConfig {
    /// Overrides every table's default batch size
    pub batch_size: Option<usize>,
    pub scale: f64,
    pub seed: Option<u64>,
    pub log_progress: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            batch_size: None,
            scale: 1.0,
            seed: None,
            log_progress: true,
        }
    }
}

/// Contents of an index-seed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeedConfig {
    pub database: DatabaseConfig,
    pub generation: GenerationConfig,
    pub recovery: RecoveryPolicy,
}

impl SeedConfig {
    /// Read and validate a configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SeedConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_scale(self.generation.scale)?;
        validate_batch_size(self.generation.batch_size)
    }
}

/// Fully resolved settings of one populate invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulateSettings {
    pub suite: String,
    pub connection: ConnectionParams,
    pub batch_size: Option<usize>,
    pub scale: f64,
    pub seed: Option<u64>,
    pub log_progress: bool,
    pub policy: RecoveryPolicy,
    pub dry_run: bool,
}

impl PopulateSettings {
    /// Layer defaults, the optional config file and `args`.
    pub fn resolve(args: &PopulateArgs) -> Result<Self, ConfigError> {
        let config = match &args.config {
            Some(path) => SeedConfig::from_file(path)?,
            None => SeedConfig::default(),
        };
        Self::merge(config, args)
    }

    /// Overlay `args` on an already loaded configuration.
    pub fn merge(config: SeedConfig, args: &PopulateArgs) -> Result<Self, ConfigError> {
        let defaults = ConnectionParams::default();
        let db = config.database;
        let flags = &args.connection;

        let connection = ConnectionParams {
            host: flags.host.clone().or(db.host).unwrap_or(defaults.host),
            port: flags.port.or(db.port).unwrap_or(defaults.port),
            dbname: flags.dbname.clone().or(db.dbname).unwrap_or(defaults.dbname),
            user: flags.user.clone().or(db.user).unwrap_or(defaults.user),
            password: flags
                .password
                .clone()
                .or(db.password)
                .unwrap_or(defaults.password),
        };

        let policy = RecoveryPolicy {
            batch_fallback: args
                .batch_fallback
                .unwrap_or(config.recovery.batch_fallback),
            row_skip: args.row_skip.unwrap_or(config.recovery.row_skip),
        };

        let settings = Self {
            suite: args.suite.clone(),
            connection,
            batch_size: args.batch_size.or(config.generation.batch_size),
            scale: args.scale.unwrap_or(config.generation.scale),
            seed: args.seed.or(config.generation.seed),
            log_progress: config.generation.log_progress,
            policy,
            dry_run: args.dry_run,
        };

        validate_scale(settings.scale)?;
        validate_batch_size(settings.batch_size)?;
        Ok(settings)
    }
}

fn validate_scale(scale: f64) -> Result<(), ConfigError> {
    if scale.is_finite() && scale > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "scale must be a positive finite number, got {scale}"
        )))
    }
}

fn validate_batch_size(batch_size: Option<usize>) -> Result<(), ConfigError> {
    match batch_size {
        Some(0) => Err(ConfigError::Invalid(
            "batch_size must be greater than zero".to_string(),
        )),
        _ => Ok(()),
    }
}
