//! Command-line arguments and configuration for index-seed.
//!
//! [`PopulateArgs`] is flattened into the binary's `populate` subcommand;
//! [`PopulateSettings::resolve`] layers it over an optional TOML file.

pub mod args;
pub mod config;

pub use args::{ConnectionArgs, PopulateArgs};
pub use config::{ConfigError, DatabaseConfig, GenerationConfig, PopulateSettings, SeedConfig};
