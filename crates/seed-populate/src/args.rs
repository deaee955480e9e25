//! CLI argument definitions for the populate command.

use clap::Args;
use seed_loader::ErrorScope;
use std::path::PathBuf;

/// Connection flags; each falls back to its environment variable.
#[derive(Args, Clone, Debug, Default)]
pub struct ConnectionArgs {
    /// Database host
    #[arg(long, env = "INDEX_SEED_HOST")]
    pub host: Option<String>,

    /// Database port
    #[arg(long, env = "INDEX_SEED_PORT")]
    pub port: Option<u16>,

    /// Database name
    #[arg(long, env = "INDEX_SEED_DBNAME")]
    pub dbname: Option<String>,

    /// Database user
    #[arg(long, env = "INDEX_SEED_USER")]
    pub user: Option<String>,

    /// Database password
    #[arg(long, env = "INDEX_SEED_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Arguments of `index-seed populate`.
#[derive(Args, Clone, Debug)]
pub struct PopulateArgs {
    /// Suite to populate: btree, hash, gist, spgist, gin, brin, bloom or all
    #[arg(long, default_value = "all")]
    pub suite: String,

    /// Path to a TOML configuration file
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Records per batch, overriding every table's default
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Multiplier applied to row counts and foreign-key bounds
    #[arg(long)]
    pub scale: Option<f64>,

    /// Random seed for deterministic generation (same seed = same data)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Load into memory instead of the database
    #[arg(long)]
    pub dry_run: bool,

    /// Batch failures retried row by row: uniqueness or any
    #[arg(long)]
    pub batch_fallback: Option<ErrorScope>,

    /// Row failures skipped during fallback: uniqueness or any
    #[arg(long)]
    pub row_skip: Option<ErrorScope>,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

impl Default for PopulateArgs {
    fn default() -> Self {
        Self {
            suite: "all".to_string(),
            config: None,
            batch_size: None,
            scale: None,
            seed: None,
            dry_run: false,
            batch_fallback: None,
            row_skip: None,
            connection: ConnectionArgs::default(),
        }
    }
}
