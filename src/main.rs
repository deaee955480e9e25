//! Command-line interface for index-seed
//!
//! # Usage Examples
//!
//! ```bash
//! # Populate the B-tree schema with the default row counts
//! index-seed populate --suite btree
//!
//! # Every suite, small and reproducible, against a remote database
//! INDEX_SEED_HOST=db.internal INDEX_SEED_PASSWORD=secret \
//!   index-seed populate --suite all --scale 0.05 --seed 7
//!
//! # Settings from a file, retry any failed batch row by row
//! index-seed populate --config index-seed.toml --batch-fallback any
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use index_seed::{populate, Suite};
use seed_populate::{PopulateArgs, PopulateSettings};

#[derive(Parser)]
#[command(name = "index-seed")]
#[command(about = "Populate PostgreSQL with synthetic data for index benchmarks")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize records and load them into the suite schemas
    Populate {
        #[command(flatten)]
        args: PopulateArgs,
    },

    /// List suites, their tables and default row counts
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Populate { args } => {
            let settings =
                PopulateSettings::resolve(&args).context("Failed to resolve settings")?;

            let reports = populate(&settings).await.inspect_err(|e| {
                tracing::error!("Populate failed: {e:#}");
            })?;

            let committed: u64 = reports.iter().map(|r| r.rows_committed()).sum();
            let skipped: u64 = reports.iter().map(|r| r.rows_skipped()).sum();
            tracing::info!(
                "Populated {} suite(s): {} rows committed, {} skipped",
                reports.len(),
                committed,
                skipped
            );
        }
        Commands::List => {
            for suite in Suite::ALL {
                println!(
                    "{} (schema {}, batch size {})",
                    suite,
                    suite.schema(),
                    suite.default_batch_size()
                );
                for job in suite.jobs() {
                    let table = job.entity.table();
                    let unique = if table.unique_columns.is_empty() {
                        String::new()
                    } else {
                        format!(" unique({})", table.unique_columns.join(", "))
                    };
                    println!("  {:<24} {:>9} rows{}", table.name, job.rows, unique);
                }
            }
        }
    }

    Ok(())
}
