//! Populate runner: schema selection, synthesis and batched loading per suite.

use crate::suite::{Suite, TableJob};
use anyhow::Context;
use chrono::NaiveDateTime;
use seed_core::UniquenessTracker;
use seed_generator::{DataGenerator, Entity};
use seed_loader::{
    execute_in_transaction, search_path_statement, BatchLoader, LoadReport, MemorySink,
    PostgresSink, RecoveryPolicy, RowSink,
};
use seed_populate::PopulateSettings;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Knobs shared by every suite of one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Overrides the suite's default batch size
    pub batch_size: Option<usize>,
    pub scale: f64,
    pub seed: u64,
    /// Anchor for every relative date window
    pub now: NaiveDateTime,
    pub log_progress: bool,
    pub policy: RecoveryPolicy,
}

/// Result of loading one table.
#[derive(Debug, Clone)]
pub struct TableReport {
    pub entity: Entity,
    /// Records synthesized
    pub requested: u64,
    pub generation_duration: Duration,
    pub load: LoadReport,
}

/// Result of one suite.
#[derive(Debug, Clone)]
pub struct SuiteReport {
    pub suite: Suite,
    pub tables: Vec<TableReport>,
    pub total_duration: Duration,
}

impl SuiteReport {
    pub fn rows_committed(&self) -> u64 {
        self.tables.iter().map(|t| t.load.rows_committed).sum()
    }

    pub fn rows_skipped(&self) -> u64 {
        self.tables.iter().map(|t| t.load.rows_skipped).sum()
    }
}

/// Seed of the generator for one table, derived from the run seed.
pub fn job_seed(base: u64, suite: Suite, job_index: usize) -> u64 {
    let suite_index = Suite::ALL.iter().position(|s| *s == suite).unwrap_or(0);
    let slot = (suite_index * 16 + job_index + 1) as u64;
    base.wrapping_add(slot.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Run one suite against `sink`.
///
/// Selects the suite's schema, then synthesizes and loads each table in
/// order with a fresh uniqueness tracker, then runs the post-load
/// statements in one transaction.
pub async fn run_suite<S>(
    sink: &mut S,
    suite: Suite,
    options: &RunOptions,
) -> anyhow::Result<SuiteReport>
where
    S: RowSink + ?Sized,
{
    let start_time = Instant::now();
    let batch_size = options
        .batch_size
        .unwrap_or_else(|| suite.default_batch_size());

    info!(
        "Populating suite '{}' in schema {} (batch size: {}, scale: {})",
        suite,
        suite.schema(),
        batch_size,
        options.scale
    );

    let search_path = search_path_statement(suite.schema())?;
    sink.execute(&search_path)
        .await
        .with_context(|| format!("Failed to select schema {}", suite.schema()))?;

    let loader = BatchLoader::new(batch_size)
        .with_policy(options.policy)
        .with_log_every(if options.log_progress {
            suite.log_every()
        } else {
            0
        });

    let mut tables = Vec::new();
    for (job_index, job) in suite.jobs().iter().enumerate() {
        let job = job.scaled(options.scale);
        match load_table(sink, &loader, suite, job_index, &job, options).await {
            Ok(report) => tables.push(report),
            Err(e) => {
                abandon(sink).await;
                error!("Suite '{}' failed on table '{}': {:#}", suite, job.entity, e);
                return Err(e);
            }
        }
    }

    let statements = suite.post_load_statements();
    if !statements.is_empty() {
        info!("Running {} post-load statement(s)", statements.len());
        if let Err(e) = execute_in_transaction(sink, &statements).await {
            error!("Post-load statements of suite '{}' failed: {}", suite, e);
            return Err(e).with_context(|| format!("Post-load update of suite '{suite}' failed"));
        }
    }

    let report = SuiteReport {
        suite,
        tables,
        total_duration: start_time.elapsed(),
    };

    info!(
        "Suite '{}' complete: {} rows committed, {} skipped in {:?}",
        suite,
        report.rows_committed(),
        report.rows_skipped(),
        report.total_duration
    );

    Ok(report)
}

/// Run `suites` in order, stopping at the first failure.
pub async fn run_suites<S>(
    sink: &mut S,
    suites: &[Suite],
    options: &RunOptions,
) -> anyhow::Result<Vec<SuiteReport>>
where
    S: RowSink + ?Sized,
{
    let mut reports = Vec::with_capacity(suites.len());
    for suite in suites {
        reports.push(run_suite(sink, *suite, options).await?);
    }
    Ok(reports)
}

/// Resolve the sink and run every selected suite.
pub async fn populate(settings: &PopulateSettings) -> anyhow::Result<Vec<SuiteReport>> {
    let suites = Suite::select(&settings.suite).map_err(anyhow::Error::msg)?;

    let seed = match settings.seed {
        Some(seed) => seed,
        None => {
            let seed = rand::random::<u64>();
            info!("No seed given, using {}", seed);
            seed
        }
    };

    let options = RunOptions {
        batch_size: settings.batch_size,
        scale: settings.scale,
        seed,
        now: chrono::Local::now().naive_local(),
        log_progress: settings.log_progress,
        policy: settings.policy,
    };

    if settings.dry_run {
        info!(
            "[DRY-RUN] Loading {} suite(s) into memory (seed={})",
            suites.len(),
            seed
        );
        let mut sink = MemorySink::new();
        return run_suites(&mut sink, &suites, &options).await;
    }

    info!("Connecting to {}", settings.connection.describe());
    let mut sink = PostgresSink::connect(&settings.connection)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to PostgreSQL at {}",
                settings.connection.describe()
            )
        })?;

    run_suites(&mut sink, &suites, &options).await
}

async fn load_table<S>(
    sink: &mut S,
    loader: &BatchLoader,
    suite: Suite,
    job_index: usize,
    job: &TableJob,
    options: &RunOptions,
) -> anyhow::Result<TableReport>
where
    S: RowSink + ?Sized,
{
    let table = job.entity.table();
    info!("Generating {} records for '{}'", job.rows, table.name);

    let generation_start = Instant::now();
    let mut generator = DataGenerator::new(job_seed(options.seed, suite, job_index), options.now)
        .with_progress_every(if options.log_progress {
            suite.progress_every()
        } else {
            0
        });
    let mut tracker = UniquenessTracker::new();
    let records = generator
        .records(job.entity, job.request(), &mut tracker)
        .with_context(|| format!("Failed to generate records for '{}'", table.name))?;
    let generation_duration = generation_start.elapsed();

    let load = loader
        .load(sink, &table, &records)
        .await
        .with_context(|| format!("Failed to load table '{}'", table.name))?;

    info!(
        "Populated {}: {} rows ({} skipped) in {:?} ({:.2} rows/sec)",
        table.name,
        load.rows_committed,
        load.rows_skipped,
        load.insert_duration,
        load.rows_per_second()
    );

    Ok(TableReport {
        entity: job.entity,
        requested: job.rows,
        generation_duration,
        load,
    })
}

/// Roll back whatever transaction may be open; failures are only logged.
async fn abandon<S>(sink: &mut S)
where
    S: RowSink + ?Sized,
{
    if let Err(e) = sink.rollback().await {
        warn!("Rollback after failure also failed: {}", e);
    }
}
