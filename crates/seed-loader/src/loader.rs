//! Batched loading with duplicate-tolerant fallback.

use crate::error::{LoadError, SinkError};
use crate::policy::RecoveryPolicy;
use crate::recovery::replay_rows;
use crate::sink::{RowSink, MAX_BIND_PARAMETERS};
use seed_core::{partition, Batch, LoadOutcome, Record, TableSpec};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Default number of records per batch.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Metrics and per-batch outcomes of one table load.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Rows persisted.
    pub rows_committed: u64,
    /// Rows skipped during fallback.
    pub rows_skipped: u64,
    /// Number of batches attempted.
    pub batch_count: u64,
    /// Outcome of each batch in order.
    pub outcomes: Vec<LoadOutcome>,
    /// Time spent in the sink.
    pub insert_duration: Duration,
}

impl LoadReport {
    fn record(&mut self, outcome: LoadOutcome) {
        self.rows_committed += outcome.committed();
        self.rows_skipped += outcome.skipped();
        self.batch_count += 1;
        self.outcomes.push(outcome);
    }

    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.insert_duration.as_secs_f64() > 0.0 {
            self.rows_committed as f64 / self.insert_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// State of a batch after its single-transaction attempt.
#[derive(Debug)]
enum BatchState {
    Committed { rows: u64 },
    NeedsRowFallback { cause: SinkError },
    Aborted { cause: SinkError },
}

/// Loads records into a [`RowSink`] in batches.
#[derive(Debug, Clone)]
pub struct BatchLoader {
    batch_size: usize,
    policy: RecoveryPolicy,
    log_every: usize,
}

impl Default for BatchLoader {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE)
    }
}

impl BatchLoader {
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size,
            policy: RecoveryPolicy::default(),
            log_every: 1,
        }
    }

    /// Set the recovery policy.
    pub fn with_policy(mut self, policy: RecoveryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Log progress every `batches` committed batches (0 disables).
    pub fn with_log_every(mut self, batches: usize) -> Self {
        self.log_every = batches;
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn policy(&self) -> &RecoveryPolicy {
        &self.policy
    }

    /// Check batch size and record shapes before anything is sent.
    pub fn validate(&self, table: &TableSpec, records: &[Record]) -> Result<(), LoadError> {
        if self.batch_size == 0 {
            return Err(LoadError::InvalidBatchSize {
                table: table.name.clone(),
                batch_size: self.batch_size,
                reason: "batch size must be positive".to_string(),
            });
        }

        // Only the largest statement actually sent has to fit.
        let rows_per_statement = self.batch_size.min(records.len());
        let params = rows_per_statement.saturating_mul(table.columns.len());
        if params > MAX_BIND_PARAMETERS {
            return Err(LoadError::InvalidBatchSize {
                table: table.name.clone(),
                batch_size: self.batch_size,
                reason: format!(
                    "{} columns per row would bind {params} parameters (limit {MAX_BIND_PARAMETERS})",
                    table.columns.len()
                ),
            });
        }

        table.unique_positions()?;
        for record in records {
            table.check_record(record)?;
        }
        Ok(())
    }

    /// Load `records` into `table`, one transaction per batch.
    ///
    /// Batches failing within the fallback scope are replayed row by row;
    /// any other batch failure aborts the load with nothing from that batch
    /// committed. Earlier batches stay committed.
    pub async fn load<S>(
        &self,
        sink: &mut S,
        table: &TableSpec,
        records: &[Record],
    ) -> Result<LoadReport, LoadError>
    where
        S: RowSink + ?Sized,
    {
        self.validate(table, records)?;

        let start_time = Instant::now();
        let mut report = LoadReport::default();

        debug!(
            "Loading {} records into '{}' (batch size: {})",
            records.len(),
            table.name,
            self.batch_size
        );

        for batch in partition(records, self.batch_size) {
            let outcome = match self.attempt_batch(sink, table, &batch).await? {
                BatchState::Committed { rows } => LoadOutcome::Committed { rows },
                BatchState::NeedsRowFallback { cause } => {
                    warn!(
                        table = %table.name,
                        batch = batch.index,
                        "Batch failed ({cause}), retrying {} rows individually",
                        batch.len()
                    );
                    let recovered = replay_rows(sink, table, &batch, &self.policy).await?;
                    LoadOutcome::PartiallyCommitted {
                        committed: recovered.committed,
                        skipped: recovered.skipped,
                    }
                }
                BatchState::Aborted { cause } => {
                    report.record(LoadOutcome::Aborted {
                        error: cause.to_string(),
                    });
                    error!(
                        table = %table.name,
                        batch = batch.index,
                        committed = report.rows_committed,
                        "Batch aborted: {cause}"
                    );
                    return Err(LoadError::BatchAborted {
                        table: table.name.clone(),
                        batch: batch.index,
                        source: cause,
                    });
                }
            };

            report.record(outcome);

            if self.log_every > 0 && (batch.index + 1) % self.log_every == 0 {
                info!(
                    table = %table.name,
                    batches = batch.index + 1,
                    rows = report.rows_committed,
                    skipped = report.rows_skipped,
                    "Inserted batch"
                );
            }
        }

        report.insert_duration = start_time.elapsed();
        Ok(report)
    }

    async fn attempt_batch<S>(
        &self,
        sink: &mut S,
        table: &TableSpec,
        batch: &Batch<'_>,
    ) -> Result<BatchState, LoadError>
    where
        S: RowSink + ?Sized,
    {
        let result = match sink.begin().await {
            Ok(()) => match sink.insert(table, batch.records).await {
                Ok(rows) => sink.commit().await.map(|_| rows),
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        };

        let cause = match result {
            Ok(rows) => return Ok(BatchState::Committed { rows }),
            Err(cause) => cause,
        };

        if let Err(rollback_err) = sink.rollback().await {
            if rollback_err.is_fatal() {
                return Err(LoadError::Sink(rollback_err));
            }
            warn!("Rollback failed: {rollback_err}");
        }

        if cause.is_fatal() {
            return Err(LoadError::Sink(cause));
        }

        if self.policy.falls_back(&cause) {
            Ok(BatchState::NeedsRowFallback { cause })
        } else {
            Ok(BatchState::Aborted { cause })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemorySink;
    use crate::policy::ErrorScope;
    use seed_core::{FieldValue, ParamType};

    fn profiles() -> TableSpec {
        TableSpec::new("user_profiles")
            .column("username", ParamType::Text)
            .column("age", ParamType::Int4)
            .unique("username")
    }

    fn profile(name: &str, age: i32) -> Record {
        Record::new(vec![FieldValue::text(name), FieldValue::Int32(age)])
    }

    fn distinct_profiles(n: usize) -> Vec<Record> {
        (0..n).map(|i| profile(&format!("user_{i}"), 30)).collect()
    }

    #[tokio::test]
    async fn test_load_commits_all_batches() {
        let mut sink = MemorySink::new();
        let records = distinct_profiles(2500);

        let report = BatchLoader::new(1000)
            .load(&mut sink, &profiles(), &records)
            .await
            .unwrap();

        assert_eq!(report.rows_committed, 2500);
        assert_eq!(report.rows_skipped, 0);
        assert_eq!(report.batch_count, 3);
        assert_eq!(
            report.outcomes,
            vec![
                LoadOutcome::Committed { rows: 1000 },
                LoadOutcome::Committed { rows: 1000 },
                LoadOutcome::Committed { rows: 500 },
            ]
        );
        assert_eq!(sink.rows("user_profiles"), records.as_slice());
        assert_eq!(sink.stats().inserts, 3);
    }

    #[tokio::test]
    async fn test_duplicate_username_skips_one_row() {
        let mut sink = MemorySink::new();
        let mut records = distinct_profiles(1000);
        // Row 700 repeats the username of row 200.
        records[700] = profile("user_200", 41);

        let report = BatchLoader::new(1000)
            .load(&mut sink, &profiles(), &records)
            .await
            .unwrap();

        assert_eq!(report.rows_committed, 999);
        assert_eq!(report.rows_skipped, 1);
        assert_eq!(
            report.outcomes,
            vec![LoadOutcome::PartiallyCommitted {
                committed: 999,
                skipped: 1
            }]
        );

        let stored = sink.rows("user_profiles");
        assert_eq!(stored.len(), 999);
        assert_eq!(stored[200], profile("user_200", 30));
        assert!(!stored.contains(&profile("user_200", 41)));
        // Original order is preserved.
        assert_eq!(stored[699], records[699]);
        assert_eq!(stored[700], records[701]);
    }

    #[tokio::test]
    async fn test_username_committed_by_earlier_load() {
        let mut sink = MemorySink::new();
        let loader = BatchLoader::new(1000);
        loader
            .load(&mut sink, &profiles(), &[profile("user_500", 50)])
            .await
            .unwrap();

        let report = loader
            .load(&mut sink, &profiles(), &distinct_profiles(1000))
            .await
            .unwrap();

        assert_eq!(report.rows_committed, 999);
        assert_eq!(report.rows_skipped, 1);
        assert_eq!(sink.row_count("user_profiles"), 1000);
    }

    #[tokio::test]
    async fn test_duplicate_only_affects_its_batch() {
        let mut sink = MemorySink::new();
        let mut records = distinct_profiles(30);
        records[25] = profile("user_3", 30);

        let report = BatchLoader::new(10)
            .load(&mut sink, &profiles(), &records)
            .await
            .unwrap();

        assert_eq!(
            report.outcomes,
            vec![
                LoadOutcome::Committed { rows: 10 },
                LoadOutcome::Committed { rows: 10 },
                LoadOutcome::PartiallyCommitted {
                    committed: 9,
                    skipped: 1
                },
            ]
        );
        assert_eq!(sink.row_count("user_profiles"), 29);
    }

    #[tokio::test]
    async fn test_non_unique_failure_aborts_with_nothing_committed() {
        let mut sink = MemorySink::new().with_rejection(|_, record| {
            (record.get(1) == Some(&FieldValue::Int32(-1)))
                .then(|| SinkError::Database("invalid input syntax".into()))
        });
        let mut records = distinct_profiles(20);
        records[15] = profile("user_15", -1);

        let err = BatchLoader::new(10)
            .load(&mut sink, &profiles(), &records)
            .await
            .unwrap_err();

        assert!(matches!(err, LoadError::BatchAborted { batch: 1, .. }));
        // First batch stays committed, nothing from the failed batch.
        assert_eq!(sink.row_count("user_profiles"), 10);
        assert!(!sink.in_transaction());
    }

    #[tokio::test]
    async fn test_any_error_fallback_skips_bad_row() {
        let mut sink = MemorySink::new().with_rejection(|_, record| {
            (record.get(1) == Some(&FieldValue::Int32(-1)))
                .then(|| SinkError::Database("check constraint violated".into()))
        });
        let mut records = distinct_profiles(10);
        records[4] = profile("user_4", -1);
        let policy = RecoveryPolicy {
            batch_fallback: ErrorScope::AnyDatabaseError,
            row_skip: ErrorScope::AnyDatabaseError,
        };

        let report = BatchLoader::new(10)
            .with_policy(policy)
            .load(&mut sink, &profiles(), &records)
            .await
            .unwrap();

        assert_eq!(report.rows_committed, 9);
        assert_eq!(report.rows_skipped, 1);
    }

    #[tokio::test]
    async fn test_connection_error_is_fatal() {
        let mut sink = MemorySink::new()
            .with_rejection(|_, _| Some(SinkError::Connection("connection reset".into())));
        let records = distinct_profiles(5);

        let err = BatchLoader::new(10)
            .load(&mut sink, &profiles(), &records)
            .await
            .unwrap_err();

        assert!(matches!(err, LoadError::Sink(SinkError::Connection(_))));
        // No row-level retries after a connection failure.
        assert_eq!(sink.stats().inserts, 1);
    }

    #[tokio::test]
    async fn test_empty_input_issues_no_statements() {
        let mut sink = MemorySink::new();

        let report = BatchLoader::new(1000)
            .load(&mut sink, &profiles(), &[])
            .await
            .unwrap();

        assert_eq!(report.batch_count, 0);
        assert_eq!(report.rows_committed, 0);
        assert_eq!(sink.stats().begins, 0);
        assert_eq!(sink.stats().inserts, 0);
    }

    #[tokio::test]
    async fn test_invalid_batch_sizes() {
        let mut sink = MemorySink::new();
        let records = distinct_profiles(3);

        let err = BatchLoader::new(0)
            .load(&mut sink, &profiles(), &records)
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::InvalidBatchSize { batch_size: 0, .. }));

        let err = BatchLoader::new(40_000)
            .load(&mut sink, &profiles(), &distinct_profiles(33_000))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidBatchSize {
                batch_size: 40_000,
                ..
            }
        ));
        assert_eq!(sink.stats().begins, 0);
    }

    #[tokio::test]
    async fn test_oversized_batch_for_small_table_is_accepted() {
        let mut sink = MemorySink::new();
        let records = distinct_profiles(15);

        // 40 000 rows of two columns would overflow, but only 15 are sent.
        let report = BatchLoader::new(40_000)
            .load(&mut sink, &profiles(), &records)
            .await
            .unwrap();

        assert_eq!(report.rows_committed, 15);
        assert_eq!(report.batch_count, 1);
    }

    #[tokio::test]
    async fn test_shape_mismatch_is_rejected_before_sending() {
        let mut sink = MemorySink::new();
        let records = vec![Record::new(vec![FieldValue::text("only_name")])];

        let err = BatchLoader::new(10)
            .load(&mut sink, &profiles(), &records)
            .await
            .unwrap_err();

        assert!(matches!(err, LoadError::Shape(_)));
        assert_eq!(sink.stats().begins, 0);
    }

    #[test]
    fn test_rows_per_second() {
        let report = LoadReport {
            rows_committed: 1000,
            insert_duration: Duration::from_secs(2),
            ..Default::default()
        };
        assert!((report.rows_per_second() - 500.0).abs() < f64::EPSILON);
        assert_eq!(LoadReport::default().rows_per_second(), 0.0);
    }
}
