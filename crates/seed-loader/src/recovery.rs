//! Row-by-row fallback for a failed batch.

use crate::error::{LoadError, SinkError};
use crate::policy::RecoveryPolicy;
use crate::sink::RowSink;
use seed_core::{Batch, Record, TableSpec};
use tracing::{debug, warn};

/// Final state of one row replayed during fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowState {
    /// Row persisted in its own transaction
    Committed,
    /// Row failed within the row-skip scope and was rolled back
    Skipped { reason: SinkError },
}

/// Totals of one fallback pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecoveryReport {
    pub committed: u64,
    pub skipped: u64,
}

/// Replay every record of `batch` in its own transaction.
///
/// Rows failing within `policy.row_skip` are rolled back and skipped; any
/// other failure ends the load.
pub async fn replay_rows<S>(
    sink: &mut S,
    table: &TableSpec,
    batch: &Batch<'_>,
    policy: &RecoveryPolicy,
) -> Result<RecoveryReport, LoadError>
where
    S: RowSink + ?Sized,
{
    let mut report = RecoveryReport::default();

    for (i, record) in batch.records.iter().enumerate() {
        let row = batch.offset + i;
        match insert_row(sink, table, record, policy).await {
            Ok(RowState::Committed) => report.committed += 1,
            Ok(RowState::Skipped { reason }) => {
                warn!(table = %table.name, row, "Skipping row: {reason}");
                report.skipped += 1;
            }
            Err(source) if source.is_fatal() => return Err(LoadError::Sink(source)),
            Err(source) => {
                return Err(LoadError::RowRejected {
                    table: table.name.clone(),
                    row,
                    source,
                })
            }
        }
    }

    debug!(
        table = %table.name,
        batch = batch.index,
        committed = report.committed,
        skipped = report.skipped,
        "Row fallback finished"
    );

    Ok(report)
}

async fn insert_row<S>(
    sink: &mut S,
    table: &TableSpec,
    record: &Record,
    policy: &RecoveryPolicy,
) -> Result<RowState, SinkError>
where
    S: RowSink + ?Sized,
{
    sink.begin().await?;

    let result = match sink.insert(table, std::slice::from_ref(record)).await {
        Ok(_) => sink.commit().await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => Ok(RowState::Committed),
        Err(reason) => {
            if let Err(rollback_err) = sink.rollback().await {
                if rollback_err.is_fatal() {
                    return Err(rollback_err);
                }
                warn!("Rollback failed: {rollback_err}");
            }
            if policy.skips_row(&reason) {
                Ok(RowState::Skipped { reason })
            } else {
                Err(reason)
            }
        }
    }
}
