//! Batch partitioning and per-batch load outcomes.

use crate::values::Record;

/// A contiguous slice of the generated records, submitted as one transaction.
#[derive(Debug, Clone, Copy)]
pub struct Batch<'a> {
    /// Zero-based position of the batch in the run
    pub index: usize,
    /// Offset of the first record in the full sequence
    pub offset: usize,
    /// Records in original order
    pub records: &'a [Record],
}

impl Batch<'_> {
    /// Number of records in the batch.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the batch is empty (never produced by [`partition`]).
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Split `records` into contiguous batches of at most `batch_size` records.
///
/// Yields `ceil(len / batch_size)` batches; the last may be smaller. An empty
/// input yields no batches.
///
/// # Panics
///
/// Panics if `batch_size` is zero. Callers validate the size first.
pub fn partition(records: &[Record], batch_size: usize) -> impl Iterator<Item = Batch<'_>> {
    records
        .chunks(batch_size)
        .enumerate()
        .map(move |(index, records)| Batch {
            index,
            offset: index * batch_size,
            records,
        })
}

/// Result of loading one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// All records persisted by the batch insert
    Committed { rows: u64 },

    /// Batch insert failed; records were retried one by one
    PartiallyCommitted { committed: u64, skipped: u64 },

    /// Batch failed and nothing from it was committed
    Aborted { error: String },
}

impl LoadOutcome {
    /// Rows persisted for this batch.
    pub fn committed(&self) -> u64 {
        match self {
            LoadOutcome::Committed { rows } => *rows,
            LoadOutcome::PartiallyCommitted { committed, .. } => *committed,
            LoadOutcome::Aborted { .. } => 0,
        }
    }

    /// Rows skipped for this batch.
    pub fn skipped(&self) -> u64 {
        match self {
            LoadOutcome::PartiallyCommitted { skipped, .. } => *skipped,
            _ => 0,
        }
    }
}
