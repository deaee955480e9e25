//! In-memory sink used for dry runs and tests.
//!
//! Mirrors the transactional behavior the loader relies on: statements are
//! atomic, unique columns are enforced against committed rows, rows pending in
//! the open transaction and earlier rows of the same statement, and a failed
//! statement leaves the transaction aborted until rollback.

use crate::error::SinkError;
use crate::sink::RowSink;
use async_trait::async_trait;
use seed_core::{FieldValue, Record, TableSpec};
use std::collections::{HashMap, HashSet};

type Rejection = Box<dyn Fn(&TableSpec, &Record) -> Option<SinkError> + Send>;

/// Counters of sink calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemorySinkStats {
    pub begins: u64,
    pub inserts: u64,
    pub commits: u64,
    pub rollbacks: u64,
}

/// [`RowSink`] holding rows in memory.
#[derive(Default)]
pub struct MemorySink {
    committed: HashMap<String, Vec<Record>>,
    pending: Vec<(String, Record)>,
    in_transaction: bool,
    aborted: bool,
    statements: Vec<String>,
    rejection: Option<Rejection>,
    stats: MemorySinkStats,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any insert containing a record for which `rejection` returns an error.
    pub fn with_rejection<F>(mut self, rejection: F) -> Self
    where
        F: Fn(&TableSpec, &Record) -> Option<SinkError> + Send + 'static,
    {
        self.rejection = Some(Box::new(rejection));
        self
    }

    /// Committed rows of `table`.
    pub fn rows(&self, table: &str) -> &[Record] {
        self.committed.get(table).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of committed rows of `table`.
    pub fn row_count(&self, table: &str) -> usize {
        self.rows(table).len()
    }

    /// Statements passed to [`RowSink::execute`], in order.
    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    pub fn stats(&self) -> MemorySinkStats {
        self.stats
    }

    /// Whether a transaction is open.
    pub fn in_transaction(&self) -> bool {
        self.in_transaction
    }

    fn check_unique(&self, table: &TableSpec, records: &[Record]) -> Result<(), SinkError> {
        let positions = table
            .unique_positions()
            .map_err(|e| SinkError::Database(e.to_string()))?;

        for position in positions {
            let column = &table.columns[position].name;
            let mut seen: HashSet<String> = self
                .rows(&table.name)
                .iter()
                .chain(
                    self.pending
                        .iter()
                        .filter(|(name, _)| *name == table.name)
                        .map(|(_, record)| record),
                )
                .filter_map(|record| unique_key(record.get(position)))
                .collect();

            for record in records {
                if let Some(key) = unique_key(record.get(position)) {
                    if !seen.insert(key.clone()) {
                        return Err(SinkError::UniquenessViolation(format!(
                            "duplicate key value violates unique constraint on \"{}\".\"{}\": {}",
                            table.name, column, key
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    fn apply(&mut self, table: &TableSpec, records: &[Record]) -> Result<u64, SinkError> {
        if let Some(rejection) = &self.rejection {
            if let Some(err) = records.iter().find_map(|r| rejection(table, r)) {
                return Err(err);
            }
        }
        for record in records {
            table
                .check_record(record)
                .map_err(|e| SinkError::Database(e.to_string()))?;
        }
        self.check_unique(table, records)?;

        if self.in_transaction {
            self.pending
                .extend(records.iter().map(|r| (table.name.clone(), r.clone())));
        } else {
            self.committed
                .entry(table.name.clone())
                .or_default()
                .extend(records.iter().cloned());
        }
        Ok(records.len() as u64)
    }
}

fn unique_key(value: Option<&FieldValue>) -> Option<String> {
    match value {
        None | Some(FieldValue::Null) => None,
        Some(FieldValue::Text(s)) => Some(s.clone()),
        Some(other) => Some(format!("{other:?}")),
    }
}

const ABORTED_MESSAGE: &str =
    "current transaction is aborted, commands ignored until end of transaction block";

#[async_trait]
impl RowSink for MemorySink {
    async fn execute(&mut self, sql: &str) -> Result<(), SinkError> {
        if self.aborted {
            return Err(SinkError::Database(ABORTED_MESSAGE.to_string()));
        }
        self.statements.push(sql.to_string());
        Ok(())
    }

    async fn begin(&mut self) -> Result<(), SinkError> {
        self.stats.begins += 1;
        self.in_transaction = true;
        self.aborted = false;
        self.pending.clear();
        Ok(())
    }

    async fn insert(&mut self, table: &TableSpec, records: &[Record]) -> Result<u64, SinkError> {
        self.stats.inserts += 1;
        if self.aborted {
            return Err(SinkError::Database(ABORTED_MESSAGE.to_string()));
        }

        let result = self.apply(table, records);
        if result.is_err() && self.in_transaction {
            self.aborted = true;
        }
        result
    }

    async fn commit(&mut self) -> Result<(), SinkError> {
        self.stats.commits += 1;
        // Committing an aborted transaction discards it.
        if !self.aborted {
            for (table, record) in self.pending.drain(..) {
                self.committed.entry(table).or_default().push(record);
            }
        }
        self.pending.clear();
        self.in_transaction = false;
        self.aborted = false;
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), SinkError> {
        self.stats.rollbacks += 1;
        self.pending.clear();
        self.in_transaction = false;
        self.aborted = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seed_core::ParamType;

    fn users() -> TableSpec {
        TableSpec::new("users")
            .column("username", ParamType::Text)
            .column("age", ParamType::Int4)
            .unique("username")
    }

    fn user(name: &str, age: i32) -> Record {
        Record::new(vec![FieldValue::text(name), FieldValue::Int32(age)])
    }

    #[tokio::test]
    async fn test_commit_persists_rows() {
        let mut sink = MemorySink::new();
        sink.begin().await.unwrap();
        let n = sink
            .insert(&users(), &[user("alice", 30), user("bob", 40)])
            .await
            .unwrap();
        assert_eq!(n, 2);
        assert_eq!(sink.row_count("users"), 0);
        sink.commit().await.unwrap();
        assert_eq!(sink.row_count("users"), 2);
    }

    #[tokio::test]
    async fn test_duplicate_within_statement_is_rejected_atomically() {
        let mut sink = MemorySink::new();
        sink.begin().await.unwrap();
        let err = sink
            .insert(&users(), &[user("alice", 30), user("alice", 31)])
            .await
            .unwrap_err();
        assert!(matches!(err, SinkError::UniquenessViolation(_)));

        // Transaction is unusable until rollback.
        let err = sink.insert(&users(), &[user("carol", 22)]).await.unwrap_err();
        assert!(matches!(err, SinkError::Database(_)));

        sink.rollback().await.unwrap();
        assert_eq!(sink.row_count("users"), 0);
    }

    #[tokio::test]
    async fn test_duplicate_against_committed_rows() {
        let mut sink = MemorySink::new();
        sink.begin().await.unwrap();
        sink.insert(&users(), &[user("alice", 30)]).await.unwrap();
        sink.commit().await.unwrap();

        sink.begin().await.unwrap();
        let err = sink.insert(&users(), &[user("alice", 50)]).await.unwrap_err();
        assert!(matches!(err, SinkError::UniquenessViolation(_)));
        sink.rollback().await.unwrap();

        assert_eq!(sink.rows("users"), &[user("alice", 30)]);
    }

    #[tokio::test]
    async fn test_null_does_not_collide() {
        let mut sink = MemorySink::new();
        let rows = vec![
            Record::new(vec![FieldValue::Null, FieldValue::Int32(1)]),
            Record::new(vec![FieldValue::Null, FieldValue::Int32(2)]),
        ];
        sink.insert(&users(), &rows).await.unwrap();
        assert_eq!(sink.row_count("users"), 2);
    }

    #[test]
    fn test_insert_outside_transaction_autocommits() {
        let mut sink = MemorySink::new();
        tokio_test::block_on(sink.insert(&users(), &[user("dave", 28)])).unwrap();
        assert_eq!(sink.row_count("users"), 1);
        assert_eq!(sink.stats().commits, 0);
    }

    #[tokio::test]
    async fn test_rejection_hook() {
        let mut sink = MemorySink::new().with_rejection(|_, record| {
            (record.get(1) == Some(&FieldValue::Int32(-1)))
                .then(|| SinkError::Database("check constraint violated".into()))
        });
        sink.begin().await.unwrap();
        let err = sink
            .insert(&users(), &[user("alice", 30), user("bob", -1)])
            .await
            .unwrap_err();
        assert_eq!(err, SinkError::Database("check constraint violated".into()));
        sink.rollback().await.unwrap();
        assert_eq!(sink.stats().rollbacks, 1);
        assert!(!sink.in_transaction());
    }
}
