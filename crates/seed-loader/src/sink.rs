//! Destination abstraction for batched inserts.

use crate::error::SinkError;
use async_trait::async_trait;
use seed_core::{validate_identifier, Record, SchemaError, TableSpec};
use tracing::warn;

/// Upper bound on bind parameters in one statement (PostgreSQL wire limit).
pub const MAX_BIND_PARAMETERS: usize = 65_535;

/// A transactional destination for records.
///
/// Implementations keep at most one open transaction. After a failed
/// statement the transaction is unusable until [`RowSink::rollback`].
#[async_trait]
pub trait RowSink: Send {
    /// Execute one or more statements without parameters.
    async fn execute(&mut self, sql: &str) -> Result<(), SinkError>;

    /// Open a transaction.
    async fn begin(&mut self) -> Result<(), SinkError>;

    /// Insert `records` into `table` as a single statement.
    ///
    /// Returns the number of rows written.
    async fn insert(&mut self, table: &TableSpec, records: &[Record]) -> Result<u64, SinkError>;

    /// Commit the open transaction.
    async fn commit(&mut self) -> Result<(), SinkError>;

    /// Roll back the open transaction.
    async fn rollback(&mut self) -> Result<(), SinkError>;
}

/// `SET search_path` statement for a validated schema name.
pub fn search_path_statement(schema: &str) -> Result<String, SchemaError> {
    let schema = validate_identifier(schema)?;
    Ok(format!("SET search_path TO {schema}"))
}

/// Run `statements` in one transaction, rolling back on the first failure.
pub async fn execute_in_transaction<S>(sink: &mut S, statements: &[String]) -> Result<(), SinkError>
where
    S: RowSink + ?Sized,
{
    sink.begin().await?;

    for sql in statements {
        if let Err(e) = sink.execute(sql).await {
            if let Err(rollback_err) = sink.rollback().await {
                warn!("Rollback after failed statement also failed: {rollback_err}");
            }
            return Err(e);
        }
    }

    sink.commit().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_path_statement() {
        assert_eq!(
            search_path_statement("Btree").unwrap(),
            "SET search_path TO Btree"
        );
        assert!(search_path_statement("btree; DROP TABLE users").is_err());
        assert!(search_path_statement("").is_err());
    }
}
