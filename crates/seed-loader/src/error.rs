//! Error types for the batch loader.

use seed_core::SchemaError;
use std::error::Error as _;
use thiserror::Error;
use tokio_postgres::error::SqlState;

/// Deterministic classification of a sink failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Duplicate value under a unique constraint (SQLSTATE 23505)
    UniquenessViolation,
    /// Lost or unusable connection; always fatal
    Connection,
    /// Any other database-reported failure
    Other,
}

/// Errors reported by a [`RowSink`](crate::RowSink).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// A statement violated a unique constraint.
    #[error("Uniqueness violation: {0}")]
    UniquenessViolation(String),

    /// The connection failed or was closed.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Any other database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl SinkError {
    /// Classify this error.
    pub fn class(&self) -> ErrorClass {
        match self {
            SinkError::UniquenessViolation(_) => ErrorClass::UniquenessViolation,
            SinkError::Connection(_) => ErrorClass::Connection,
            SinkError::Database(_) => ErrorClass::Other,
        }
    }

    /// Whether the error ends the run regardless of policy.
    pub fn is_fatal(&self) -> bool {
        self.class() == ErrorClass::Connection
    }
}

impl From<tokio_postgres::Error> for SinkError {
    fn from(e: tokio_postgres::Error) -> Self {
        let message = e.to_string();

        if e.is_closed() {
            return SinkError::Connection(message);
        }

        if let Some(code) = e.code() {
            if *code == SqlState::UNIQUE_VIOLATION {
                return SinkError::UniquenessViolation(message);
            }
            if code.code().starts_with("08") {
                return SinkError::Connection(message);
            }
            return SinkError::Database(message);
        }

        let io_failure = e
            .source()
            .is_some_and(|source| source.downcast_ref::<std::io::Error>().is_some());
        if io_failure {
            SinkError::Connection(message)
        } else {
            SinkError::Database(message)
        }
    }
}

/// Errors that end a table load.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The batch size cannot be used for this table.
    #[error("Invalid batch size {batch_size} for table '{table}': {reason}")]
    InvalidBatchSize {
        table: String,
        batch_size: usize,
        reason: String,
    },

    /// A record does not match the table layout.
    #[error("Record shape error: {0}")]
    Shape(#[from] SchemaError),

    /// A batch failed outside the fallback scope; nothing from it was committed.
    #[error("Batch {batch} of table '{table}' aborted: {source}")]
    BatchAborted {
        table: String,
        batch: usize,
        #[source]
        source: SinkError,
    },

    /// A row failed during fallback outside the row-skip scope.
    #[error("Row {row} of table '{table}' rejected: {source}")]
    RowRejected {
        table: String,
        row: usize,
        #[source]
        source: SinkError,
    },

    /// Fatal sink failure (connection lost, rollback impossible).
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_error_classes() {
        assert_eq!(
            SinkError::UniquenessViolation("dup".into()).class(),
            ErrorClass::UniquenessViolation
        );
        assert_eq!(
            SinkError::Connection("gone".into()).class(),
            ErrorClass::Connection
        );
        assert_eq!(SinkError::Database("bad".into()).class(), ErrorClass::Other);
        assert!(SinkError::Connection("gone".into()).is_fatal());
        assert!(!SinkError::UniquenessViolation("dup".into()).is_fatal());
    }

    #[test]
    fn test_batch_aborted_message() {
        let err = LoadError::BatchAborted {
            table: "users".to_string(),
            batch: 3,
            source: SinkError::Database("invalid input syntax for type integer".into()),
        };
        assert_eq!(
            err.to_string(),
            "Batch 3 of table 'users' aborted: Database error: invalid input syntax for type integer"
        );
    }
}
