//! Batched PostgreSQL loader for index-seed.
//!
//! Records are partitioned into batches and each batch is written as one
//! multi-row INSERT inside its own transaction. When a batch fails with an
//! error inside the configured fallback scope (by default: a uniqueness
//! violation), the batch is rolled back and its rows are replayed one per
//! transaction so that only the offending rows are lost.
//!
//! # Example
//!
//! ```rust,ignore
//! use seed_loader::{BatchLoader, ConnectionParams, PostgresSink};
//!
//! let mut sink = PostgresSink::connect(&ConnectionParams::default()).await?;
//! let report = BatchLoader::new(1000)
//!     .load(&mut sink, &table, &records)
//!     .await?;
//! println!("{} rows, {} skipped", report.rows_committed, report.rows_skipped);
//! ```

pub mod error;
pub mod loader;
pub mod memory;
pub mod policy;
pub mod postgres;
pub mod recovery;
pub mod sink;

pub use error::{ErrorClass, LoadError, SinkError};
pub use loader::{BatchLoader, LoadReport, DEFAULT_BATCH_SIZE};
pub use memory::{MemorySink, MemorySinkStats};
pub use policy::{ErrorScope, RecoveryPolicy};
pub use postgres::{insert_statement, ConnectionParams, PostgresSink};
pub use recovery::{replay_rows, RecoveryReport, RowState};
pub use sink::{execute_in_transaction, search_path_statement, RowSink, MAX_BIND_PARAMETERS};
