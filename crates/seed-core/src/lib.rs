//! Core types for the index-seed framework.
//!
//! This crate provides the foundational types shared by the generator,
//! the loader and the command-line orchestrator:
//!
//! - [`FieldValue`] / [`Record`] - Synthesized values in table column order
//! - [`TableSpec`] - Target table layout (columns, parameter casts, unique columns)
//! - [`UniquenessTracker`] - Per-run set of values already emitted for unique fields
//! - [`Batch`] / [`LoadOutcome`] - Batch partitioning and per-batch results
//!
//! # Architecture
//!
//! ```text
//! seed-core (this crate)
//!    │
//!    ├─── seed-generator  (synthesizes Records, fills the UniquenessTracker)
//!    │
//!    ├─── seed-loader     (partitions Records into Batches, inserts them)
//!    │
//!    └─── index-seed      (orchestrates suites of tables)
//! ```
//!
//! # Example
//!
//! ```rust
//! use seed_core::{FieldValue, ParamType, Record, TableSpec};
//!
//! let table = TableSpec::new("users")
//!     .column("username", ParamType::Text)
//!     .column("age", ParamType::Int4)
//!     .unique("username");
//!
//! let record = Record::new(vec![
//!     FieldValue::Text("alice".to_string()),
//!     FieldValue::Int32(30),
//! ]);
//!
//! assert!(table.check_record(&record).is_ok());
//! ```

pub mod batch;
pub mod schema;
pub mod uniqueness;
pub mod values;

// Re-exports for convenience
pub use batch::{partition, Batch, LoadOutcome};
pub use schema::{validate_identifier, ColumnSpec, ParamType, SchemaError, TableSpec};
pub use uniqueness::UniquenessTracker;
pub use values::{FieldValue, Record};
