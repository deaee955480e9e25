//! index-seed library
//!
//! Populates a PostgreSQL database with synthetic records so the seven index
//! families (B-tree, Hash, GiST, SP-GiST, GIN, BRIN, Bloom) can be
//! benchmarked against realistic data.
//!
//! # Crates
//!
//! - `seed_core` - records, table layouts, uniqueness tracking, batches
//! - `seed_generator` - per-table record synthesizers
//! - `seed_loader` - batched inserts with duplicate-tolerant fallback
//! - `seed_populate` - CLI arguments and configuration file
//!
//! # CLI Usage
//!
//! ```bash
//! # Every suite at 1% of the default size
//! index-seed populate --suite all --scale 0.01 --seed 42
//!
//! # Exercise the whole pipeline without a database
//! index-seed populate --suite gin --dry-run
//!
//! # Show suites, tables and default row counts
//! index-seed list
//! ```

pub mod run;
pub mod suite;

pub use run::{populate, run_suite, run_suites, RunOptions, SuiteReport, TableReport};
pub use suite::{Suite, TableJob};
