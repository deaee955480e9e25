//! Synthetic record generator for the index-seed framework.
//!
//! This crate provides the [`DataGenerator`], which produces records for one
//! [`Entity`] at a time. Values come from a seeded RNG and the `fake` crate,
//! relative to a fixed `now` anchor, so the same seed and anchor reproduce
//! the same data.
//!
//! # Architecture
//!
//! ```text
//! Entity (table + value distributions)
//!        │
//!        ▼
//! ┌─────────────────────┐      ┌───────────────────┐
//! │    DataGenerator    │◄────►│ UniquenessTracker │
//! │                     │      │ (owned by caller) │
//! │  - SynthContext     │      └───────────────────┘
//! │    (rng, now, fk)   │
//! └──────────┬──────────┘
//!            │
//!            ▼
//!    Vec<Record> in column order
//! ```
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use seed_core::UniquenessTracker;
//! use seed_generator::{DataGenerator, Entity, SynthRequest};
//!
//! let now = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let mut generator = DataGenerator::new(42, now);
//! let mut tracker = UniquenessTracker::new();
//!
//! let records = generator
//!     .records(Entity::BloomUsers, SynthRequest::new(10), &mut tracker)
//!     .unwrap();
//!
//! assert_eq!(records.len(), 10);
//! assert_eq!(tracker.len("username"), 10);
//! ```

pub mod entities;
pub mod generator;
pub mod generators;

// Re-exports for convenience
pub use entities::Entity;
pub use generator::{
    DataGenerator, GeneratorError, RecordSynth, SynthContext, SynthRequest,
    DEFAULT_PROGRESS_EVERY, MAX_UNIQUE_ATTEMPTS,
};
