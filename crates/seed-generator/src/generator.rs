//! Main data generator for producing records.

use crate::entities::Entity;
use chrono::NaiveDateTime;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use seed_core::{Record, UniquenessTracker};
use tracing::info;

/// Consecutive collisions tolerated before a unique field gives up.
pub const MAX_UNIQUE_ATTEMPTS: usize = 10_000;

/// Default progress cadence, in records.
pub const DEFAULT_PROGRESS_EVERY: u64 = 10_000;

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// The value space of a unique field is (nearly) exhausted
    #[error("No fresh value for unique field '{field}' after {attempts} attempts")]
    UniqueSpaceExhausted { field: String, attempts: usize },

    /// Foreign-key bound must reference at least one row
    #[error("Invalid foreign key bound: {0}")]
    InvalidForeignKeyBound(u64),
}

/// Per-request generation state shared by all value helpers.
pub struct SynthContext {
    /// Seeded random number generator for reproducibility
    rng: StdRng,
    /// Anchor for every relative date window
    now: NaiveDateTime,
    /// Largest valid referenced identifier, if the caller supplied one
    fk_max: Option<u64>,
}

impl SynthContext {
    /// Create a context with the given seed and time anchor.
    pub fn new(seed: u64, now: NaiveDateTime) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            now,
            fk_max: None,
        }
    }

    /// The random number generator.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// The time anchor.
    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// Upper bound for foreign keys, falling back to the entity's default.
    pub fn fk_max_or(&self, default: u64) -> u64 {
        self.fk_max.unwrap_or(default)
    }

    /// Random foreign key in `1..=fk_max`.
    pub fn foreign_key(&mut self, default: u64) -> i64 {
        let max = self.fk_max_or(default).max(1);
        self.rng.gen_range(1..=max) as i64
    }
}

/// Produces one record at a time for an entity.
pub trait RecordSynth {
    /// Synthesize the record at `index`.
    fn next_record(
        &mut self,
        ctx: &mut SynthContext,
        tracker: &mut UniquenessTracker,
        index: u64,
    ) -> Result<Record, GeneratorError>;
}

impl<F> RecordSynth for F
where
    F: FnMut(&mut SynthContext, &mut UniquenessTracker, u64) -> Result<Record, GeneratorError>,
{
    fn next_record(
        &mut self,
        ctx: &mut SynthContext,
        tracker: &mut UniquenessTracker,
        index: u64,
    ) -> Result<Record, GeneratorError> {
        self(ctx, tracker, index)
    }
}

/// How many records to produce, and what they may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthRequest {
    /// Number of records
    pub count: u64,
    /// Maximum valid referenced identifier (defaults per entity)
    pub fk_max: Option<u64>,
}

impl SynthRequest {
    /// Request `count` records with the entity's default foreign-key bound.
    pub fn new(count: u64) -> Self {
        Self {
            count,
            fk_max: None,
        }
    }

    /// Set the foreign-key bound.
    pub fn with_fk_max(mut self, fk_max: u64) -> Self {
        self.fk_max = Some(fk_max);
        self
    }
}

/// Data generator that produces deterministic records.
///
/// The generator uses a seeded random number generator to ensure
/// reproducible results across runs with the same seed and time anchor.
pub struct DataGenerator {
    ctx: SynthContext,
    progress_every: u64,
}

impl DataGenerator {
    /// Create a new data generator with the given seed and time anchor.
    pub fn new(seed: u64, now: NaiveDateTime) -> Self {
        Self {
            ctx: SynthContext::new(seed, now),
            progress_every: DEFAULT_PROGRESS_EVERY,
        }
    }

    /// Set the progress cadence (0 disables progress logging).
    pub fn with_progress_every(mut self, every: u64) -> Self {
        self.progress_every = every;
        self
    }

    /// Synthesize `request.count` records for `entity`.
    ///
    /// Unique fields are checked against `tracker` and regenerated on
    /// collision; the tracker is the only state touched besides the RNG.
    pub fn records(
        &mut self,
        entity: Entity,
        request: SynthRequest,
        tracker: &mut UniquenessTracker,
    ) -> Result<Vec<Record>, GeneratorError> {
        if request.fk_max == Some(0) {
            return Err(GeneratorError::InvalidForeignKeyBound(0));
        }
        self.ctx.fk_max = request.fk_max;

        let table = entity.table_name();
        let mut records = Vec::with_capacity(request.count as usize);
        let mut synth = entity.synth(&mut self.ctx);

        for index in 0..request.count {
            records.push(synth.next_record(&mut self.ctx, tracker, index)?);

            if self.progress_every > 0 && index > 0 && index % self.progress_every == 0 {
                info!(table, generated = index, "Synthesizing records");
            }
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use seed_core::FieldValue;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_zero_records() {
        let mut generator = DataGenerator::new(42, now());
        let mut tracker = UniquenessTracker::new();

        let records = generator
            .records(Entity::GinProfiles, SynthRequest::new(0), &mut tracker)
            .unwrap();

        assert!(records.is_empty());
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_deterministic_generation() {
        let mut gen1 = DataGenerator::new(7, now());
        let mut gen2 = DataGenerator::new(7, now());

        let rows1 = gen1
            .records(
                Entity::BtreeUsers,
                SynthRequest::new(5),
                &mut UniquenessTracker::new(),
            )
            .unwrap();
        let rows2 = gen2
            .records(
                Entity::BtreeUsers,
                SynthRequest::new(5),
                &mut UniquenessTracker::new(),
            )
            .unwrap();

        assert_eq!(rows1, rows2);
    }

    #[test]
    fn test_foreign_key_bound_is_respected() {
        let mut generator = DataGenerator::new(1, now());
        let records = generator
            .records(
                Entity::BtreeOrders,
                SynthRequest::new(200).with_fk_max(3),
                &mut UniquenessTracker::new(),
            )
            .unwrap();

        for record in &records {
            let user_id = record.get(0).and_then(FieldValue::as_i64).unwrap();
            assert!((1..=3).contains(&user_id), "user_id {user_id} out of range");
        }
    }

    #[test]
    fn test_zero_foreign_key_bound_rejected() {
        let mut generator = DataGenerator::new(1, now());
        let result = generator.records(
            Entity::BtreeOrders,
            SynthRequest::new(1).with_fk_max(0),
            &mut UniquenessTracker::new(),
        );

        assert!(matches!(
            result,
            Err(GeneratorError::InvalidForeignKeyBound(0))
        ));
    }

    #[test]
    fn test_every_entity_matches_its_table() {
        for entity in Entity::ALL {
            let mut generator = DataGenerator::new(3, now());
            let mut tracker = UniquenessTracker::new();
            let table = entity.table();
            let count = entity.fixed_rows().unwrap_or(25);

            let records = generator
                .records(entity, SynthRequest::new(count), &mut tracker)
                .unwrap();

            assert_eq!(records.len() as u64, count, "{entity:?}");
            for record in &records {
                table
                    .check_record(record)
                    .unwrap_or_else(|e| panic!("{entity:?}: {e}"));
            }
        }
    }
}
