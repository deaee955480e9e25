//! Per-run tracking of values emitted for unique fields.

use std::collections::{HashMap, HashSet};

/// Values already emitted for each unique-constrained field.
///
/// A tracker is owned by whoever drives one generation run and passed into
/// the synthesizer explicitly. It is not persisted and must not be shared
/// across entity types: two tables may legitimately reuse a value.
#[derive(Debug, Default, Clone)]
pub struct UniquenessTracker {
    fields: HashMap<String, HashSet<String>>,
}

impl UniquenessTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` for `field`.
    ///
    /// Returns `true` if the value was new, `false` if it had already been
    /// emitted (the tracker is left unchanged in that case).
    pub fn claim(&mut self, field: &str, value: &str) -> bool {
        match self.fields.get_mut(field) {
            Some(values) => {
                if values.contains(value) {
                    false
                } else {
                    values.insert(value.to_string())
                }
            }
            None => {
                self.fields
                    .insert(field.to_string(), HashSet::from([value.to_string()]));
                true
            }
        }
    }

    /// Whether `value` was already emitted for `field`.
    pub fn contains(&self, field: &str, value: &str) -> bool {
        self.fields
            .get(field)
            .is_some_and(|values| values.contains(value))
    }

    /// Number of distinct values emitted for `field`.
    pub fn len(&self, field: &str) -> usize {
        self.fields.get(field).map_or(0, HashSet::len)
    }

    /// Whether nothing has been claimed yet.
    pub fn is_empty(&self) -> bool {
        self.fields.values().all(HashSet::is_empty)
    }

    /// Names of the fields being tracked.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}
