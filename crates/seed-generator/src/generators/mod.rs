//! Value helpers shared by the entity synthesizers.
//!
//! Each submodule wraps one family of values (identifiers, network
//! addresses, free text, dates); this module holds the small numeric and
//! categorical helpers plus the unique-value retry loop.

pub mod identifier;
pub mod network;
pub mod temporal;
pub mod text;

use crate::generator::{GeneratorError, SynthContext, MAX_UNIQUE_ATTEMPTS};
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;
use seed_core::UniquenessTracker;

/// Draw candidates until one is new for `field`, then claim it.
pub fn unique_value<F>(
    ctx: &mut SynthContext,
    tracker: &mut UniquenessTracker,
    field: &str,
    mut candidate: F,
) -> Result<String, GeneratorError>
where
    F: FnMut(&mut SynthContext) -> String,
{
    for _ in 0..MAX_UNIQUE_ATTEMPTS {
        let value = candidate(ctx);
        if tracker.claim(field, &value) {
            return Ok(value);
        }
    }

    Err(GeneratorError::UniqueSpaceExhausted {
        field: field.to_string(),
        attempts: MAX_UNIQUE_ATTEMPTS,
    })
}

/// Pick one element uniformly.
///
/// # Panics
///
/// Panics on an empty slice; the enumerations used here are constant.
pub fn pick<'a, R: Rng + ?Sized, T>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

/// Pick one string and own it.
pub fn pick_str<R: Rng + ?Sized>(rng: &mut R, items: &[&str]) -> String {
    pick(rng, items).to_string()
}

/// Sample `amount` distinct elements in random order.
pub fn sample<R: Rng + ?Sized>(rng: &mut R, pool: &[&str], amount: usize) -> Vec<String> {
    pool.choose_multiple(rng, amount)
        .map(|s| s.to_string())
        .collect()
}

/// Fair coin.
pub fn coin<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.gen_bool(0.5)
}

/// Round to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Uniform float in `min..=max`, rounded.
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64, places: i32) -> f64 {
    round_to(rng.gen_range(min..=max), places)
}

/// Exact decimal with `places` fractional digits.
pub fn decimal(value: f64, places: u32) -> Decimal {
    Decimal::from_f64_retain(value)
        .unwrap_or_default()
        .round_dp(places)
}

/// Uniform monetary amount in `min..=max` with two decimals.
pub fn money<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> Decimal {
    decimal(rng.gen_range(min..=max), 2)
}

/// Truncate to at most `max_chars` characters.
pub fn truncate(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

/// Uppercase the first character.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ctx() -> SynthContext {
        let now = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        SynthContext::new(42, now)
    }

    #[test]
    fn test_unique_value_regenerates_on_collision() {
        let mut ctx = ctx();
        let mut tracker = UniquenessTracker::new();
        let mut candidates = ["alice", "alice", "bob37", "alice", "carol9"].into_iter();

        let usernames: Vec<String> = (0..3)
            .map(|_| {
                unique_value(&mut ctx, &mut tracker, "username", |_| {
                    candidates.next().unwrap().to_string()
                })
                .unwrap()
            })
            .collect();

        assert_eq!(usernames, vec!["alice", "bob37", "carol9"]);
        assert_eq!(tracker.len("username"), 3);
    }

    #[test]
    fn test_unique_value_gives_up() {
        let mut ctx = ctx();
        let mut tracker = UniquenessTracker::new();
        tracker.claim("sku", "SKU1");

        let result = unique_value(&mut ctx, &mut tracker, "sku", |_| "SKU1".to_string());

        assert!(matches!(
            result,
            Err(GeneratorError::UniqueSpaceExhausted { attempts, .. }) if attempts == MAX_UNIQUE_ATTEMPTS
        ));
    }

    #[test]
    fn test_sample_is_distinct() {
        let mut rng = StdRng::seed_from_u64(42);
        let pool = ["a", "b", "c", "d", "e"];

        for _ in 0..50 {
            let mut picked = sample(&mut rng, &pool, 3);
            assert_eq!(picked.len(), 3);
            picked.sort();
            picked.dedup();
            assert_eq!(picked.len(), 3);
        }
    }

    #[test]
    fn test_money_has_two_places() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let amount = money(&mut rng, 10.0, 1000.0);
            assert!(amount.scale() <= 2);
            assert!(amount >= Decimal::from(10) && amount <= Decimal::from(1000));
        }
    }

    #[test]
    fn test_text_helpers() {
        assert_eq!(truncate("abcdef", 3), "abc");
        assert_eq!(truncate("ab", 3), "ab");
        assert_eq!(capitalize("widget"), "Widget");
        assert_eq!(capitalize(""), "");
        assert_eq!(round_to(1.23456, 2), 1.23);
    }
}
