//! Identifier generators: UUIDs, session tokens and prefixed codes.

use rand::Rng;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Random UUID v4 drawn from the given RNG (deterministic under a seed).
pub fn uuid_v4<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    uuid::Builder::from_random_bytes(rng.gen()).into_uuid()
}

/// SHA-256 hex token derived from the row index and a random UUID.
pub fn session_token<R: Rng + ?Sized>(rng: &mut R, index: u64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{index}{}", uuid_v4(rng)).as_bytes());
    hex::encode(hasher.finalize())
}

/// Prefixed numeric code such as `PROD482913` or `SKU10442`.
pub fn code<R: Rng + ?Sized>(rng: &mut R, prefix: &str, min: u32, max: u32) -> String {
    format!("{prefix}{}", rng.gen_range(min..=max))
}
