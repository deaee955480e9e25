//! Hash suite: equality lookups on product codes, session ids and config keys.

use crate::generator::{GeneratorError, SynthContext, MAX_UNIQUE_ATTEMPTS};
use crate::generators::{
    coin, identifier, money, network, pick_str, temporal, text, truncate, unique_value,
};
use chrono::Duration;
use rand::Rng;
use seed_core::{ParamType, Record, TableSpec, UniquenessTracker};

const PRODUCT_CATEGORIES: &[&str] = &[
    "electronics",
    "books",
    "clothing",
    "home",
    "sports",
    "beauty",
    "toys",
    "food",
];

/// Referenced user ids default to the size of the products table.
const DEFAULT_MAX_USER_ID: u64 = 50_000;

/// Static application settings loaded into `config`.
pub(super) const CONFIG_ENTRIES: [(&str, &str); 15] = [
    ("app.name", "My Application"),
    ("app.version", "1.0.0"),
    ("database.host", "localhost"),
    ("database.port", "5432"),
    ("cache.enabled", "true"),
    ("cache.ttl", "3600"),
    ("email.smtp_host", "smtp.example.com"),
    ("email.smtp_port", "587"),
    ("logging.level", "INFO"),
    ("security.encryption_key", "secret-key-123"),
    ("ui.theme", "dark"),
    ("ui.language", "en"),
    ("payment.currency", "USD"),
    ("payment.provider", "stripe"),
    ("analytics.enabled", "true"),
];

pub(super) fn products_table() -> TableSpec {
    TableSpec::new("products")
        .column("product_code", ParamType::Text)
        .column("name", ParamType::Text)
        .column("category", ParamType::Text)
        .column("price", ParamType::Numeric)
        .column("supplier_id", ParamType::Int4)
        .column("in_stock", ParamType::Bool)
        .unique("product_code")
}

pub(super) fn sessions_table() -> TableSpec {
    TableSpec::new("user_sessions")
        .column("session_id", ParamType::Text)
        .column("user_id", ParamType::Int8)
        .column("created_at", ParamType::Timestamp)
        .column("expires_at", ParamType::Timestamp)
        .column("ip_address", ParamType::Inet)
        .column("user_agent", ParamType::Text)
        .column("is_valid", ParamType::Bool)
        .unique("session_id")
}

pub(super) fn config_table() -> TableSpec {
    TableSpec::new("config")
        .column("config_key", ParamType::Text)
        .column("config_value", ParamType::Text)
        .unique("config_key")
}

pub(super) fn product(
    ctx: &mut SynthContext,
    tracker: &mut UniquenessTracker,
    _index: u64,
) -> Result<Record, GeneratorError> {
    let code = unique_value(ctx, tracker, "product_code", |ctx| {
        identifier::code(ctx.rng(), "PROD", 100_000, 999_999)
    })?;
    let rng = ctx.rng();

    Ok(Record::new(vec![
        code.into(),
        truncate(&text::company(rng), 100).into(),
        pick_str(rng, PRODUCT_CATEGORIES).into(),
        money(rng, 1.0, 1000.0).into(),
        rng.gen_range(1..=1000i32).into(),
        coin(rng).into(),
    ]))
}

pub(super) fn session(
    ctx: &mut SynthContext,
    tracker: &mut UniquenessTracker,
    index: u64,
) -> Result<Record, GeneratorError> {
    let session_id = unique_value(ctx, tracker, "session_id", |ctx| {
        identifier::session_token(ctx.rng(), index)
    })?;
    let user_id = ctx.foreign_key(DEFAULT_MAX_USER_ID);
    let now = ctx.now();
    let rng = ctx.rng();

    Ok(Record::new(vec![
        session_id.into(),
        user_id.into(),
        temporal::datetime_within_days(rng, now, 30).into(),
        temporal::datetime_between(rng, now, now + Duration::days(30)).into(),
        network::ipv4(rng).into(),
        network::user_agent(rng).into(),
        coin(rng).into(),
    ]))
}

/// Emit the `index`-th static entry; the key space ends with the list.
pub(super) fn config_entry(
    _ctx: &mut SynthContext,
    tracker: &mut UniquenessTracker,
    index: u64,
) -> Result<Record, GeneratorError> {
    let (key, value) = usize::try_from(index)
        .ok()
        .and_then(|i| CONFIG_ENTRIES.get(i))
        .filter(|(key, _)| tracker.claim("config_key", key))
        .ok_or_else(|| GeneratorError::UniqueSpaceExhausted {
            field: "config_key".to_string(),
            attempts: MAX_UNIQUE_ATTEMPTS,
        })?;

    Ok(Record::new(vec![(*key).into(), (*value).into()]))
}
