//! GIN suite: arrays, JSONB documents and full-text articles.

use crate::generator::{GeneratorError, SynthContext};
use crate::generators::{
    coin, decimal, identifier, network, pick, pick_str, round_to, sample, temporal, text,
    truncate, uniform, unique_value,
};
use chrono::{Datelike, Duration, NaiveDate};
use fake::faker::address::en::{CountryName, StreetName, ZipCode};
use fake::faker::company::en::Profession;
use fake::Fake;
use rand::Rng;
use seed_core::{ParamType, Record, TableSpec, UniquenessTracker};
use serde_json::{json, Value};

const PRODUCT_TAGS: &[&str] = &[
    "electronics",
    "home",
    "kitchen",
    "sports",
    "books",
    "clothing",
    "beauty",
    "toys",
    "garden",
    "office",
    "digital",
    "premium",
    "sale",
    "new",
    "bestseller",
    "eco-friendly",
    "handmade",
];

/// Main category with its subcategories.
const PRODUCT_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "electronics",
        &["smartphone", "laptop", "tablet", "headphones", "camera"],
    ),
    ("home", &["furniture", "decor", "lighting", "storage"]),
    ("kitchen", &["appliances", "cookware", "utensils", "storage"]),
    ("clothing", &["men", "women", "kids", "accessories"]),
    ("books", &["fiction", "non-fiction", "educational", "children"]),
];

const PRODUCT_FEATURES: &[&str] = &["wireless", "waterproof", "energy-saving", "smart", "portable"];

const ARTICLE_KEYWORDS: &[&str] = &[
    "technology",
    "science",
    "health",
    "education",
    "business",
    "politics",
    "sports",
    "entertainment",
    "travel",
    "food",
    "AI",
    "machine learning",
    "blockchain",
    "cloud",
    "security",
    "innovation",
    "startup",
    "digital",
    "sustainable",
    "global",
];

const ARTICLE_TOPICS: &[&str] = &["AI", "cloud", "security", "development", "data"];

const DOC_TYPES: &[&str] = &["contract", "report", "proposal", "manual", "policy", "guideline"];
const ACCESS_LEVELS: &[&str] = &["public", "internal", "confidential", "secret"];
const ATTACHMENT_TYPES: &[&str] = &["pdf", "doc", "xls", "image", "zip"];

const LOG_LEVELS: &[&str] = &["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"];
const LOG_TAGS: &[&str] = &[
    "authentication",
    "database",
    "api",
    "security",
    "performance",
    "payment",
    "notification",
    "cache",
    "network",
    "storage",
];
const HTTP_METHODS: &[&str] = &["GET", "POST", "PUT", "DELETE"];
const STATUS_CODES: &[i32] = &[200, 201, 400, 401, 403, 404, 500];

/// Words per minute used for the reading-time estimate.
const READING_SPEED: usize = 200;

pub(super) fn products_table() -> TableSpec {
    TableSpec::new("products")
        .column("name", ParamType::Text)
        .column("description", ParamType::Text)
        .column("tags", ParamType::TextArray)
        .column("categories", ParamType::TextArray)
        .column("prices", ParamType::NumericArray)
        .column("attributes", ParamType::Jsonb)
}

pub(super) fn profiles_table() -> TableSpec {
    TableSpec::new("user_profiles")
        .column("username", ParamType::Text)
        .column("profile_data", ParamType::Jsonb)
        .column("preferences", ParamType::Jsonb)
        .column("activity_log", ParamType::Jsonb)
        .unique("username")
}

pub(super) fn articles_table() -> TableSpec {
    TableSpec::new("articles")
        .column("title", ParamType::Text)
        .column("content", ParamType::Text)
        .column("author", ParamType::Text)
        .column("keywords", ParamType::TextArray)
        .column("metadata", ParamType::Jsonb)
}

pub(super) fn documents_table() -> TableSpec {
    TableSpec::new("documents")
        .column("doc_type", ParamType::Text)
        .column("title", ParamType::Text)
        .column("content", ParamType::Text)
        .column("properties", ParamType::Jsonb)
        .column("attachments", ParamType::TextArray)
        .column("access_control", ParamType::TextArray)
}

pub(super) fn logs_table() -> TableSpec {
    TableSpec::new("log_entries")
        .column("log_level", ParamType::Text)
        .column("message", ParamType::Text)
        .column("context", ParamType::Jsonb)
        .column("tags", ParamType::TextArray)
        .column("ip_address", ParamType::Inet)
        .column("user_agent", ParamType::Text)
}

pub(super) fn product(
    ctx: &mut SynthContext,
    _tracker: &mut UniquenessTracker,
    _index: u64,
) -> Result<Record, GeneratorError> {
    let rng = ctx.rng();

    let (main_category, subcategories) = *pick(rng, PRODUCT_CATEGORIES);

    let tag_count = rng.gen_range(3..=8);
    let mut tags = sample(rng, PRODUCT_TAGS, tag_count);
    tags.push(main_category.to_string());

    let category_count = rng.gen_range(1..=3).min(subcategories.len());
    let categories = sample(rng, subcategories, category_count);

    let base_price = uniform(rng, 10.0, 1000.0, 2);
    let price_count = rng.gen_range(1..=4u32);
    let prices: Vec<_> = (0..price_count)
        .map(|i| decimal(base_price * (1.0 + f64::from(i) * 0.1), 2))
        .collect();

    let feature_count = rng.gen_range(1..=3);
    let attributes = json!({
        "weight": uniform(rng, 0.1, 50.0, 2),
        "dimensions": {
            "width": uniform(rng, 5.0, 100.0, 1),
            "height": uniform(rng, 5.0, 100.0, 1),
            "depth": uniform(rng, 5.0, 100.0, 1),
        },
        "features": sample(rng, PRODUCT_FEATURES, feature_count),
        "warranty_months": rng.gen_range(0..=36u32),
        "in_stock": coin(rng),
    });

    Ok(Record::new(vec![
        truncate(&text::catch_phrase(rng), 200).into(),
        truncate(&text::paragraph(rng), 500).into(),
        tags.into(),
        categories.into(),
        prices.into(),
        attributes.into(),
    ]))
}

pub(super) fn profile(
    ctx: &mut SynthContext,
    tracker: &mut UniquenessTracker,
    _index: u64,
) -> Result<Record, GeneratorError> {
    let username = unique_value(ctx, tracker, "username", |ctx| {
        truncate(&text::username(ctx.rng()), 50)
    })?;
    let now = ctx.now();
    let rng = ctx.rng();

    let street: String = StreetName().fake_with_rng(rng);
    let country: String = CountryName().fake_with_rng(rng);
    let zipcode: String = ZipCode().fake_with_rng(rng);
    let position: String = Profession().fake_with_rng(rng);

    let profile_data = json!({
        "personal": {
            "first_name": text::first_name(rng),
            "last_name": text::last_name(rng),
            "birth_date": temporal::birth_date(rng, now, 18, 80).to_string(),
            "gender": pick_str(rng, &["male", "female", "other"]),
            "phone": text::phone(rng),
        },
        "address": {
            "street": format!("{} {street}", rng.gen_range(1..=9999u32)),
            "city": text::city(rng),
            "country": country,
            "zipcode": zipcode,
        },
        "employment": {
            "company": text::company(rng),
            "position": position,
            "industry": pick_str(rng, &["IT", "Finance", "Healthcare", "Education", "Retail"]),
        },
    });

    let preferences = json!({
        "notifications": {
            "email": coin(rng),
            "sms": coin(rng),
            "push": coin(rng),
        },
        "privacy": {
            "profile_visible": coin(rng),
            "search_visible": coin(rng),
        },
        "theme": pick_str(rng, &["light", "dark", "auto"]),
        "language": pick_str(rng, &["en", "ru", "de", "fr", "es"]),
    });

    let activity_count = rng.gen_range(1..=5);
    let activity_log: Vec<Value> = (0..activity_count)
        .map(|_| {
            json!({
                "action": pick_str(rng, &["login", "view", "purchase", "search", "update_profile"]),
                "timestamp": temporal::iso8601(rng, now),
                "ip": network::ipv4(rng),
                "user_agent": network::user_agent(rng),
            })
        })
        .collect();

    Ok(Record::new(vec![
        username.into(),
        profile_data.into(),
        preferences.into(),
        Value::Array(activity_log).into(),
    ]))
}

pub(super) fn article(
    ctx: &mut SynthContext,
    _tracker: &mut UniquenessTracker,
    _index: u64,
) -> Result<Record, GeneratorError> {
    let rng = ctx.rng();

    let title = truncate(&text::sentence(rng), 300);
    let paragraphs = rng.gen_range(3..=8);
    let content = text::paragraphs(rng, paragraphs);
    let word_count = content.split_whitespace().count();
    let keyword_count = rng.gen_range(3..=6);
    let keywords = sample(rng, ARTICLE_KEYWORDS, keyword_count);
    let topic_count = rng.gen_range(1..=3);

    let metadata = json!({
        "word_count": word_count,
        "reading_time": round_to(word_count as f64 / READING_SPEED as f64, 0) as u64,
        "category": pick_str(rng, &["news", "tutorial", "opinion", "research", "review"]),
        "topics": sample(rng, ARTICLE_TOPICS, topic_count),
        "is_featured": coin(rng),
        "is_premium": coin(rng),
    });

    Ok(Record::new(vec![
        title.into(),
        content.into(),
        text::full_name(rng).into(),
        keywords.into(),
        metadata.into(),
    ]))
}

pub(super) fn document(
    ctx: &mut SynthContext,
    _tracker: &mut UniquenessTracker,
    _index: u64,
) -> Result<Record, GeneratorError> {
    let now = ctx.now();
    let rng = ctx.rng();

    let doc_type = pick_str(rng, DOC_TYPES);
    let reviewer_count = rng.gen_range(1..=3);
    let reviewers: Vec<String> = (0..reviewer_count).map(|_| text::full_name(rng)).collect();
    let today = now.date();
    let decade_start =
        NaiveDate::from_ymd_opt(today.year() - today.year() % 10, 1, 1).unwrap_or(today);

    let properties = json!({
        "document_id": identifier::uuid_v4(rng).to_string(),
        "version": rng.gen_range(1..=10u32),
        "status": pick_str(rng, &["draft", "review", "approved", "archived"]),
        "department": pick_str(rng, &["HR", "Finance", "IT", "Marketing", "Operations"]),
        "author": text::full_name(rng),
        "reviewers": reviewers,
        "effective_date": temporal::date_between(rng, decade_start, today).to_string(),
        "expiry_date": temporal::date_between(
            rng,
            today + Duration::days(1),
            today + Duration::days(30),
        )
        .to_string(),
    });

    let attachment_count = rng.gen_range(0..=3);
    let attachments: Vec<String> = (0..attachment_count)
        .map(|_| format!("{}.{}", text::word(rng), pick(rng, ATTACHMENT_TYPES)))
        .collect();

    let access_count = rng.gen_range(1..=3);
    let access_control = sample(rng, ACCESS_LEVELS, access_count);

    Ok(Record::new(vec![
        doc_type.into(),
        truncate(&text::catch_phrase(rng), 200).into(),
        truncate(&text::paragraphs(rng, 2), 1000).into(),
        properties.into(),
        attachments.into(),
        access_control.into(),
    ]))
}

pub(super) fn log_entry(
    ctx: &mut SynthContext,
    _tracker: &mut UniquenessTracker,
    _index: u64,
) -> Result<Record, GeneratorError> {
    let now = ctx.now();
    let rng = ctx.rng();

    let level = pick_str(rng, LOG_LEVELS);

    let context = json!({
        "request_id": identifier::uuid_v4(rng).to_string(),
        "session_id": identifier::uuid_v4(rng).to_string(),
        "user_id": rng.gen_range(1..=10_000u32),
        "endpoint": format!("/api/{}", network::uri_path(rng)),
        "method": pick_str(rng, HTTP_METHODS),
        "status_code": *pick(rng, STATUS_CODES),
        "response_time_ms": rng.gen_range(10..=5000u32),
        "timestamp": temporal::iso8601(rng, now),
    });

    let tag_count = rng.gen_range(1..=4);
    let mut tags = sample(rng, LOG_TAGS, tag_count);
    tags.push(level.to_lowercase());

    Ok(Record::new(vec![
        level.into(),
        text::sentence(rng).into(),
        context.into(),
        tags.into(),
        network::ipv4(rng).into(),
        network::user_agent(rng).into(),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use rust_decimal::Decimal;
    use seed_core::FieldValue;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_product_tags_end_with_main_category() {
        let mut ctx = SynthContext::new(13, now());
        let mut tracker = UniquenessTracker::new();

        for i in 0..100 {
            let record = product(&mut ctx, &mut tracker, i).unwrap();
            let tags = match record.get(2) {
                Some(FieldValue::TextArray(tags)) => tags.clone(),
                other => panic!("unexpected tags {other:?}"),
            };
            assert!((4..=9).contains(&tags.len()));
            let main = tags.last().unwrap();
            assert!(PRODUCT_CATEGORIES.iter().any(|(name, _)| name == main));
        }
    }

    #[test]
    fn test_product_prices_step_by_ten_percent() {
        let mut ctx = SynthContext::new(13, now());
        let mut tracker = UniquenessTracker::new();

        for i in 0..100 {
            let record = product(&mut ctx, &mut tracker, i).unwrap();
            match record.get(4) {
                Some(FieldValue::NumericArray(prices)) => {
                    assert!((1..=4).contains(&prices.len()));
                    assert!(prices.windows(2).all(|w| w[1] >= w[0]));
                    assert!(prices[0] >= Decimal::from(10));
                }
                other => panic!("unexpected prices {other:?}"),
            }
        }
    }

    #[test]
    fn test_profiles_have_unique_usernames() {
        let mut ctx = SynthContext::new(13, now());
        let mut tracker = UniquenessTracker::new();

        for i in 0..300 {
            let record = profile(&mut ctx, &mut tracker, i).unwrap();
            match record.get(3) {
                Some(FieldValue::Json(Value::Array(log))) => {
                    assert!((1..=5).contains(&log.len()))
                }
                other => panic!("unexpected activity log {other:?}"),
            }
        }
        assert_eq!(tracker.len("username"), 300);
    }

    #[test]
    fn test_article_metadata_counts_words() {
        let mut ctx = SynthContext::new(13, now());
        let record = article(&mut ctx, &mut UniquenessTracker::new(), 0).unwrap();
        let content = record.get(1).and_then(FieldValue::as_str).unwrap();

        match record.get(4) {
            Some(FieldValue::Json(metadata)) => {
                assert_eq!(
                    metadata["word_count"].as_u64().unwrap() as usize,
                    content.split_whitespace().count()
                );
            }
            other => panic!("unexpected metadata {other:?}"),
        }
    }

    #[test]
    fn test_log_tags_include_level() {
        let mut ctx = SynthContext::new(13, now());
        let mut tracker = UniquenessTracker::new();

        for i in 0..50 {
            let record = log_entry(&mut ctx, &mut tracker, i).unwrap();
            let level = record.get(0).and_then(FieldValue::as_str).unwrap();
            match record.get(3) {
                Some(FieldValue::TextArray(tags)) => {
                    assert_eq!(tags.last().unwrap(), &level.to_lowercase());
                }
                other => panic!("unexpected tags {other:?}"),
            }
        }
    }
}
