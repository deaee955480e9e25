//! GiST suite: full-text documents, time ranges, network ranges and coordinates.

use crate::generator::{GeneratorError, SynthContext};
use crate::generators::{
    capitalize, network, pick, pick_str, sample, temporal, text, truncate,
};
use chrono::Duration;
use rand::Rng;
use seed_core::{FieldValue, ParamType, Record, TableSpec, UniquenessTracker};

const DOCUMENT_TAGS: &[&str] = &[
    "technology",
    "science",
    "health",
    "education",
    "business",
    "entertainment",
    "sports",
    "politics",
    "travel",
    "food",
];

const EVENT_TYPES: &[&str] = &[
    "conference",
    "meeting",
    "workshop",
    "seminar",
    "exhibition",
    "concert",
    "festival",
    "sports_event",
    "webinar",
    "training",
];

const DEVICE_STATUSES: &[&str] = &["active", "inactive", "maintenance", "offline"];

const DEVICE_NETWORKS: &[&str] = &[
    "192.168.1.0/24",
    "10.0.0.0/16",
    "172.16.0.0/20",
    "192.168.100.0/24",
    "10.10.0.0/16",
];

const LOCATION_CATEGORIES: &[&str] = &[
    "restaurant",
    "hotel",
    "museum",
    "park",
    "shop",
    "hospital",
    "school",
    "office",
];

/// City name with its reference coordinates.
const CITIES: &[(&str, f64, f64)] = &[
    ("Moscow", 55.7558, 37.6173),
    ("Saint Petersburg", 59.9343, 30.3351),
    ("Novosibirsk", 55.0084, 82.9357),
    ("Yekaterinburg", 56.8389, 60.6057),
    ("Kazan", 55.7963, 49.1089),
];

pub(super) fn documents_table() -> TableSpec {
    TableSpec::new("documents")
        .column("title", ParamType::Text)
        .column("content", ParamType::Text)
        .column("author", ParamType::Text)
        .column("publication_date", ParamType::Date)
        .column("tags", ParamType::TextArray)
}

pub(super) fn events_table() -> TableSpec {
    TableSpec::new("events")
        .column("event_name", ParamType::Text)
        .column("event_period", ParamType::TsRange)
        .column("location", ParamType::Text)
        .column("max_participants", ParamType::Int4)
        .column("description", ParamType::Text)
}

pub(super) fn network_devices_table() -> TableSpec {
    TableSpec::new("network_devices")
        .column("device_name", ParamType::Text)
        .column("ip_range", ParamType::Inet)
        .column("mac_address", ParamType::MacAddr)
        .column("location", ParamType::Text)
        .column("status", ParamType::Text)
}

pub(super) fn locations_table() -> TableSpec {
    TableSpec::new("simple_locations")
        .column("name", ParamType::Text)
        .column("x_coord", ParamType::Float8)
        .column("y_coord", ParamType::Float8)
        .column("address", ParamType::Text)
        .column("city", ParamType::Text)
        .column("category", ParamType::Text)
}

pub(super) fn document(
    ctx: &mut SynthContext,
    _tracker: &mut UniquenessTracker,
    _index: u64,
) -> Result<Record, GeneratorError> {
    let now = ctx.now();
    let rng = ctx.rng();

    let title = truncate(&text::sentence(rng), 200);
    let paragraphs = rng.gen_range(3..=8);
    let content = text::paragraphs(rng, paragraphs);
    let author = text::full_name(rng);
    let published = temporal::date_within_days(rng, now, 5 * 365);
    let tag_count = rng.gen_range(2..=5);

    Ok(Record::new(vec![
        title.into(),
        content.into(),
        author.into(),
        published.into(),
        sample(rng, DOCUMENT_TAGS, tag_count).into(),
    ]))
}

pub(super) fn event(
    ctx: &mut SynthContext,
    _tracker: &mut UniquenessTracker,
    _index: u64,
) -> Result<Record, GeneratorError> {
    let now = ctx.now();
    let rng = ctx.rng();

    let start = temporal::datetime_between(
        rng,
        now - Duration::days(365),
        now + Duration::days(365),
    );
    let end = start + Duration::hours(rng.gen_range(1..=72));
    let event_type = pick_str(rng, EVENT_TYPES);
    let name = format!("{event_type}: {}", text::catch_phrase(rng));

    Ok(Record::new(vec![
        truncate(&name, 100).into(),
        FieldValue::tsrange(start, end),
        pick(rng, CITIES).0.into(),
        rng.gen_range(10..=1000i32).into(),
        truncate(&text::paragraph(rng), 500).into(),
    ]))
}

pub(super) fn network_device(
    ctx: &mut SynthContext,
    _tracker: &mut UniquenessTracker,
    _index: u64,
) -> Result<Record, GeneratorError> {
    let rng = ctx.rng();

    let name = format!(
        "{}-{}-{}",
        capitalize(&text::word(rng)),
        capitalize(&text::word(rng)),
        rng.gen_range(1000..=9999)
    );

    Ok(Record::new(vec![
        name.into(),
        network::host_in(rng, DEVICE_NETWORKS).into(),
        network::mac_address(rng).into(),
        text::city(rng).into(),
        pick_str(rng, DEVICE_STATUSES).into(),
    ]))
}

pub(super) fn location(
    ctx: &mut SynthContext,
    _tracker: &mut UniquenessTracker,
    _index: u64,
) -> Result<Record, GeneratorError> {
    let rng = ctx.rng();

    let (city, base_x, base_y) = *pick(rng, CITIES);
    let x = base_x + rng.gen_range(-0.5..=0.5);
    let y = base_y + rng.gen_range(-0.5..=0.5);

    Ok(Record::new(vec![
        truncate(&text::company(rng), 100).into(),
        x.into(),
        y.into(),
        text::address(rng).into(),
        city.into(),
        pick_str(rng, LOCATION_CATEGORIES).into(),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_document_tags_are_distinct() {
        let mut ctx = SynthContext::new(8, now());
        let mut tracker = UniquenessTracker::new();

        for i in 0..100 {
            let record = document(&mut ctx, &mut tracker, i).unwrap();
            match record.get(4) {
                Some(FieldValue::TextArray(tags)) => {
                    assert!((2..=5).contains(&tags.len()));
                    let mut distinct = tags.clone();
                    distinct.sort();
                    distinct.dedup();
                    assert_eq!(distinct.len(), tags.len());
                }
                other => panic!("unexpected tags {other:?}"),
            }
        }
    }

    #[test]
    fn test_event_period_literal() {
        let mut ctx = SynthContext::new(8, now());
        let record = event(&mut ctx, &mut UniquenessTracker::new(), 0).unwrap();
        let period = record.get(1).and_then(FieldValue::as_str).unwrap();

        assert!(period.starts_with('['));
        assert!(period.ends_with(']'));
        assert_eq!(period.split(", ").count(), 2);
    }

    #[test]
    fn test_locations_stay_near_their_city() {
        let mut ctx = SynthContext::new(8, now());
        let mut tracker = UniquenessTracker::new();

        for i in 0..100 {
            let record = location(&mut ctx, &mut tracker, i).unwrap();
            let city = record.get(4).and_then(FieldValue::as_str).unwrap();
            let (_, base_x, _) = CITIES.iter().find(|(name, _, _)| *name == city).unwrap();
            match record.get(1) {
                Some(FieldValue::Float64(x)) => assert!((x - base_x).abs() <= 0.5 + 1e-9),
                other => panic!("unexpected x_coord {other:?}"),
            }
        }
    }
}
