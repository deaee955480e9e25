//! SP-GiST suite: points, clustered data, prefix-heavy words, addresses and boxes.

use crate::generator::{GeneratorError, RecordSynth, SynthContext};
use crate::generators::{network, pick, pick_str, text};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use seed_core::{FieldValue, ParamType, Record, TableSpec, UniquenessTracker};
use serde_json::json;

const SPATIAL_OBJECT_TYPES: &[&str] = &[
    "building", "tree", "vehicle", "person", "sensor", "landmark", "station",
];

const BOX_OBJECT_TYPES: &[&str] = &[
    "window",
    "button",
    "image",
    "text",
    "container",
    "panel",
    "dialog",
];

/// Cluster centre `(x, y)` and radius.
const CLUSTERS: [(f64, f64, f64); 4] = [
    (200.0, 200.0, 50.0),
    (700.0, 300.0, 80.0),
    (400.0, 600.0, 60.0),
    (800.0, 700.0, 40.0),
];

/// Labels cycle over three letters, so the fourth cluster shares `cluster_A`.
const CLUSTER_LABELS: [&str; 3] = ["cluster_A", "cluster_B", "cluster_C"];

const CLUSTERED_SHARE: f64 = 0.8;

const WORD_PREFIXES: &[&str] = &[
    "auto", "bio", "tele", "micro", "macro", "hyper", "super", "inter", "trans", "multi",
];
const WORD_SUFFIXES: &[&str] = &["tion", "ment", "ness", "ity", "ance", "ence", "ship", "hood"];
const RANDOM_WORDS: usize = 1000;

const LANGUAGES: &[&str] = &["english", "russian", "german", "french", "spanish"];
const PARTS_OF_SPEECH: &[&str] = &[
    "noun",
    "verb",
    "adjective",
    "adverb",
    "preposition",
    "conjunction",
];

const ADDRESS_NETWORKS: &[&str] = &[
    "192.168.0.0/16",
    "10.0.0.0/8",
    "172.16.0.0/12",
    "203.0.113.0/24",
    "198.51.100.0/24",
];
const COUNTRY_CODES: &[&str] = &["US", "RU", "DE", "FR", "CN", "JP", "BR", "IN", "GB", "CA"];

pub(super) fn spatial_table() -> TableSpec {
    TableSpec::new("spatial_data")
        .column("location_name", ParamType::Text)
        .column("coordinates", ParamType::Point)
        .column("object_type", ParamType::Text)
}

pub(super) fn multidimensional_table() -> TableSpec {
    TableSpec::new("multidimensional_data")
        .column("data_point", ParamType::Point)
        .column("category", ParamType::Text)
        .column("metadata", ParamType::Jsonb)
}

pub(super) fn text_table() -> TableSpec {
    TableSpec::new("text_data")
        .column("word", ParamType::Text)
        .column("language", ParamType::Text)
        .column("frequency", ParamType::Int4)
        .column("part_of_speech", ParamType::Text)
}

pub(super) fn network_table() -> TableSpec {
    TableSpec::new("network_data")
        .column("ip_address", ParamType::Inet)
        .column("hostname", ParamType::Text)
        .column("network_range", ParamType::Cidr)
        .column("country_code", ParamType::Text)
}

pub(super) fn boxes_table() -> TableSpec {
    TableSpec::new("bounding_boxes")
        .column("box_name", ParamType::Text)
        .column("bbox", ParamType::Box)
        .column("object_type", ParamType::Text)
}

pub(super) fn spatial_point(
    ctx: &mut SynthContext,
    _tracker: &mut UniquenessTracker,
    _index: u64,
) -> Result<Record, GeneratorError> {
    let rng = ctx.rng();
    let name = text::title_words(rng);
    let x = rng.gen_range(0.0..=1000.0);
    let y = rng.gen_range(0.0..=1000.0);

    Ok(Record::new(vec![
        name.into(),
        FieldValue::point(x, y),
        pick_str(rng, SPATIAL_OBJECT_TYPES).into(),
    ]))
}

pub(super) fn multidimensional_point(
    ctx: &mut SynthContext,
    _tracker: &mut UniquenessTracker,
    _index: u64,
) -> Result<Record, GeneratorError> {
    let generated_at = ctx.now().format("%Y-%m-%dT%H:%M:%S").to_string();
    let rng = ctx.rng();

    let (x, y, category) = if rng.gen_bool(CLUSTERED_SHARE) {
        let cluster = rng.gen_range(0..CLUSTERS.len());
        let (cx, cy, radius) = CLUSTERS[cluster];
        (
            gaussian(rng, cx, radius / 3.0).clamp(0.0, 1000.0),
            gaussian(rng, cy, radius / 3.0).clamp(0.0, 1000.0),
            CLUSTER_LABELS[cluster % CLUSTER_LABELS.len()].to_string(),
        )
    } else {
        (
            rng.gen_range(0.0..=1000.0),
            rng.gen_range(0.0..=1000.0),
            pick_str(rng, &["outlier", "noise"]),
        )
    };

    let metadata = json!({
        "generated_at": generated_at,
        "cluster_id": cluster_id(x, y),
        "density": rng.gen_range(0.1..=1.0),
    });

    Ok(Record::new(vec![
        FieldValue::point(x, y),
        category.into(),
        metadata.into(),
    ]))
}

/// Build the word synthesizer; the vocabulary is drawn once per request.
pub(super) fn text_words(ctx: &mut SynthContext) -> Box<dyn RecordSynth> {
    let vocabulary = vocabulary(ctx.rng());

    Box::new(
        move |ctx: &mut SynthContext,
              _tracker: &mut UniquenessTracker,
              _index: u64|
              -> Result<Record, GeneratorError> {
            let rng = ctx.rng();
            let mut word = pick(rng, &vocabulary).clone();
            if rng.gen_bool(0.3) {
                word = format!("{}{word}", pick(rng, WORD_PREFIXES));
            }

            Ok(Record::new(vec![
                word.chars().take(100).collect::<String>().into(),
                pick_str(rng, LANGUAGES).into(),
                rng.gen_range(1..=10_000i32).into(),
                pick_str(rng, PARTS_OF_SPEECH).into(),
            ]))
        },
    )
}

pub(super) fn network_address(
    ctx: &mut SynthContext,
    _tracker: &mut UniquenessTracker,
    _index: u64,
) -> Result<Record, GeneratorError> {
    let rng = ctx.rng();
    let base = *pick(rng, ADDRESS_NETWORKS);

    let (ip_address, network_range) = if base.starts_with("192.168") {
        (
            format!("192.168.{}.{}", rng.gen_range(0..=255), rng.gen_range(1..=254)),
            "192.168.0.0/16",
        )
    } else if base.starts_with("10.") {
        (
            format!(
                "10.{}.{}.{}",
                rng.gen_range(0..=255),
                rng.gen_range(0..=255),
                rng.gen_range(1..=254)
            ),
            "10.0.0.0/8",
        )
    } else {
        (network::ipv4(rng), base)
    };

    Ok(Record::new(vec![
        ip_address.into(),
        network::hostname(rng).into(),
        network_range.into(),
        pick_str(rng, COUNTRY_CODES).into(),
    ]))
}

pub(super) fn bounding_box(
    ctx: &mut SynthContext,
    _tracker: &mut UniquenessTracker,
    _index: u64,
) -> Result<Record, GeneratorError> {
    let rng = ctx.rng();
    let name = text::title_words(rng);
    let x1 = rng.gen_range(0.0..=800.0);
    let y1 = rng.gen_range(0.0..=600.0);
    let x2 = x1 + rng.gen_range(10.0..=200.0);
    let y2 = y1 + rng.gen_range(10.0..=150.0);

    Ok(Record::new(vec![
        name.into(),
        FieldValue::bbox(x1, y1, x2, y2),
        pick_str(rng, BOX_OBJECT_TYPES).into(),
    ]))
}

fn gaussian<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    match Normal::new(mean, std_dev) {
        Ok(normal) => normal.sample(rng),
        Err(_) => mean,
    }
}

/// Stable bucket in `0..1000` derived from the coordinate bits.
fn cluster_id(x: f64, y: f64) -> u64 {
    (x.to_bits() ^ y.to_bits().rotate_left(32)) % 1000
}

/// Prefix/suffix compounds plus random words, deduplicated.
fn vocabulary<R: Rng + ?Sized>(rng: &mut R) -> Vec<String> {
    let mut words = Vec::with_capacity(WORD_PREFIXES.len() * WORD_SUFFIXES.len() + RANDOM_WORDS);
    for prefix in WORD_PREFIXES {
        for suffix in WORD_SUFFIXES {
            words.push(format!("{prefix}{}{suffix}", text::word(rng)));
        }
    }
    for _ in 0..RANDOM_WORDS {
        words.push(text::word(rng));
    }

    words.sort();
    words.dedup();
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn parse_point(literal: &str) -> (f64, f64) {
        let inner = literal.trim_start_matches('(').trim_end_matches(')');
        let (x, y) = inner.split_once(',').unwrap();
        (x.parse().unwrap(), y.parse().unwrap())
    }

    #[test]
    fn test_multidimensional_points_stay_in_bounds() {
        let mut ctx = SynthContext::new(21, now());
        let mut tracker = UniquenessTracker::new();
        let mut clustered = 0;

        for i in 0..1000 {
            let record = multidimensional_point(&mut ctx, &mut tracker, i).unwrap();
            let (x, y) = parse_point(record.get(0).and_then(FieldValue::as_str).unwrap());
            assert!((0.0..=1000.0).contains(&x) && (0.0..=1000.0).contains(&y));

            let category = record.get(1).and_then(FieldValue::as_str).unwrap();
            if category.starts_with("cluster_") {
                assert!(CLUSTER_LABELS.contains(&category));
                clustered += 1;
            } else {
                assert!(category == "outlier" || category == "noise");
            }

            match record.get(2) {
                Some(FieldValue::Json(metadata)) => {
                    assert!(metadata["cluster_id"].as_u64().unwrap() < 1000);
                    let density = metadata["density"].as_f64().unwrap();
                    assert!((0.1..=1.0).contains(&density));
                }
                other => panic!("unexpected metadata {other:?}"),
            }
        }

        assert!((700..=900).contains(&clustered), "clustered {clustered}");
    }

    #[test]
    fn test_network_ranges_match_addresses() {
        let mut ctx = SynthContext::new(21, now());
        let mut tracker = UniquenessTracker::new();

        for i in 0..200 {
            let record = network_address(&mut ctx, &mut tracker, i).unwrap();
            let ip = record.get(0).and_then(FieldValue::as_str).unwrap();
            let range = record.get(2).and_then(FieldValue::as_str).unwrap();

            if ip.starts_with("192.168.") && range == "192.168.0.0/16" {
                continue;
            }
            if range == "10.0.0.0/8" {
                assert!(ip.starts_with("10."));
                continue;
            }
            assert!(ADDRESS_NETWORKS.contains(&range), "{range}");
        }
    }

    #[test]
    fn test_boxes_have_positive_extent() {
        let mut ctx = SynthContext::new(21, now());
        let record = bounding_box(&mut ctx, &mut UniquenessTracker::new(), 0).unwrap();
        let literal = record.get(1).and_then(FieldValue::as_str).unwrap();
        let corners: Vec<f64> = literal
            .trim_matches(|c| c == '(' || c == ')')
            .split(',')
            .map(|v| v.parse().unwrap())
            .collect();

        assert_eq!(corners.len(), 4);
        assert!(corners[2] - corners[0] >= 10.0);
        assert!(corners[3] - corners[1] >= 10.0);
    }

    #[test]
    fn test_vocabulary_is_sorted_and_distinct() {
        let words = vocabulary(&mut StdRng::seed_from_u64(4));
        assert!(words.windows(2).all(|w| w[0] < w[1]));
        assert!(words.iter().any(|w| w.starts_with("auto") && w.ends_with("tion")));
    }

    #[test]
    fn test_cluster_id_is_stable() {
        assert_eq!(cluster_id(12.5, 40.0), cluster_id(12.5, 40.0));
        assert!(cluster_id(999.9, 0.1) < 1000);
    }
}
