//! BRIN suite: large append-style tables with naturally ordered time columns.

use crate::generator::{GeneratorError, SynthContext};
use crate::generators::{coin, decimal, money, network, pick, pick_str, temporal, text};
use chrono::Duration;
use rand::Rng;
use seed_core::{ParamType, Record, TableSpec, UniquenessTracker};

/// Sensor type with its value range.
const SENSOR_TYPES: &[(&str, f64, f64)] = &[
    ("temperature", -20.0, 50.0),
    ("pressure", 950.0, 1050.0),
    ("humidity", 0.0, 100.0),
    ("voltage", 220.0, 240.0),
    ("current", 0.0, 100.0),
    ("rpm", 0.0, 3000.0),
];
const SENSOR_COUNT: i32 = 100;

const HTTP_METHODS: &[&str] = &["GET", "POST", "PUT", "DELETE", "PATCH"];
const STATUS_CODES: &[i32] = &[200, 201, 400, 401, 403, 404, 500];
const RESOURCE_PATHS: &[&str] = &[
    "/api/users",
    "/api/products",
    "/api/orders",
    "/api/auth",
    "/api/payments",
    "/api/reports",
    "/api/settings",
    "/api/health",
];

const TRANSACTION_TYPES: &[&str] = &["debit", "credit", "transfer", "payment", "withdrawal"];
const EXPENSE_TYPES: &[&str] = &["debit", "withdrawal"];
const TRANSACTION_CATEGORIES: &[&str] = &[
    "food",
    "transport",
    "entertainment",
    "utilities",
    "shopping",
    "healthcare",
];

const SERVER_COUNT: i32 = 50;

const LOCATION_TYPES: &[&str] = &[
    "weather_station",
    "sensor_node",
    "research_site",
    "monitoring_point",
];

/// Base coordinates cycled by row index (Moscow, Saint Petersburg, Omsk,
/// Yekaterinburg, Kazan).
const BASE_COORDINATES: [(f64, f64); 5] = [
    (55.7558, 37.6173),
    (59.9343, 30.3351),
    (54.9885, 73.3242),
    (56.8389, 60.6057),
    (55.7963, 49.1089),
];

pub(super) fn time_series_table() -> TableSpec {
    TableSpec::new("time_series_data")
        .column("sensor_id", ParamType::Int4)
        .column("measurement_time", ParamType::Timestamp)
        .column("value", ParamType::Numeric)
        .column("sensor_type", ParamType::Text)
        .column("quality_flag", ParamType::Bool)
}

pub(super) fn access_logs_table() -> TableSpec {
    TableSpec::new("access_logs")
        .column("user_id", ParamType::Int4)
        .column("access_time", ParamType::Timestamp)
        .column("resource_path", ParamType::Text)
        .column("http_method", ParamType::Text)
        .column("status_code", ParamType::Int4)
        .column("response_time_ms", ParamType::Int4)
        .column("ip_address", ParamType::Inet)
        .column("user_agent", ParamType::Text)
}

pub(super) fn transactions_table() -> TableSpec {
    TableSpec::new("financial_transactions")
        .column("account_id", ParamType::Int4)
        .column("transaction_date", ParamType::Date)
        .column("amount", ParamType::Numeric)
        .column("transaction_type", ParamType::Text)
        .column("description", ParamType::Text)
        .column("category", ParamType::Text)
        .column("merchant_name", ParamType::Text)
}

pub(super) fn metrics_table() -> TableSpec {
    TableSpec::new("system_metrics")
        .column("server_id", ParamType::Int4)
        .column("metric_time", ParamType::Timestamp)
        .column("cpu_usage", ParamType::Numeric)
        .column("memory_usage", ParamType::Numeric)
        .column("disk_usage", ParamType::Numeric)
        .column("network_rx_mbps", ParamType::Numeric)
        .column("network_tx_mbps", ParamType::Numeric)
        .column("active_connections", ParamType::Int4)
}

pub(super) fn geographic_table() -> TableSpec {
    TableSpec::new("geographic_data")
        .column("latitude", ParamType::Numeric)
        .column("longitude", ParamType::Numeric)
        .column("elevation", ParamType::Int4)
        .column("location_type", ParamType::Text)
        .column("recorded_date", ParamType::Date)
        .column("temperature", ParamType::Numeric)
        .column("humidity", ParamType::Numeric)
}

pub(super) fn time_series_point(
    ctx: &mut SynthContext,
    _tracker: &mut UniquenessTracker,
    _index: u64,
) -> Result<Record, GeneratorError> {
    let start = ctx.now() - Duration::days(365);
    let rng = ctx.rng();

    let sensor_id = rng.gen_range(1..=SENSOR_COUNT);
    let measured_at = temporal::offset_from(rng, start, 364, 23, 59, 59);
    let (sensor_type, min, max) = *pick(rng, SENSOR_TYPES);
    let value = decimal(rng.gen_range(min..=max), 4);

    Ok(Record::new(vec![
        sensor_id.into(),
        measured_at.into(),
        value.into(),
        sensor_type.into(),
        coin(rng).into(),
    ]))
}

pub(super) fn access_log(
    ctx: &mut SynthContext,
    _tracker: &mut UniquenessTracker,
    _index: u64,
) -> Result<Record, GeneratorError> {
    let start = ctx.now() - Duration::days(180);
    let rng = ctx.rng();

    let user_id = rng.gen_range(1..=10_000i32);
    let accessed_at = temporal::offset_from(rng, start, 179, 23, 59, 59);
    let resource = format!("{}/{}", pick(rng, RESOURCE_PATHS), network::uri_path(rng));

    Ok(Record::new(vec![
        user_id.into(),
        accessed_at.into(),
        resource.into(),
        pick_str(rng, HTTP_METHODS).into(),
        (*pick(rng, STATUS_CODES)).into(),
        rng.gen_range(10..=5000i32).into(),
        network::ipv4(rng).into(),
        network::user_agent(rng).into(),
    ]))
}

/// Expenses (`debit`, `withdrawal`) carry a negative amount.
pub(super) fn transaction(
    ctx: &mut SynthContext,
    _tracker: &mut UniquenessTracker,
    _index: u64,
) -> Result<Record, GeneratorError> {
    let start = ctx.now().date() - Duration::days(730);
    let rng = ctx.rng();

    let account_id = rng.gen_range(1..=5000i32);
    let date = start + Duration::days(rng.gen_range(0..=729));
    let transaction_type = pick_str(rng, TRANSACTION_TYPES);
    let mut amount = money(rng, 1.0, 5000.0);
    if EXPENSE_TYPES.contains(&transaction_type.as_str()) {
        amount.set_sign_negative(true);
    }

    Ok(Record::new(vec![
        account_id.into(),
        date.into(),
        amount.into(),
        transaction_type.into(),
        text::sentence(rng).into(),
        pick_str(rng, TRANSACTION_CATEGORIES).into(),
        text::company(rng).into(),
    ]))
}

pub(super) fn metric(
    ctx: &mut SynthContext,
    _tracker: &mut UniquenessTracker,
    _index: u64,
) -> Result<Record, GeneratorError> {
    let start = ctx.now() - Duration::days(30);
    let rng = ctx.rng();

    let server_id = rng.gen_range(1..=SERVER_COUNT);
    let measured_at = temporal::offset_from(rng, start, 0, 719, 59, 0);

    Ok(Record::new(vec![
        server_id.into(),
        measured_at.into(),
        money(rng, 0.0, 100.0).into(),
        money(rng, 0.0, 100.0).into(),
        money(rng, 0.0, 100.0).into(),
        money(rng, 0.0, 1000.0).into(),
        money(rng, 0.0, 500.0).into(),
        rng.gen_range(0..=10_000i32).into(),
    ]))
}

/// Rows cycle through the base coordinates so neighbouring rows cluster.
pub(super) fn geographic_point(
    ctx: &mut SynthContext,
    _tracker: &mut UniquenessTracker,
    index: u64,
) -> Result<Record, GeneratorError> {
    let start = ctx.now().date() - Duration::days(365);
    let rng = ctx.rng();

    let (base_lat, base_lon) = BASE_COORDINATES[(index % BASE_COORDINATES.len() as u64) as usize];
    let latitude = decimal(base_lat + rng.gen_range(-0.5..=0.5), 6);
    let longitude = decimal(base_lon + rng.gen_range(-0.5..=0.5), 6);

    Ok(Record::new(vec![
        latitude.into(),
        longitude.into(),
        rng.gen_range(-100..=3000i32).into(),
        pick_str(rng, LOCATION_TYPES).into(),
        (start + Duration::days(rng.gen_range(0..=364))).into(),
        money(rng, -30.0, 40.0).into(),
        money(rng, 0.0, 100.0).into(),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use rust_decimal::Decimal;
    use seed_core::FieldValue;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_sensor_values_follow_type_range() {
        let mut ctx = SynthContext::new(17, now());
        let mut tracker = UniquenessTracker::new();

        for i in 0..300 {
            let record = time_series_point(&mut ctx, &mut tracker, i).unwrap();
            let sensor_type = record.get(3).and_then(FieldValue::as_str).unwrap();
            let (_, min, max) = SENSOR_TYPES
                .iter()
                .find(|(name, _, _)| *name == sensor_type)
                .unwrap();

            match record.get(2) {
                Some(FieldValue::Numeric(value)) => {
                    let value: f64 = value.to_string().parse().unwrap();
                    assert!(value >= *min - 1e-4 && value <= *max + 1e-4);
                }
                other => panic!("unexpected value {other:?}"),
            }
        }
    }

    #[test]
    fn test_expense_amounts_are_negative() {
        let mut ctx = SynthContext::new(17, now());
        let mut tracker = UniquenessTracker::new();

        for i in 0..300 {
            let record = transaction(&mut ctx, &mut tracker, i).unwrap();
            let kind = record.get(3).and_then(FieldValue::as_str).unwrap();
            match record.get(2) {
                Some(FieldValue::Numeric(amount)) => {
                    if EXPENSE_TYPES.contains(&kind) {
                        assert!(*amount < Decimal::ZERO, "{kind} {amount}");
                    } else {
                        assert!(*amount > Decimal::ZERO, "{kind} {amount}");
                    }
                }
                other => panic!("unexpected amount {other:?}"),
            }
        }
    }

    #[test]
    fn test_metric_times_stay_in_window() {
        let mut ctx = SynthContext::new(17, now());
        let mut tracker = UniquenessTracker::new();
        let start = now() - Duration::days(30);

        for i in 0..200 {
            let record = metric(&mut ctx, &mut tracker, i).unwrap();
            match record.get(1) {
                Some(FieldValue::Timestamp(ts)) => {
                    assert!(*ts >= start && *ts < start + Duration::hours(720));
                }
                other => panic!("unexpected metric_time {other:?}"),
            }
        }
    }

    #[test]
    fn test_geographic_rows_cycle_base_coordinates() {
        let mut ctx = SynthContext::new(17, now());
        let mut tracker = UniquenessTracker::new();

        for i in 0..10u64 {
            let record = geographic_point(&mut ctx, &mut tracker, i).unwrap();
            let (base_lat, _) = BASE_COORDINATES[(i % 5) as usize];
            match record.get(0) {
                Some(FieldValue::Numeric(lat)) => {
                    let lat: f64 = lat.to_string().parse().unwrap();
                    assert!((lat - base_lat).abs() <= 0.5 + 1e-6);
                    assert!(lat.to_string().split('.').nth(1).map_or(0, str::len) <= 6);
                }
                other => panic!("unexpected latitude {other:?}"),
            }
        }
    }
}
