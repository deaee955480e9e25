//! Duplicate-tolerant fallback against a live PostgreSQL.
//!
//! Run with a database URL, for example:
//!
//! ```bash
//! INDEX_SEED_TEST_URL="host=localhost user=postgres password=postgres dbname=indexes_study" \
//!   cargo test --test postgresql_fallback -- --ignored
//! ```

use seed_core::{FieldValue, LoadOutcome, ParamType, Record, TableSpec};
use seed_loader::{
    search_path_statement, BatchLoader, LoadError, PostgresSink, RowSink, SinkError,
};

async fn connect() -> PostgresSink {
    let url = std::env::var("INDEX_SEED_TEST_URL").expect("INDEX_SEED_TEST_URL must be set");
    let config: tokio_postgres::Config = url.parse().expect("Invalid INDEX_SEED_TEST_URL");
    PostgresSink::connect_with_config(&config)
        .await
        .expect("Failed to connect to PostgreSQL")
}

/// Fresh schema with a `user_profiles` table, selected on `sink`.
async fn reset_schema(sink: &mut PostgresSink, schema: &str) {
    sink.execute(&format!(
        "DROP SCHEMA IF EXISTS {schema} CASCADE; \
         CREATE SCHEMA {schema}; \
         CREATE TABLE {schema}.user_profiles (\
             id SERIAL PRIMARY KEY, \
             username VARCHAR(50) UNIQUE NOT NULL, \
             age INTEGER CHECK (age >= 0), \
             profile_data JSONB, \
             tags TEXT[], \
             ip_address INET)"
    ))
    .await
    .unwrap();
    sink.execute(&search_path_statement(schema).unwrap())
        .await
        .unwrap();
}

/// Count through a separate connection so only committed rows are seen.
async fn row_count(schema: &str) -> i64 {
    let (client, connection) = tokio_postgres::connect(
        &std::env::var("INDEX_SEED_TEST_URL").unwrap(),
        tokio_postgres::NoTls,
    )
    .await
    .unwrap();
    tokio::spawn(connection);
    client
        .query_one(&format!("SELECT count(*) FROM {schema}.user_profiles"), &[])
        .await
        .unwrap()
        .get(0)
}

fn profiles() -> TableSpec {
    TableSpec::new("user_profiles")
        .column("username", ParamType::Text)
        .column("age", ParamType::Int4)
        .column("profile_data", ParamType::Jsonb)
        .column("tags", ParamType::TextArray)
        .column("ip_address", ParamType::Inet)
        .unique("username")
}

fn profile(name: &str, age: i32) -> Record {
    Record::new(vec![
        FieldValue::text(name),
        FieldValue::Int32(age),
        FieldValue::Json(serde_json::json!({ "name": name })),
        FieldValue::TextArray(vec!["a".to_string(), "b".to_string()]),
        FieldValue::text("10.0.0.1"),
    ])
}

#[tokio::test]
#[ignore = "requires INDEX_SEED_TEST_URL"]
async fn test_duplicate_username_is_skipped() {
    let mut sink = connect().await;
    reset_schema(&mut sink, "index_seed_test_duplicates").await;
    let loader = BatchLoader::new(1000);

    loader
        .load(&mut sink, &profiles(), &[profile("user_500", 20)])
        .await
        .unwrap();

    let records: Vec<Record> = (0..1000).map(|i| profile(&format!("user_{i}"), 30)).collect();
    let report = loader.load(&mut sink, &profiles(), &records).await.unwrap();

    assert_eq!(
        report.outcomes,
        vec![LoadOutcome::PartiallyCommitted {
            committed: 999,
            skipped: 1
        }]
    );
    assert_eq!(row_count("index_seed_test_duplicates").await, 1000);
}

#[tokio::test]
#[ignore = "requires INDEX_SEED_TEST_URL"]
async fn test_check_violation_aborts_batch() {
    let mut sink = connect().await;
    reset_schema(&mut sink, "index_seed_test_abort").await;

    let mut records: Vec<Record> = (0..20).map(|i| profile(&format!("user_{i}"), 30)).collect();
    records[15] = profile("user_15", -1);

    let err = BatchLoader::new(10)
        .load(&mut sink, &profiles(), &records)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        LoadError::BatchAborted {
            batch: 1,
            source: SinkError::Database(_),
            ..
        }
    ));
    assert_eq!(row_count("index_seed_test_abort").await, 10);
}

#[tokio::test]
#[ignore = "requires INDEX_SEED_TEST_URL"]
async fn test_nulls_bind_with_column_types() {
    let mut sink = connect().await;
    reset_schema(&mut sink, "index_seed_test_nulls").await;

    let record = Record::new(vec![
        FieldValue::text("nobody"),
        FieldValue::Null,
        FieldValue::Null,
        FieldValue::Null,
        FieldValue::Null,
    ]);
    let report = BatchLoader::new(10)
        .load(&mut sink, &profiles(), &[record])
        .await
        .unwrap();

    assert_eq!(report.rows_committed, 1);
}
