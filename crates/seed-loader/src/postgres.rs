//! PostgreSQL sink built on tokio-postgres.

use crate::error::SinkError;
use crate::sink::RowSink;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use seed_core::{FieldValue, ParamType, Record, TableSpec};
use tokio_postgres::types::ToSql;
use tokio_postgres::{Client, Config, NoTls};
use tracing::{debug, error};

/// Connection settings for the target database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: String,
}

impl Default for ConnectionParams {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            dbname: "indexes_study".to_string(),
            user: "postgres".to_string(),
            password: String::new(),
        }
    }
}

impl ConnectionParams {
    /// tokio-postgres configuration for these settings.
    pub fn to_config(&self) -> Config {
        let mut config = Config::new();
        config
            .host(&self.host)
            .port(self.port)
            .dbname(&self.dbname)
            .user(&self.user);
        if !self.password.is_empty() {
            config.password(&self.password);
        }
        config
    }

    /// Connection description safe for logs.
    pub fn describe(&self) -> String {
        let password = if self.password.is_empty() { "" } else { ":****" };
        format!(
            "postgresql://{}{}@{}:{}/{}",
            self.user, password, self.host, self.port, self.dbname
        )
    }
}

/// [`RowSink`] writing to PostgreSQL over a single connection.
pub struct PostgresSink {
    client: Client,
}

impl PostgresSink {
    /// Connect with the given settings and verify the connection.
    pub async fn connect(params: &ConnectionParams) -> Result<Self, SinkError> {
        Self::connect_with_config(&params.to_config()).await
    }

    /// Connect with a prepared tokio-postgres configuration.
    pub async fn connect_with_config(config: &Config) -> Result<Self, SinkError> {
        let (client, connection) = config
            .connect(NoTls)
            .await
            .map_err(|e| SinkError::Connection(e.to_string()))?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!("PostgreSQL connection error: {}", e);
            }
        });

        client
            .simple_query("SELECT 1")
            .await
            .map_err(|e| SinkError::Connection(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl RowSink for PostgresSink {
    async fn execute(&mut self, sql: &str) -> Result<(), SinkError> {
        debug!("SQL: {}", sql);
        self.client.batch_execute(sql).await?;
        Ok(())
    }

    async fn begin(&mut self) -> Result<(), SinkError> {
        self.client.batch_execute("BEGIN").await?;
        Ok(())
    }

    async fn insert(&mut self, table: &TableSpec, records: &[Record]) -> Result<u64, SinkError> {
        if records.is_empty() {
            return Ok(0);
        }

        let sql = insert_statement(table, records.len());

        let mut params: Vec<Box<dyn ToSql + Sync + Send>> =
            Vec::with_capacity(records.len() * table.columns.len());
        for record in records {
            for (column, value) in table.columns.iter().zip(record.values()) {
                params.push(bind_value(column.param_type, value));
            }
        }

        let param_refs: Vec<&(dyn ToSql + Sync)> = params
            .iter()
            .map(|p| p.as_ref() as &(dyn ToSql + Sync))
            .collect();

        let inserted = self.client.execute(&sql, &param_refs).await?;
        Ok(inserted)
    }

    async fn commit(&mut self) -> Result<(), SinkError> {
        self.client.batch_execute("COMMIT").await?;
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), SinkError> {
        self.client.batch_execute("ROLLBACK").await?;
        Ok(())
    }
}

/// Multi-row INSERT for `rows` records of `table`.
///
/// Every placeholder carries the column's cast, e.g. `$3::text::inet`.
pub fn insert_statement(table: &TableSpec, rows: usize) -> String {
    let columns = table
        .columns
        .iter()
        .map(|c| format!("\"{}\"", c.name))
        .collect::<Vec<_>>()
        .join(", ");

    let mut placeholders: Vec<String> = Vec::with_capacity(rows);
    let mut param_idx = 1;

    for _ in 0..rows {
        let mut row_placeholders: Vec<String> = Vec::with_capacity(table.columns.len());
        for column in &table.columns {
            row_placeholders.push(format!("${param_idx}::{}", column.param_type.sql_cast()));
            param_idx += 1;
        }
        placeholders.push(format!("({})", row_placeholders.join(", ")));
    }

    format!(
        "INSERT INTO \"{}\" ({}) VALUES {}",
        table.name,
        columns,
        placeholders.join(", ")
    )
}

/// Box a value for binding; NULL is typed after the column's parameter.
fn bind_value(param_type: ParamType, value: &FieldValue) -> Box<dyn ToSql + Sync + Send> {
    match value {
        FieldValue::Null => typed_null(param_type),
        FieldValue::Bool(b) => Box::new(*b),
        FieldValue::Int32(i) => Box::new(*i),
        FieldValue::Int64(i) => Box::new(*i),
        FieldValue::Float64(f) => Box::new(*f),
        FieldValue::Numeric(d) => Box::new(*d),
        FieldValue::Text(s) => Box::new(s.clone()),
        FieldValue::Date(d) => Box::new(*d),
        FieldValue::Timestamp(ts) => Box::new(*ts),
        FieldValue::Json(v) => Box::new(v.clone()),
        FieldValue::TextArray(items) => Box::new(items.clone()),
        FieldValue::NumericArray(items) => Box::new(items.clone()),
    }
}

fn typed_null(param_type: ParamType) -> Box<dyn ToSql + Sync + Send> {
    match param_type {
        ParamType::Bool => Box::new(None::<bool>),
        ParamType::Int4 => Box::new(None::<i32>),
        ParamType::Int8 => Box::new(None::<i64>),
        ParamType::Float8 => Box::new(None::<f64>),
        ParamType::Numeric => Box::new(None::<Decimal>),
        ParamType::Date => Box::new(None::<NaiveDate>),
        ParamType::Timestamp => Box::new(None::<NaiveDateTime>),
        ParamType::Jsonb => Box::new(None::<serde_json::Value>),
        ParamType::TextArray => Box::new(None::<Vec<String>>),
        ParamType::NumericArray => Box::new(None::<Vec<Decimal>>),
        ParamType::Text
        | ParamType::Point
        | ParamType::Box
        | ParamType::TsRange
        | ParamType::Inet
        | ParamType::Cidr
        | ParamType::MacAddr => Box::new(None::<String>),
    }
}
