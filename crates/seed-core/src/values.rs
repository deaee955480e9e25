//! Value representations for synthesized records.
//!
//! A [`Record`] is an ordered tuple of [`FieldValue`]s matching the column
//! order of its [`TableSpec`](crate::TableSpec). Geometric, range and network
//! values travel as their PostgreSQL text literal; the column's
//! [`ParamType`](crate::ParamType) casts them on the server.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

/// A single synthesized column value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// SQL NULL
    Null,

    /// Boolean value
    Bool(bool),

    /// 32-bit signed integer
    Int32(i32),

    /// 64-bit signed integer
    Int64(i64),

    /// 64-bit floating point
    Float64(f64),

    /// Exact decimal (NUMERIC)
    Numeric(Decimal),

    /// Text value, also used for text-literal types (point, box, inet, ...)
    Text(String),

    /// Calendar date
    Date(NaiveDate),

    /// Timestamp without time zone
    Timestamp(NaiveDateTime),

    /// Semi-structured JSON document
    Json(serde_json::Value),

    /// Array of text values
    TextArray(Vec<String>),

    /// Array of decimal values
    NumericArray(Vec<Decimal>),
}

impl FieldValue {
    /// Build a text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Build a value from an optional one, mapping `None` to NULL.
    pub fn optional<T: Into<FieldValue>>(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }

    /// PostgreSQL `point` literal: `(x,y)`.
    pub fn point(x: f64, y: f64) -> Self {
        Self::Text(format!("({x},{y})"))
    }

    /// PostgreSQL `box` literal: `(x1,y1,x2,y2)`.
    pub fn bbox(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::Text(format!("({x1},{y1},{x2},{y2})"))
    }

    /// PostgreSQL inclusive `tsrange` literal: `[start, end]`.
    pub fn tsrange(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self::Text(format!(
            "[{}, {}]",
            start.format("%Y-%m-%dT%H:%M:%S%.f"),
            end.format("%Y-%m-%dT%H:%M:%S%.f")
        ))
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get this value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as an i64 (widening Int32).
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int32(i) => Some(i64::from(*i)),
            Self::Int64(i) => Some(*i),
            _ => None,
        }
    }

    /// Short name of the variant, used in shape errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int32(_) => "int32",
            Self::Int64(_) => "int64",
            Self::Float64(_) => "float64",
            Self::Numeric(_) => "numeric",
            Self::Text(_) => "text",
            Self::Date(_) => "date",
            Self::Timestamp(_) => "timestamp",
            Self::Json(_) => "json",
            Self::TextArray(_) => "text[]",
            Self::NumericArray(_) => "numeric[]",
        }
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        Self::Int32(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Float64(v)
    }
}

impl From<Decimal> for FieldValue {
    fn from(v: Decimal) -> Self {
        Self::Numeric(v)
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(v: NaiveDateTime) -> Self {
        Self::Timestamp(v)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(v: serde_json::Value) -> Self {
        Self::Json(v)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(v: Vec<String>) -> Self {
        Self::TextArray(v)
    }
}

impl From<Vec<Decimal>> for FieldValue {
    fn from(v: Vec<Decimal>) -> Self {
        Self::NumericArray(v)
    }
}

/// One synthesized row, values in the target table's column order.
///
/// Records are immutable once built; the loader only reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    values: Vec<FieldValue>,
}

impl Record {
    /// Create a record from values in column order.
    pub fn new(values: Vec<FieldValue>) -> Self {
        Self { values }
    }

    /// Values in column order.
    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    /// Value at the given column position.
    pub fn get(&self, position: usize) -> Option<&FieldValue> {
        self.values.get(position)
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<FieldValue> for Record {
    fn from_iter<I: IntoIterator<Item = FieldValue>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
