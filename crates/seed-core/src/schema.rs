//! Target table definitions.
//!
//! A [`TableSpec`] describes the insert shape of one target table: its name,
//! the ordered columns with their bind-parameter types, and the columns that
//! carry a uniqueness constraint. DDL is owned by the database side; these
//! specs only describe what the loader sends.

use crate::values::{FieldValue, Record};

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema operations.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SchemaError {
    /// Record arity does not match the table
    #[error("Table '{table}' expects {expected} values, record has {actual}")]
    ArityMismatch {
        table: String,
        expected: usize,
        actual: usize,
    },

    /// Value kind not accepted by the column's parameter type
    #[error("Column '{column}' of table '{table}' cannot bind a {kind} value as {param}")]
    TypeMismatch {
        table: String,
        column: String,
        kind: &'static str,
        param: ParamType,
    },

    /// Column not found in table
    #[error("Column '{column}' not found in table '{table}'")]
    ColumnNotFound { table: String, column: String },

    /// Identifier contains characters that cannot be used unquoted
    #[error("Invalid identifier: '{0}'")]
    InvalidIdentifier(String),
}

// ============================================================================
// Parameter Types
// ============================================================================

/// Bind-parameter type of a column.
///
/// The loader emits `$n::<cast>` placeholders, so the parameter type is fixed
/// by the statement rather than inferred from the column. PostgreSQL's
/// assignment casts then convert into the actual column type. Types without a
/// native client encoding (geometry, ranges, network addresses) are bound as
/// text and cast on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    Bool,
    Int4,
    Int8,
    Float8,
    Numeric,
    Text,
    Date,
    Timestamp,
    Jsonb,
    TextArray,
    NumericArray,
    Point,
    Box,
    TsRange,
    Inet,
    Cidr,
    MacAddr,
}

impl ParamType {
    /// SQL cast appended to the placeholder.
    pub fn sql_cast(&self) -> &'static str {
        match self {
            ParamType::Bool => "bool",
            ParamType::Int4 => "int4",
            ParamType::Int8 => "int8",
            ParamType::Float8 => "float8",
            ParamType::Numeric => "numeric",
            ParamType::Text => "text",
            ParamType::Date => "date",
            ParamType::Timestamp => "timestamp",
            ParamType::Jsonb => "jsonb",
            ParamType::TextArray => "text[]",
            ParamType::NumericArray => "numeric[]",
            ParamType::Point => "text::point",
            ParamType::Box => "text::box",
            ParamType::TsRange => "text::tsrange",
            ParamType::Inet => "text::inet",
            ParamType::Cidr => "text::cidr",
            ParamType::MacAddr => "text::macaddr",
        }
    }

    /// Whether the parameter is bound as a text literal.
    pub fn is_text_literal(&self) -> bool {
        matches!(
            self,
            ParamType::Text
                | ParamType::Point
                | ParamType::Box
                | ParamType::TsRange
                | ParamType::Inet
                | ParamType::Cidr
                | ParamType::MacAddr
        )
    }

    /// Whether a value of this kind can be bound to the parameter.
    ///
    /// NULL binds to every type.
    pub fn accepts(&self, value: &FieldValue) -> bool {
        match value {
            FieldValue::Null => true,
            FieldValue::Bool(_) => *self == ParamType::Bool,
            FieldValue::Int32(_) => *self == ParamType::Int4,
            FieldValue::Int64(_) => *self == ParamType::Int8,
            FieldValue::Float64(_) => *self == ParamType::Float8,
            FieldValue::Numeric(_) => *self == ParamType::Numeric,
            FieldValue::Text(_) => self.is_text_literal(),
            FieldValue::Date(_) => *self == ParamType::Date,
            FieldValue::Timestamp(_) => *self == ParamType::Timestamp,
            FieldValue::Json(_) => *self == ParamType::Jsonb,
            FieldValue::TextArray(_) => *self == ParamType::TextArray,
            FieldValue::NumericArray(_) => *self == ParamType::NumericArray,
        }
    }
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.sql_cast())
    }
}

// ============================================================================
// Table Definitions
// ============================================================================

/// One column of a target table.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    /// Column name
    pub name: String,

    /// Bind-parameter type
    pub param_type: ParamType,
}

/// Insert shape of a target table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSpec {
    /// Table name (resolved against the session's search_path)
    pub name: String,

    /// Columns in insert order
    pub columns: Vec<ColumnSpec>,

    /// Columns under a uniqueness constraint
    pub unique_columns: Vec<String>,
}

impl TableSpec {
    /// Create an empty table spec.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            unique_columns: Vec::new(),
        }
    }

    /// Append a column.
    pub fn column(mut self, name: impl Into<String>, param_type: ParamType) -> Self {
        self.columns.push(ColumnSpec {
            name: name.into(),
            param_type,
        });
        self
    }

    /// Mark an existing column as unique.
    pub fn unique(mut self, name: impl Into<String>) -> Self {
        self.unique_columns.push(name.into());
        self
    }

    /// Position of a column in insert order.
    pub fn position(&self, column: &str) -> Result<usize, SchemaError> {
        self.columns
            .iter()
            .position(|c| c.name == column)
            .ok_or_else(|| SchemaError::ColumnNotFound {
                table: self.name.clone(),
                column: column.to_string(),
            })
    }

    /// Positions of the unique columns.
    pub fn unique_positions(&self) -> Result<Vec<usize>, SchemaError> {
        self.unique_columns
            .iter()
            .map(|c| self.position(c))
            .collect()
    }

    /// Verify that a record can be bound against this table.
    pub fn check_record(&self, record: &Record) -> Result<(), SchemaError> {
        if record.len() != self.columns.len() {
            return Err(SchemaError::ArityMismatch {
                table: self.name.clone(),
                expected: self.columns.len(),
                actual: record.len(),
            });
        }

        for (column, value) in self.columns.iter().zip(record.values()) {
            if !column.param_type.accepts(value) {
                return Err(SchemaError::TypeMismatch {
                    table: self.name.clone(),
                    column: column.name.clone(),
                    kind: value.kind(),
                    param: column.param_type,
                });
            }
        }

        Ok(())
    }
}

/// Validate a schema or table name for unquoted use in SQL.
///
/// Accepts ASCII letters, digits and `_`, not starting with a digit.
pub fn validate_identifier(name: &str) -> Result<&str, SchemaError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(name)
    } else {
        Err(SchemaError::InvalidIdentifier(name.to_string()))
    }
}
