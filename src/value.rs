//! Dynamically typed SQLite values and positional parameter bindings.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::{params_from_iter, Params, ToSql};
use serde::{Deserialize, Serialize};

/// Core value types for SQLite parameters and results.
///
/// `Boolean` binds as an integer; reads only ever surface the five SQLite
/// storage classes, so a stored boolean comes back as `Integer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
    Boolean(bool),
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let out = match self {
            Value::Null => ToSqlOutput::Owned(rusqlite::types::Value::Null),
            Value::Integer(i) => ToSqlOutput::Owned(rusqlite::types::Value::Integer(*i)),
            Value::Real(f) => ToSqlOutput::Owned(rusqlite::types::Value::Real(*f)),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            Value::Blob(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b)),
            Value::Boolean(b) => ToSqlOutput::Owned(rusqlite::types::Value::Integer(*b as i64)),
        };
        Ok(out)
    }
}

impl FromSql for Value {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Null => Ok(Value::Null),
            ValueRef::Integer(i) => Ok(Value::Integer(i)),
            ValueRef::Real(f) => Ok(Value::Real(f)),
            ValueRef::Text(t) => std::str::from_utf8(t)
                .map(|s| Value::Text(s.to_owned()))
                .map_err(|err| FromSqlError::Other(Box::new(err))),
            ValueRef::Blob(b) => Ok(Value::Blob(b.to_vec())),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Blob(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// Positional parameter bindings for a query.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Args {
    values: Vec<Value>,
}

impl Args {
    /// Create an empty binding list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional value.
    pub fn with(mut self, value: impl Into<Value>) -> Self {
        self.values.push(value.into());
        self
    }

    /// The bindings in the form the driver accepts.
    pub fn as_params(&self) -> impl Params + '_ {
        params_from_iter(self.values.iter())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<T: Into<Value>> FromIterator<T> for Args {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn conversions_cover_common_types() {
        assert_eq!(Value::from(7i64), Value::Integer(7));
        assert_eq!(Value::from(7i32), Value::Integer(7));
        assert_eq!(Value::from(1.5f64), Value::Real(1.5));
        assert_eq!(Value::from(true), Value::Boolean(true));
        assert_eq!(Value::from("ana"), Value::Text("ana".to_owned()));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("bob")), Value::Text("bob".to_owned()));
    }

    #[test]
    fn values_round_trip_through_the_driver() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (a INTEGER, b REAL, c TEXT, d BLOB, e INTEGER, f TEXT)")
            .unwrap();

        let args = Args::new()
            .with(42i64)
            .with(1.25f64)
            .with("ana")
            .with(vec![1u8, 2, 3])
            .with(true)
            .with(None::<String>);
        assert_eq!(args.len(), 6);
        conn.execute(
            "INSERT INTO t (a, b, c, d, e, f) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            args.as_params(),
        )
        .unwrap();

        let row: (Value, Value, Value, Value, Value, Value) = conn
            .query_row("SELECT a, b, c, d, e, f FROM t", [], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                ))
            })
            .unwrap();

        assert_eq!(row.0, Value::Integer(42));
        assert_eq!(row.1, Value::Real(1.25));
        assert_eq!(row.2, Value::Text("ana".to_owned()));
        assert_eq!(row.3, Value::Blob(vec![1, 2, 3]));
        // Booleans are stored as integers.
        assert_eq!(row.4, Value::Integer(1));
        assert_eq!(row.5, Value::Null);
    }
}
