//! Decode helpers for common row shapes.
//!
//! A decode function receives a [`rusqlite::Row`] positioned at the current
//! result row and extracts column values by position. These helpers cover the
//! shapes that would otherwise be written out at every call site.

use std::collections::HashMap;

use rusqlite::types::FromSql;
use rusqlite::{Row, Statement};

use crate::error::Result;
use crate::value::Value;

/// Decode the single column of a one-column projection.
///
/// # Examples
///
/// ```
/// use rowscan::{query_one, scan_single};
/// use rusqlite::Connection;
///
/// # fn main() -> anyhow::Result<()> {
/// let conn = Connection::open_in_memory()?;
/// let answer = query_one(&conn, "SELECT 6 * 7", [], scan_single::<i64>)?;
/// assert_eq!(answer, 42);
/// # Ok(())
/// # }
/// ```
pub fn scan_single<T: FromSql>(row: &Row<'_>) -> Result<T> {
    Ok(row.get(0)?)
}

/// Decode every column of the current row into a name-keyed map.
///
/// Useful when the projection is not known at compile time, such as when
/// relaying rows produced by caller-supplied SQL.
pub fn scan_record(row: &Row<'_>) -> Result<HashMap<String, Value>> {
    let stmt: &Statement<'_> = row.as_ref();
    let mut record = HashMap::with_capacity(stmt.column_count());
    for idx in 0..stmt.column_count() {
        let name = stmt.column_name(idx)?.to_owned();
        record.insert(name, row.get(idx)?);
    }
    Ok(record)
}
