//! Query executors: run SQL and decode result rows with caller-supplied logic.
//!
//! Cancellation and timeouts are the connection's business (busy timeout,
//! interrupt handles); the executors forward the handle untouched and block
//! until the driver responds.

use rusqlite::{Connection, Params, Row, Statement};

use crate::error::{Error, Result};

/// Retrieve a single row and decode it with `decode`.
///
/// The decode function is invoked exactly once, with the one row the query
/// produced. A query that matches no rows fails with the driver's no-rows
/// condition reported through the decode error channel; use
/// [`query_optional`] when zero rows is an expected outcome.
///
/// # Examples
///
/// ```
/// use rowscan::{query_one, scan_single};
/// use rusqlite::{params, Connection};
///
/// # fn main() -> anyhow::Result<()> {
/// let conn = Connection::open_in_memory()?;
/// conn.execute_batch(
///     "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
///      INSERT INTO users (name) VALUES ('ana');",
/// )?;
///
/// let name = query_one(
///     &conn,
///     "SELECT name FROM users WHERE id = ?1",
///     params![1],
///     scan_single::<String>,
/// )?;
/// assert_eq!(name, "ana");
/// # Ok(())
/// # }
/// ```
pub fn query_one<T, P, F>(conn: &Connection, sql: &str, params: P, decode: F) -> Result<T>
where
    P: Params,
    F: FnOnce(&Row<'_>) -> Result<T>,
{
    tracing::trace!(sql, "executing single-row query");
    let mut stmt = conn.prepare(sql).map_err(Error::Query)?;
    let mut rows = stmt.query(params).map_err(Error::Query)?;
    match rows.next().map_err(Error::Query)? {
        Some(row) => decode(row),
        None => Err(Error::decode(rusqlite::Error::QueryReturnedNoRows)),
    }
}

/// Retrieve zero or one rows, decoding the row if present.
pub fn query_optional<T, P, F>(conn: &Connection, sql: &str, params: P, decode: F) -> Result<Option<T>>
where
    P: Params,
    F: FnOnce(&Row<'_>) -> Result<T>,
{
    tracing::trace!(sql, "executing single-row query");
    let mut stmt = conn.prepare(sql).map_err(Error::Query)?;
    let mut rows = stmt.query(params).map_err(Error::Query)?;
    match rows.next().map_err(Error::Query)? {
        Some(row) => decode(row).map(Some),
        None => Ok(None),
    }
}

/// Retrieve every row the query produces, decoding each with `decode`.
///
/// Rows are decoded in arrival order. If any row fails to decode, iteration
/// stops and the error is returned with no partial results. The prepared
/// statement is finalized on every exit path; a finalize failure is surfaced
/// only when nothing else went wrong.
///
/// # Examples
///
/// ```
/// use rowscan::{query_many, scan_single};
/// use rusqlite::{params, Connection};
///
/// # fn main() -> anyhow::Result<()> {
/// let conn = Connection::open_in_memory()?;
/// conn.execute_batch(
///     "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT NOT NULL, age INTEGER);
///      INSERT INTO users (name, age) VALUES ('ana', 34), ('bob', 34), ('eve', 51);",
/// )?;
///
/// let names = query_many(
///     &conn,
///     "SELECT name FROM users WHERE age = ?1",
///     params![34],
///     scan_single::<String>,
/// )?;
/// assert_eq!(names, vec!["ana", "bob"]);
/// # Ok(())
/// # }
/// ```
pub fn query_many<T, P, F>(conn: &Connection, sql: &str, params: P, mut decode: F) -> Result<Vec<T>>
where
    P: Params,
    F: FnMut(&Row<'_>) -> Result<T>,
{
    tracing::trace!(sql, "executing query");
    let mut stmt = conn.prepare(sql).map_err(Error::Query)?;
    let outcome = drain_rows(&mut stmt, params, &mut decode);
    settle(outcome, stmt.finalize())
}

fn drain_rows<T, P, F>(stmt: &mut Statement<'_>, params: P, decode: &mut F) -> Result<Vec<T>>
where
    P: Params,
    F: FnMut(&Row<'_>) -> Result<T>,
{
    let mut rows = stmt.query(params).map_err(Error::Query)?;
    let mut values = Vec::with_capacity(20);
    while let Some(row) = rows.next().map_err(Error::Query)? {
        values.push(decode(row)?);
    }
    tracing::trace!(rows = values.len(), "query complete");
    Ok(values)
}

/// Combine the iteration outcome with the statement release result.
/// The primary error wins; a release failure surfaces only on a clean run.
fn settle<T>(outcome: Result<T>, release: rusqlite::Result<()>) -> Result<T> {
    match (outcome, release) {
        (Ok(value), Ok(())) => Ok(value),
        (Err(primary), _) => Err(primary),
        (Ok(_), Err(err)) => Err(Error::Finalize(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release_failure() -> rusqlite::Result<()> {
        Err(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            Some("database is locked".to_owned()),
        ))
    }

    #[test]
    fn finalize_failure_surfaces_after_clean_run() {
        let err = settle(Ok(vec![1, 2, 3]), release_failure()).unwrap_err();
        assert!(matches!(err, Error::Finalize(_)));
    }

    #[test]
    fn primary_error_wins_over_finalize_failure() {
        let primary: Result<Vec<i64>> = Err(Error::decode(anyhow::anyhow!("bad row")));
        let err = settle(primary, release_failure()).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn clean_run_passes_through() {
        let values = settle(Ok(vec![1, 2, 3]), Ok(())).unwrap();
        assert_eq!(values, vec![1, 2, 3]);
    }
}
