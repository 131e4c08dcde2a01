//! Error types for query execution and row decoding.

/// Errors produced while executing queries and decoding rows.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The query could not be prepared, bound, or executed.
    #[error("failed to execute query")]
    Query(#[source] rusqlite::Error),

    /// A row could not be decoded into the destination type.
    #[error("failed to decode row")]
    Decode(#[source] anyhow::Error),

    /// The statement could not be finalized after row iteration.
    #[error("failed to finalize statement")]
    Finalize(#[source] rusqlite::Error),
}

impl Error {
    /// Wrap an arbitrary failure raised inside a decode function.
    pub fn decode(err: impl Into<anyhow::Error>) -> Self {
        Error::Decode(err.into())
    }
}

/// Driver errors that escape a decode function are decode failures.
/// The executors tag their own driver calls explicitly.
impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Decode(err.into())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
