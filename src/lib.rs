//! Typed row-scanning query helpers for SQLite.
//!
//! # Intention
//!
//! - Provide a small generic API for running queries and decoding rows.
//! - Encapsulate statement cleanup and error composition in one place.
//!
//! # Architectural Boundaries
//!
//! - Only query execution and row decoding belong here.
//! - Connection management, query building, and transactions stay with the
//!   caller.

pub mod error;
pub mod query;
pub mod row;
pub mod value;

pub use error::{Error, Result};
pub use query::{query_many, query_one, query_optional};
pub use row::{scan_record, scan_single};
pub use value::{Args, Value};
