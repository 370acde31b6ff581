//! Error types for the SQL analysis crate.

use thiserror::Error;

/// Errors that can occur while analyzing a query.
#[derive(Debug, Error)]
pub enum SqlError {
    /// The SQL could not be decomposed into a SELECT projection list.
    #[error("failed to parse SQL: {0}")]
    ParseError(String),
}
