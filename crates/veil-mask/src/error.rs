//! Error types for masking and scanning.

use thiserror::Error;
use veil_core::ObfuscationMethod;
use veil_sql::SqlError;

/// Errors that can occur while masking result rows.
#[derive(Debug, Error)]
pub enum MaskError {
    /// The query could not be analyzed for aliases.
    #[error(transparent)]
    Sql(#[from] SqlError),
}

/// Errors that can occur while scanning a table/view.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The data source could not list or read the table/view.
    #[error(transparent)]
    Fetch(#[from] anyhow::Error),
}

/// Reasons a rule definition cannot be compiled as written.
///
/// Masking never surfaces these: an unusable definition degrades to the
/// identity rule. They are exposed for configuration checks.
#[derive(Debug, Error)]
pub enum RuleError {
    /// The `replace` pattern is not a valid regex.
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A parameter the method cannot work without is absent.
    #[error("{method} rule is missing `{parameter}`")]
    MissingParameter {
        method: ObfuscationMethod,
        parameter: &'static str,
    },
}
