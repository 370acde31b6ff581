//! Sensitive-data scanning of tables and views.

use std::collections::HashSet;

use regex::Regex;
use serde::{Deserialize, Serialize};
use veil_core::ScanConfig;

use crate::error::ScanError;
use crate::patterns;
use crate::source::{DataSource, TableRef};
use crate::value::{Row, string_form};

/// A column whose sampled values matched a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitiveColumn {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    pub table: String,
    pub column: String,
    /// The pattern entry that matched, as supplied by the caller.
    pub pattern: String,
    /// Source of the regex that matched; differs from `pattern` for
    /// `builtin:` entries.
    pub regex: String,
    /// Matching values in row order, at most `sample_limit` of them.
    pub samples: Vec<String>,
}

/// Samples a table/view and attributes columns to the first pattern that
/// matches any of their values.
pub struct SensitiveScanner<S: DataSource> {
    source: S,
    config: ScanConfig,
}

impl<S: DataSource> SensitiveScanner<S> {
    pub fn new(source: S, config: ScanConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Settings are read at scan time, so changes apply to the next call.
    pub fn config_mut(&mut self) -> &mut ScanConfig {
        &mut self.config
    }

    /// Scan `table` against `patterns`, in pattern order.
    ///
    /// Output lists the columns claimed by the first pattern (in catalog
    /// column order), then those claimed by the second, and so on; a column
    /// is reported at most once. Patterns that do not compile are skipped.
    pub fn scan(
        &self,
        table: &TableRef,
        patterns: &[String],
    ) -> Result<Vec<SensitiveColumn>, ScanError> {
        let columns = self.source.columns(table)?;
        let rows = self
            .source
            .fetch(table, &columns, 0, self.config.sample_rows)?;

        tracing::debug!(
            table = %table,
            columns = columns.len(),
            rows = rows.len(),
            "Sampled table for sensitive data"
        );

        let mut claimed: HashSet<&str> = HashSet::new();
        let mut found = Vec::new();

        for pattern in patterns {
            let Some(regex) = compile(pattern) else {
                continue;
            };

            for column in &columns {
                if claimed.contains(column.as_str()) {
                    continue;
                }
                if let Some(samples) = self.matching_samples(&regex, column, &rows) {
                    claimed.insert(column);
                    found.push(SensitiveColumn {
                        schema: table.schema.clone(),
                        table: table.name.clone(),
                        column: column.clone(),
                        pattern: pattern.clone(),
                        regex: regex.as_str().to_string(),
                        samples,
                    });
                }
            }
        }

        tracing::info!(
            table = %table,
            sensitive_columns = found.len(),
            "Sensitive data scan complete"
        );
        Ok(found)
    }

    /// Matching values of `column`, or `None` when no sampled value matches.
    fn matching_samples(&self, regex: &Regex, column: &str, rows: &[Row]) -> Option<Vec<String>> {
        let limit = self.config.sample_limit;
        let mut matched = false;
        let mut samples = Vec::new();

        for text in rows.iter().filter_map(|row| row.get(column).and_then(string_form)) {
            if !regex.is_match(&text) {
                continue;
            }
            matched = true;
            if samples.len() < limit {
                samples.push(text.into_owned());
            }
            if samples.len() >= limit {
                break;
            }
        }

        matched.then_some(samples)
    }
}

fn compile(pattern: &str) -> Option<Regex> {
    let Some(source) = patterns::resolve(pattern) else {
        tracing::warn!(pattern, "Unknown built-in pattern, skipping");
        return None;
    };
    match Regex::new(&source) {
        Ok(regex) => Some(regex),
        Err(e) => {
            tracing::warn!(pattern, error = %e, "Invalid scan pattern, skipping");
            None
        }
    }
}
