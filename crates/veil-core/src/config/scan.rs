//! Scan and masking tunables.

use serde::{Deserialize, Serialize};

/// Settings read by the masking orchestrator and the sensitive-data scanner
/// at call time.
///
/// There is no process-wide instance: each orchestrator/scanner owns one and
/// callers change it between calls through `config_mut()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Maximum number of matching sample values kept per sensitive column.
    #[serde(default = "default_sample_limit")]
    pub sample_limit: usize,

    /// When false, rules only apply to result columns whose name equals the
    /// rule's base column (aliases are not followed).
    #[serde(default = "default_true")]
    pub alias_resolution_enabled: bool,

    /// Number of rows fetched from a table/view when sampling it.
    #[serde(default = "default_sample_rows")]
    pub sample_rows: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            sample_limit: default_sample_limit(),
            alias_resolution_enabled: true,
            sample_rows: default_sample_rows(),
        }
    }
}

impl ScanConfig {
    /// Builder-style override of `sample_limit`.
    pub fn with_sample_limit(mut self, sample_limit: usize) -> Self {
        self.sample_limit = sample_limit;
        self
    }

    /// Builder-style override of `alias_resolution_enabled`.
    pub fn with_alias_resolution(mut self, enabled: bool) -> Self {
        self.alias_resolution_enabled = enabled;
        self
    }

    /// Builder-style override of `sample_rows`.
    pub fn with_sample_rows(mut self, sample_rows: usize) -> Self {
        self.sample_rows = sample_rows;
        self
    }
}

fn default_sample_limit() -> usize {
    5
}

fn default_sample_rows() -> usize {
    100
}

fn default_true() -> bool {
    true
}
