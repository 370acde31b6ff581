//! Alias-transparent column matching.

use veil_core::ScanConfig;

use crate::alias::AliasGraphBuilder;
use crate::closure::{ClosureMap, close_over};
use crate::error::SqlError;

/// Decides whether a result column of a query denotes a given base column.
#[derive(Debug, Clone, Default)]
pub struct ColumnMatcher {
    closure: ClosureMap,
    follow_aliases: bool,
}

impl ColumnMatcher {
    /// Matcher over an already computed closure.
    pub fn new(closure: ClosureMap, follow_aliases: bool) -> Self {
        Self {
            closure,
            follow_aliases,
        }
    }

    /// Matcher that only accepts identical names.
    pub fn exact() -> Self {
        Self::new(ClosureMap::default(), false)
    }

    /// Matcher for the result columns of `sql`.
    ///
    /// When alias resolution is disabled the query is not parsed at all and
    /// the matcher compares names only.
    pub fn for_query(sql: &str, config: &ScanConfig) -> Result<Self, SqlError> {
        if !config.alias_resolution_enabled {
            return Ok(Self::exact());
        }
        let graph = AliasGraphBuilder::new().build(sql)?;
        Ok(Self::new(close_over(&graph), true))
    }

    /// True when `result_column` is `base_column` or traces back to it
    /// through any depth of aliasing.
    pub fn matches(&self, result_column: &str, base_column: &str) -> bool {
        result_column == base_column
            || (self.follow_aliases && self.closure.reaches(result_column, base_column))
    }

    pub fn closure(&self) -> &ClosureMap {
        &self.closure
    }

    pub fn follows_aliases(&self) -> bool {
        self.follow_aliases
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_alias() {
        let matcher =
            ColumnMatcher::for_query("SELECT c1 AS a1, c2 AS a2 FROM t", &ScanConfig::default())
                .unwrap();
        assert!(matcher.matches("a1", "c1"));
        assert!(!matcher.matches("a2", "c1"));
        assert!(matcher.matches("a2", "c2"));
    }

    #[test]
    fn test_self_alias_matches_by_name() {
        let matcher =
            ColumnMatcher::for_query("SELECT c1 AS c1 FROM t", &ScanConfig::default()).unwrap();
        assert!(matcher.closure().is_empty());
        assert!(matcher.matches("c1", "c1"));
    }

    #[test]
    fn test_through_subquery() {
        let matcher = ColumnMatcher::for_query(
            "SELECT sub.fn AS fn1 FROM (SELECT col AS fn FROM t) sub",
            &ScanConfig::default(),
        )
        .unwrap();
        assert!(matcher.matches("fn1", "col"));
        assert!(matcher.matches("fn1", "fn"));
        assert!(!matcher.matches("col", "fn1"));
    }

    #[test]
    fn test_resolution_disabled_is_exact_only() {
        let config = ScanConfig::default().with_alias_resolution(false);
        let matcher = ColumnMatcher::for_query(
            "SELECT sub.fn AS fn1 FROM (SELECT col AS fn FROM t) sub",
            &config,
        )
        .unwrap();
        assert!(!matcher.matches("fn1", "col"));
        assert!(matcher.matches("col", "col"));
    }

    #[test]
    fn test_resolution_disabled_skips_parsing() {
        let config = ScanConfig::default().with_alias_resolution(false);
        assert!(ColumnMatcher::for_query("not sql at all", &config).is_ok());
        assert!(ColumnMatcher::for_query("not sql at all", &ScanConfig::default()).is_err());
    }
}
