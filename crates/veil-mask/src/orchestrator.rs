//! Alias-aware masking of query results.

use std::collections::HashMap;

use veil_core::ScanConfig;
use veil_sql::ColumnMatcher;

use crate::error::MaskError;
use crate::rule::{ObfuscationRule, RuleSet};
use crate::value::Row;

/// Applies obfuscation rules, declared against base column names, to the
/// result rows of a query.
#[derive(Debug, Clone, Default)]
pub struct MaskingOrchestrator {
    config: ScanConfig,
}

impl MaskingOrchestrator {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Settings are read at masking time, so changes apply to the next call.
    pub fn config_mut(&mut self) -> &mut ScanConfig {
        &mut self.config
    }

    /// Rewrite `rows` in place and return how many cells a rule was applied to.
    ///
    /// Each result column gets the first rule (in declaration order) whose
    /// base column it denotes, directly or through the aliases of `sql`.
    /// Rules whose base column appears in no result column are ignored.
    pub fn mask_rows(&self, rows: &mut [Row], sql: &str, rules: &RuleSet) -> Result<usize, MaskError> {
        if rules.is_empty() || rows.is_empty() {
            return Ok(0);
        }

        let matcher = ColumnMatcher::for_query(sql, &self.config)?;
        let mut plan: HashMap<String, Option<&ObfuscationRule>> = HashMap::new();
        let mut masked = 0;

        for row in rows.iter_mut() {
            for (column, value) in row.iter_mut() {
                let rule = *plan
                    .entry(column.clone())
                    .or_insert_with(|| rule_for(&matcher, column, rules));
                if let Some(rule) = rule {
                    *value = rule.apply(value);
                    masked += 1;
                }
            }
        }

        tracing::debug!(
            masked_columns = plan.values().filter(|r| r.is_some()).count(),
            masked_cells = masked,
            "Masked query results"
        );
        Ok(masked)
    }
}

fn rule_for<'r>(matcher: &ColumnMatcher, column: &str, rules: &'r RuleSet) -> Option<&'r ObfuscationRule> {
    let (base, rule) = rules
        .iter()
        .find(|(base, _)| matcher.matches(column, base))?;
    tracing::debug!(column, base = base.as_str(), "Result column matched masking rule");
    Some(rule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(values: serde_json::Value) -> Vec<Row> {
        serde_json::from_value(values).unwrap()
    }

    fn truncate(end: i64) -> ObfuscationRule {
        ObfuscationRule::Truncate { start: 0, end }
    }

    #[test]
    fn test_masks_aliased_column() {
        let mut rs = rows(json!([{ "n": "Alice", "id": 1 }, { "n": "Bob", "id": 2 }]));
        let mut rules = RuleSet::new();
        rules.insert("name".to_string(), truncate(1));

        let masked = MaskingOrchestrator::default()
            .mask_rows(&mut rs, "SELECT name AS n, id FROM users", &rules)
            .unwrap();

        assert_eq!(masked, 2);
        assert_eq!(rs, rows(json!([{ "n": "A", "id": 1 }, { "n": "B", "id": 2 }])));
    }

    #[test]
    fn test_first_declared_rule_wins() {
        let mut rs = rows(json!([{ "x": "abcdef" }]));
        let mut rules = RuleSet::new();
        rules.insert("a".to_string(), truncate(1));
        rules.insert("b".to_string(), truncate(3));

        // x reaches both a and b.
        MaskingOrchestrator::default()
            .mask_rows(&mut rs, "SELECT s.y AS x FROM (SELECT a AS y, b AS y FROM t) s", &rules)
            .unwrap();
        assert_eq!(rs, rows(json!([{ "x": "a" }])));
    }

    #[test]
    fn test_empty_rules_skip_parsing() {
        let mut rs = rows(json!([{ "a": 1 }]));
        let masked = MaskingOrchestrator::default()
            .mask_rows(&mut rs, "not sql", &RuleSet::new())
            .unwrap();
        assert_eq!(masked, 0);
    }

    #[test]
    fn test_parse_error_surfaces() {
        let mut rs = rows(json!([{ "a": 1 }]));
        let mut rules = RuleSet::new();
        rules.insert("a".to_string(), truncate(1));
        let result = MaskingOrchestrator::default().mask_rows(&mut rs, "SELEC a FRM t", &rules);
        assert!(matches!(result, Err(MaskError::Sql(_))));
    }
}
