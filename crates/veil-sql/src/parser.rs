//! SQL parsing front-end.

use crate::error::SqlError;
use sqlparser::ast::{Query, Select, SetExpr, Statement};
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;

/// Parses SQL text and locates the SELECT a query is built on.
///
/// Uses the generic dialect so that both `"double"` and `` `backtick` ``
/// quoted identifiers are accepted.
#[derive(Debug)]
pub struct SqlAnalyzer {
    dialect: GenericDialect,
}

impl Clone for SqlAnalyzer {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl Default for SqlAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlAnalyzer {
    /// Create a new SQL analyzer.
    pub fn new() -> Self {
        Self {
            dialect: GenericDialect {},
        }
    }

    /// Parse a SQL string into statements.
    pub fn parse(&self, sql: &str) -> Result<Vec<Statement>, SqlError> {
        Parser::parse_sql(&self.dialect, sql).map_err(|e| SqlError::ParseError(e.to_string()))
    }

    /// Parse a SQL string that must hold exactly one query statement.
    pub fn parse_query(&self, sql: &str) -> Result<Box<Query>, SqlError> {
        let mut statements = self.parse(sql)?;
        if statements.len() != 1 {
            return Err(SqlError::ParseError(format!(
                "expected a single SELECT statement, found {}",
                statements.len()
            )));
        }

        match statements.remove(0) {
            Statement::Query(query) => Ok(query),
            other => Err(SqlError::ParseError(format!(
                "not a SELECT statement: {}",
                other
            ))),
        }
    }

    /// The SELECT underlying a query, looking through parenthesised bodies.
    ///
    /// Returns `None` for set operations (`UNION` etc.), `VALUES` and other
    /// bodies that have no single projection list.
    pub fn select_of<'q>(&self, query: &'q Query) -> Option<&'q Select> {
        let mut body = query.body.as_ref();
        loop {
            match body {
                SetExpr::Select(select) => return Some(select),
                SetExpr::Query(inner) => body = inner.body.as_ref(),
                _ => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_select() {
        let analyzer = SqlAnalyzer::new();
        let query = analyzer.parse_query("SELECT id, name FROM users").unwrap();
        let select = analyzer.select_of(&query).unwrap();
        assert_eq!(select.projection.len(), 2);
    }

    #[test]
    fn test_parenthesised_query_body() {
        let analyzer = SqlAnalyzer::new();
        let query = analyzer.parse_query("(SELECT id FROM users)").unwrap();
        assert!(analyzer.select_of(&query).is_some());
    }

    #[test]
    fn test_union_has_no_single_select() {
        let analyzer = SqlAnalyzer::new();
        let query = analyzer
            .parse_query("SELECT a FROM t1 UNION SELECT b FROM t2")
            .unwrap();
        assert!(analyzer.select_of(&query).is_none());
    }

    #[test]
    fn test_rejects_non_select() {
        let analyzer = SqlAnalyzer::new();
        let result = analyzer.parse_query("DELETE FROM users WHERE id = 1");
        assert!(matches!(result, Err(SqlError::ParseError(_))));
    }

    #[test]
    fn test_rejects_multiple_statements() {
        let analyzer = SqlAnalyzer::new();
        let result = analyzer.parse_query("SELECT 1; SELECT 2");
        assert!(matches!(result, Err(SqlError::ParseError(_))));
    }

    #[test]
    fn test_rejects_garbage() {
        let analyzer = SqlAnalyzer::new();
        assert!(analyzer.parse_query("SELEC name FROM").is_err());
        assert!(analyzer.parse_query("").is_err());
    }

    #[test]
    fn test_backtick_identifiers() {
        let analyzer = SqlAnalyzer::new();
        assert!(analyzer.parse_query("SELECT `name` AS `n` FROM `users`").is_ok());
    }
}
