//! Rename-graph extraction from SELECT projection lists.
//!
//! Every projection item of the shape `<column reference> AS <alias>` adds a
//! one-hop edge `alias -> column` (qualification stripped). FROM sub-queries
//! are visited first and their edges merged into the same flat graph, so an
//! outer edge may point at a name that is itself an inner alias. Resolution
//! across levels is left to [`close_over`](crate::closure::close_over).
//!
//! Names are kept exactly as written, quotes included: `"Name"` and `Name`
//! are different nodes.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use sqlparser::ast::{Expr, Query, SelectItem, TableFactor, TableWithJoins};

use crate::error::SqlError;
use crate::parser::SqlAnalyzer;

/// One-hop `alias -> source` edges extracted from a query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RenameGraph {
    edges: BTreeMap<String, BTreeSet<String>>,
}

impl RenameGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the edge `alias -> source`.
    ///
    /// Self-aliasing adds nothing. Returns whether a new edge was inserted.
    pub fn add_edge(&mut self, alias: impl Into<String>, source: impl Into<String>) -> bool {
        let alias = alias.into();
        let source = source.into();
        if alias == source {
            return false;
        }
        self.edges.entry(alias).or_default().insert(source)
    }

    /// Direct sources of `name`, if it has any outgoing edge.
    pub fn sources(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.edges.get(name)
    }

    /// Whether the edge `alias -> source` exists.
    pub fn has_edge(&self, alias: &str, source: &str) -> bool {
        self.edges
            .get(alias)
            .is_some_and(|sources| sources.contains(source))
    }

    /// Number of names with at least one outgoing edge.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterate over names with outgoing edges and their direct sources.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.edges.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Merge all edges of `other` into this graph.
    pub fn extend(&mut self, other: RenameGraph) {
        for (alias, sources) in other.edges {
            self.edges.entry(alias).or_default().extend(sources);
        }
    }

    pub(crate) fn from_edges(edges: BTreeMap<String, BTreeSet<String>>) -> Self {
        Self { edges }
    }
}

impl<A, S> FromIterator<(A, S)> for RenameGraph
where
    A: Into<String>,
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (A, S)>>(iter: I) -> Self {
        let mut graph = RenameGraph::new();
        for (alias, source) in iter {
            graph.add_edge(alias, source);
        }
        graph
    }
}

/// Builds a [`RenameGraph`] from SQL text.
#[derive(Debug, Clone, Default)]
pub struct AliasGraphBuilder {
    analyzer: SqlAnalyzer,
}

impl AliasGraphBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            analyzer: SqlAnalyzer::new(),
        }
    }

    /// Parse `sql` and extract its rename graph.
    ///
    /// Fails with [`SqlError::ParseError`] when the text is not a single
    /// SELECT-shaped statement.
    pub fn build(&self, sql: &str) -> Result<RenameGraph, SqlError> {
        let query = self.analyzer.parse_query(sql)?;
        let mut graph = RenameGraph::new();
        self.visit_query(&query, &mut graph);

        tracing::debug!(
            aliases = graph.len(),
            edges = graph.edge_count(),
            "Built rename graph"
        );
        Ok(graph)
    }

    fn visit_query(&self, query: &Query, graph: &mut RenameGraph) {
        let Some(select) = self.analyzer.select_of(query) else {
            tracing::debug!("Query body has no single projection list, no aliases extracted");
            return;
        };

        // Inner levels first; their aliases are what outer items refer to.
        for table_with_joins in &select.from {
            self.visit_table_with_joins(table_with_joins, graph);
        }

        for item in &select.projection {
            if let SelectItem::ExprWithAlias { expr, alias, .. } = item {
                if let Some(column) = column_name(expr) {
                    graph.add_edge(alias.to_string(), column);
                }
            }
        }
    }

    fn visit_table_with_joins(&self, table_with_joins: &TableWithJoins, graph: &mut RenameGraph) {
        self.visit_table_factor(&table_with_joins.relation, graph);
        for join in &table_with_joins.joins {
            self.visit_table_factor(&join.relation, graph);
        }
    }

    fn visit_table_factor(&self, table_factor: &TableFactor, graph: &mut RenameGraph) {
        match table_factor {
            TableFactor::Derived { subquery, .. } => self.visit_query(subquery, graph),
            TableFactor::NestedJoin {
                table_with_joins, ..
            } => self.visit_table_with_joins(table_with_joins, graph),
            _ => {}
        }
    }
}

/// Unqualified name of a plain column reference, verbatim with quotes.
fn column_name(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Identifier(ident) => Some(ident.to_string()),
        Expr::CompoundIdentifier(idents) => idents.last().map(ToString::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn build(sql: &str) -> RenameGraph {
        AliasGraphBuilder::new().build(sql).unwrap()
    }

    #[test]
    fn test_single_level_aliases() {
        let graph = build("SELECT c1 AS a1, c2 AS a2 FROM t");
        assert_eq!(graph, RenameGraph::from_iter([("a1", "c1"), ("a2", "c2")]));
    }

    #[test]
    fn test_self_alias_adds_no_edge() {
        let graph = build("SELECT c1 AS c1, c2 FROM t");
        assert!(graph.is_empty());
    }

    #[test]
    fn test_qualified_column_is_stripped() {
        let graph = build("SELECT u.email AS contact, public.u.name AS n FROM users u");
        assert!(graph.has_edge("contact", "email"));
        assert!(graph.has_edge("n", "name"));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_qualified_self_alias_adds_no_edge() {
        let graph = build("SELECT u.email AS email FROM users u");
        assert!(graph.is_empty());
    }

    #[test]
    fn test_subquery_edges_are_merged() {
        let graph = build("SELECT sub.fn AS fn1 FROM (SELECT col AS fn FROM t) sub");
        assert_eq!(graph, RenameGraph::from_iter([("fn1", "fn"), ("fn", "col")]));
    }

    #[test]
    fn test_deeply_nested_subqueries() {
        let graph = build(
            "SELECT x.c AS d FROM (SELECT y.b AS c FROM (SELECT a AS b FROM t) y) x",
        );
        assert!(graph.has_edge("d", "c"));
        assert!(graph.has_edge("c", "b"));
        assert!(graph.has_edge("b", "a"));
    }

    #[test]
    fn test_joined_subquery_is_visited() {
        let graph = build(
            "SELECT o.id AS order_id, s.nm AS customer \
             FROM orders o JOIN (SELECT name AS nm, id FROM customers) s ON o.customer_id = s.id",
        );
        assert!(graph.has_edge("order_id", "id"));
        assert!(graph.has_edge("customer", "nm"));
        assert!(graph.has_edge("nm", "name"));
    }

    #[test]
    fn test_non_simple_items_are_ignored() {
        let graph = build(
            "SELECT *, UPPER(name) AS upper_name, price * 2 AS doubled, 'x' AS lit, id AS ident FROM t",
        );
        assert_eq!(graph, RenameGraph::from_iter([("ident", "id")]));
    }

    #[test]
    fn test_quoting_is_preserved() {
        let graph = build(r#"SELECT "Email" AS "Contact", `zip` AS code FROM t"#);
        assert!(graph.has_edge(r#""Contact""#, r#""Email""#));
        assert!(graph.has_edge("code", "`zip`"));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let graph = build("SELECT Name AS name FROM t");
        assert!(graph.has_edge("name", "Name"));
    }

    #[test]
    fn test_union_yields_empty_graph() {
        let graph = build("SELECT a AS x FROM t1 UNION SELECT b AS x FROM t2");
        assert!(graph.is_empty());
    }

    #[test]
    fn test_parse_error() {
        let result = AliasGraphBuilder::new().build("SELECT a AS FROM");
        assert!(matches!(result, Err(SqlError::ParseError(_))));

        let result = AliasGraphBuilder::new().build("UPDATE t SET a = 1");
        assert!(matches!(result, Err(SqlError::ParseError(_))));
    }

    #[test]
    fn test_serializes_as_map() {
        let graph = RenameGraph::from_iter([("a1", "c1")]);
        let json = serde_json::to_value(&graph).unwrap();
        assert_eq!(json, serde_json::json!({ "a1": ["c1"] }));
    }
}
