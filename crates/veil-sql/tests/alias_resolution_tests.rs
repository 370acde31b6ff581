//! End-to-end alias resolution over SQL text.

use proptest::prelude::*;
use veil_core::ScanConfig;
use veil_sql::{AliasGraphBuilder, ClosureMap, ColumnMatcher, RenameGraph, close_over};

fn closure_of(sql: &str) -> ClosureMap {
    let graph = AliasGraphBuilder::new().build(sql).unwrap();
    close_over(&graph)
}

#[test]
fn test_single_level_closure_holds_only_direct_sources() {
    let closure = closure_of("SELECT c1 AS a1, c2 AS a2 FROM t");
    for (alias, reachable) in closure.iter() {
        assert_eq!(reachable.len(), 1, "{alias} should only reach its own column");
    }

    let matcher = ColumnMatcher::new(closure, true);
    assert!(matcher.matches("a1", "c1"));
    assert!(!matcher.matches("a2", "c1"));
}

#[test]
fn test_multi_level_alias() {
    let closure = closure_of("SELECT sub.fn AS fn1 FROM (SELECT col AS fn FROM t) sub");
    let reachable = closure.get("fn1").unwrap();
    assert!(reachable.contains("fn"));
    assert!(reachable.contains("col"));

    let matcher = ColumnMatcher::new(closure, true);
    assert!(matcher.matches("fn1", "col"));
}

#[test]
fn test_three_levels_of_nesting() {
    let sql = "SELECT l2.b AS c FROM (SELECT l1.a AS b FROM (SELECT base AS a FROM t) l1) l2";
    let matcher = ColumnMatcher::for_query(sql, &ScanConfig::default()).unwrap();
    assert!(matcher.matches("c", "base"));
    assert!(matcher.matches("b", "base"));
    assert!(!matcher.matches("base", "c"));
}

#[test]
fn test_mixed_aliased_and_plain_columns() {
    let sql = "SELECT s.email AS contact, s.id FROM (SELECT mail AS email, id FROM users) s";
    let matcher = ColumnMatcher::for_query(sql, &ScanConfig::default()).unwrap();
    assert!(matcher.matches("contact", "mail"));
    assert!(matcher.matches("id", "id"));
    assert!(!matcher.matches("id", "mail"));
}

fn name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c", "d", "e", "f", "g"]).prop_map(str::to_string)
}

proptest! {
    #[test]
    fn closure_is_idempotent(edges in prop::collection::vec((name(), name()), 0..20)) {
        let graph: RenameGraph = edges.into_iter().collect();
        let once = close_over(&graph);
        let twice = close_over(&RenameGraph::from(once.clone()));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn closure_contains_direct_sources(edges in prop::collection::vec((name(), name()), 0..20)) {
        let graph: RenameGraph = edges.into_iter().collect();
        let closure = close_over(&graph);
        prop_assert_eq!(closure.len(), graph.len());
        for (alias, sources) in graph.iter() {
            let reachable = closure.get(alias).unwrap();
            prop_assert!(reachable.is_superset(sources));
        }
    }

    #[test]
    fn closure_is_monotonic(
        edges in prop::collection::vec((name(), name()), 0..12),
        extra in (name(), name()),
    ) {
        let base: RenameGraph = edges.iter().cloned().collect();
        let mut extended = base.clone();
        extended.add_edge(extra.0, extra.1);

        let before = close_over(&base);
        let after = close_over(&extended);
        for (alias, reachable) in before.iter() {
            prop_assert!(after.get(alias).unwrap().is_superset(reachable));
        }
    }
}
