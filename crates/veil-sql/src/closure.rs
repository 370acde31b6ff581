//! Transitive closure of a rename graph.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::alias::RenameGraph;

/// Every name reachable from each alias by following rename edges.
///
/// Intermediate aliases are included, not only terminal columns. Names with
/// no outgoing edge have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClosureMap {
    reachable: BTreeMap<String, BTreeSet<String>>,
}

impl ClosureMap {
    /// All names reachable from `alias`, if it has any.
    pub fn get(&self, alias: &str) -> Option<&BTreeSet<String>> {
        self.reachable.get(alias)
    }

    /// Whether `name` is reachable from `alias`.
    pub fn reaches(&self, alias: &str, name: &str) -> bool {
        self.reachable
            .get(alias)
            .is_some_and(|names| names.contains(name))
    }

    pub fn len(&self) -> usize {
        self.reachable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reachable.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.reachable.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<&RenameGraph> for ClosureMap {
    fn from(graph: &RenameGraph) -> Self {
        close_over(graph)
    }
}

/// A closure read back as a graph whose edges are the reachability sets.
impl From<ClosureMap> for RenameGraph {
    fn from(closure: ClosureMap) -> Self {
        RenameGraph::from_edges(closure.reachable)
    }
}

/// Compute the reachability set of every name with an outgoing edge.
///
/// Each traversal tracks visited nodes, so accidental cycles (`a AS b`,
/// `b AS a`) terminate. A name appears in its own closure only when a cycle
/// leads back to it.
pub fn close_over(graph: &RenameGraph) -> ClosureMap {
    let mut reachable = BTreeMap::new();

    for (alias, sources) in graph.iter() {
        let mut visited = BTreeSet::new();
        let mut stack: Vec<&str> = sources.iter().map(String::as_str).collect();

        while let Some(name) = stack.pop() {
            if !visited.insert(name.to_string()) {
                continue;
            }
            if let Some(next) = graph.sources(name) {
                stack.extend(next.iter().map(String::as_str));
            }
        }

        reachable.insert(alias.to_string(), visited);
    }

    ClosureMap { reachable }
}
