//! Dependency graph over the entries of a single lockfile.
//!
//! Each [`Entry`] becomes a node. A dependency edge is drawn when another
//! entry with the same name lists the dependency's specifier in its
//! `satisfied` set, which is how `yarn.lock` records which stanza answers
//! which range.

use crate::diagnostics::Logger;
use crate::lockfile::{Dependency, Entry, LockFile};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::collections::HashMap;

/// How a dependency edge was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DependencyKind {
    /// Listed under `dependencies`.
    Normal,
    /// Listed under `optionalDependencies`.
    Optional,
}

/// A dependency that no entry in the lockfile satisfies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnresolvedDependency {
    /// `name@version` of the entry declaring the dependency.
    pub from: String,
    /// The unmatched dependency.
    pub dependency: Dependency,
    /// Which section it was declared in.
    pub kind: DependencyKind,
}

/// Directed graph of lockfile entries.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    graph: DiGraph<Entry, DependencyKind>,
    unresolved: Vec<UnresolvedDependency>,
}

impl DependencyGraph {
    /// Builds the graph for one lockfile.
    ///
    /// Dependencies that cannot be matched are reported at verbose level and
    /// kept in [`DependencyGraph::unresolved`].
    #[must_use]
    pub fn from_lockfile(lockfile: &LockFile, logger: &dyn Logger) -> Self {
        let mut graph = DiGraph::new();
        // Keyed by (name, canonical specifier); the first entry claiming a range wins.
        let mut satisfying: HashMap<(&str, &str), NodeIndex> = HashMap::new();
        let mut nodes = Vec::with_capacity(lockfile.entries.len());

        for entry in &lockfile.entries {
            let idx = graph.add_node(entry.clone());
            nodes.push(idx);
            for specifier in &entry.satisfied {
                satisfying
                    .entry((entry.name.as_str(), specifier.as_str()))
                    .or_insert(idx);
            }
        }

        let mut unresolved = Vec::new();
        for (entry, &source) in lockfile.entries.iter().zip(&nodes) {
            let declared = entry
                .dependencies
                .iter()
                .map(|d| (d, DependencyKind::Normal))
                .chain(
                    entry
                        .optional_dependencies
                        .iter()
                        .map(|d| (d, DependencyKind::Optional)),
                );

            for (dependency, kind) in declared {
                let key = (dependency.name.as_str(), dependency.version_specifier.as_str());
                if let Some(&target) = satisfying.get(&key) {
                    graph.add_edge(source, target, kind);
                } else {
                    logger.verbose(&format!(
                        "No entry satisfies {}@{} required by {}",
                        dependency.name,
                        dependency.version_specifier,
                        entry.id()
                    ));
                    unresolved.push(UnresolvedDependency {
                        from: entry.id(),
                        dependency: dependency.clone(),
                        kind,
                    });
                }
            }
        }

        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            unresolved = unresolved.len(),
            "Built lockfile dependency graph"
        );

        Self { graph, unresolved }
    }

    /// The underlying petgraph graph.
    #[must_use]
    pub fn inner(&self) -> &DiGraph<Entry, DependencyKind> {
        &self.graph
    }

    /// Number of entries in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of resolved dependency edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Dependencies no entry satisfies.
    #[must_use]
    pub fn unresolved(&self) -> &[UnresolvedDependency] {
        &self.unresolved
    }

    /// Entries that no other entry depends on, in lockfile order.
    #[must_use]
    pub fn roots(&self) -> Vec<&Entry> {
        self.graph
            .node_indices()
            .filter(|&idx| {
                self.graph
                    .neighbors_directed(idx, Direction::Incoming)
                    .all(|from| from == idx)
            })
            .map(|idx| &self.graph[idx])
            .collect()
    }

    /// Resolved edges as `(from, to, kind)` in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&Entry, &Entry, DependencyKind)> + '_ {
        self.graph.edge_indices().filter_map(move |edge| {
            let (from, to) = self.graph.edge_endpoints(edge)?;
            Some((&self.graph[from], &self.graph[to], self.graph[edge]))
        })
    }

    /// Direct dependencies of the first entry with `name@version`.
    #[must_use]
    pub fn dependencies_of(&self, name: &str, version: &str) -> Vec<&Entry> {
        let Some(idx) = self
            .graph
            .node_indices()
            .find(|&idx| self.graph[idx].name == name && self.graph[idx].version == version)
        else {
            return Vec::new();
        };

        let mut deps: Vec<&Entry> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .map(|n| &self.graph[n])
            .collect();
        // petgraph yields neighbours newest first.
        deps.reverse();
        deps
    }
}
