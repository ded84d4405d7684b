use lockgraph_yarn::{DependencyGraph, DependencyKind, LockFile, TracingLogger};
use std::fmt::Write;

pub fn render(lockfile: &LockFile) -> String {
    let graph = DependencyGraph::from_lockfile(lockfile, &TracingLogger);

    let mut out = String::new();
    for (from, to, kind) in graph.edges() {
        let suffix = match kind {
            DependencyKind::Normal => "",
            DependencyKind::Optional => " (optional)",
        };
        let _ = writeln!(out, "{} -> {}{suffix}", from.id(), to.id());
    }
    for missing in graph.unresolved() {
        let _ = writeln!(
            out,
            "{} -> {}@{} (unresolved)",
            missing.from, missing.dependency.name, missing.dependency.version_specifier
        );
    }
    let _ = write!(
        out,
        "{} entries, {} edges, {} unresolved",
        graph.node_count(),
        graph.edge_count(),
        graph.unresolved().len()
    );
    out
}
