//! Golden-file tests over complete lockfiles in both dialects.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{CollectingLogger, fixture};
use lockgraph_yarn::{
    DependencyGraph, DependencyKind, FailureLog, YarnLockDetector, YarnLockVersion,
};

#[test]
fn classic_lockfile_entries() {
    let detector = YarnLockDetector::default();
    let recorder = FailureLog::new();
    let logger = CollectingLogger::default();

    let lockfile = detector
        .detect(&fixture("classic.lock"), &recorder, &logger)
        .unwrap();

    assert_eq!(lockfile.version, YarnLockVersion::V1);
    assert!(recorder.is_empty());
    assert!(logger.warnings().is_empty(), "{:?}", logger.warnings());

    let names: Vec<&str> = lockfile.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "@babel/code-frame",
            "@babel/highlight",
            "chalk",
            "fsevents",
            "js-tokens",
            "nyc",
            "watcher",
        ]
    );

    let code_frame = lockfile.find_entry("@babel/code-frame").unwrap();
    assert_eq!(code_frame.version, "7.22.5");
    assert_eq!(
        code_frame.satisfied.iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["npm:^7.0.0", "npm:^7.22.5"]
    );
    assert!(code_frame.integrity.as_deref().unwrap().starts_with("sha512-"));
    assert_eq!(code_frame.dependencies.len(), 1);
    assert_eq!(code_frame.dependencies[0].name, "@babel/highlight");
    assert_eq!(code_frame.dependencies[0].version_specifier, "npm:^7.22.5");

    let chalk = lockfile.find_entry("chalk").unwrap();
    let chalk_deps: Vec<&str> = chalk.dependencies.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(
        chalk_deps,
        vec!["ansi-styles", "escape-string-regexp", "supports-color"]
    );

    let nyc = lockfile.find_entry("nyc").unwrap();
    assert_eq!(nyc.satisfied.iter().collect::<Vec<_>>(), vec!["npm:10.0.0"]);
    assert!(nyc.resolved.as_deref().unwrap().contains("nyc-10.0.0.tgz"));

    let watcher = lockfile.find_entry("watcher").unwrap();
    assert!(watcher.dependencies.is_empty());
    assert_eq!(watcher.optional_dependencies.len(), 1);
    assert_eq!(
        watcher.optional_dependencies[0].version_specifier,
        "npm:~2.3.2"
    );
}

#[test]
fn classic_lockfile_graph() {
    let detector = YarnLockDetector::default();
    let logger = CollectingLogger::default();
    let lockfile = detector
        .detect(&fixture("classic.lock"), &FailureLog::new(), &logger)
        .unwrap();

    let graph = DependencyGraph::from_lockfile(&lockfile, &logger);

    assert_eq!(graph.node_count(), 7);
    assert_eq!(graph.edge_count(), 4);
    assert_eq!(graph.unresolved().len(), 3);

    let optional: Vec<(String, String)> = graph
        .edges()
        .filter(|(_, _, kind)| *kind == DependencyKind::Optional)
        .map(|(from, to, _)| (from.id(), to.id()))
        .collect();
    assert_eq!(
        optional,
        vec![("watcher@1.2.0".to_string(), "fsevents@2.3.3".to_string())]
    );

    let roots: Vec<&str> = graph.roots().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(roots, vec!["@babel/code-frame", "nyc", "watcher"]);
}

#[test]
fn berry_lockfile_entries() {
    let detector = YarnLockDetector::default();
    let recorder = FailureLog::new();
    let logger = CollectingLogger::default();

    let lockfile = detector
        .detect(&fixture("berry.lock"), &recorder, &logger)
        .unwrap();

    assert_eq!(lockfile.version, YarnLockVersion::V2);
    assert_eq!(recorder.failures(), vec!["scheduler"]);
    assert_eq!(logger.warnings().len(), 1);

    let names: Vec<&str> = lockfile.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["js-tokens", "loose-envify", "react"]);

    let js_tokens = lockfile.find_entry("js-tokens").unwrap();
    assert!(js_tokens.satisfied.contains("npm:^3.0.0 || ^4.0.0"));
    assert!(js_tokens.resolved.is_none());
    assert!(js_tokens.integrity.as_deref().unwrap().starts_with("8a95213a"));

    let loose_envify = lockfile.find_entry("loose-envify").unwrap();
    assert_eq!(loose_envify.dependencies.len(), 1);
    assert_eq!(
        loose_envify.dependencies[0].version_specifier,
        "npm:^3.0.0 || ^4.0.0"
    );

    let graph = DependencyGraph::from_lockfile(&lockfile, &logger);
    assert_eq!(graph.edge_count(), 2);
    assert!(graph.unresolved().is_empty());
}

#[test]
fn malformed_lockfile_recovers() {
    let detector = YarnLockDetector::default();
    let recorder = FailureLog::new();
    let logger = CollectingLogger::default();

    let lockfile = detector
        .detect(&fixture("malformed.lock"), &recorder, &logger)
        .unwrap();

    let names: Vec<&str> = lockfile.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["good", "after"]);

    let good = lockfile.find_entry("good").unwrap();
    assert_eq!(good.version, "1.0.0");
    assert!(good.resolved.is_some());

    let after = lockfile.find_entry("after").unwrap();
    assert_eq!(after.dependencies.len(), 1);
    assert_eq!(after.dependencies[0].name, "good");

    assert_eq!(recorder.failures(), vec!["no-version"]);
    // Four skipped lines, one stanza without a version, and two for the
    // untitled stanza (no version to borrow, then no name).
    assert_eq!(logger.warnings().len(), 7, "{:?}", logger.warnings());
}
