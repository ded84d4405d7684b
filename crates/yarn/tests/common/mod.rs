//! Shared helpers for lockfile integration tests.

#![allow(dead_code)]

use lockgraph_yarn::Logger;
use std::path::PathBuf;
use std::sync::Mutex;

/// Logger collecting warnings so tests can count them.
#[derive(Debug, Default)]
pub struct CollectingLogger {
    warnings: Mutex<Vec<String>>,
}

impl CollectingLogger {
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }
}

impl Logger for CollectingLogger {
    fn warning(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }

    fn info(&self, _message: &str) {}

    fn verbose(&self, _message: &str) {}
}

/// Path of a file under `tests/fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}
