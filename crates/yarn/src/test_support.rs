use crate::diagnostics::Logger;
use std::cell::RefCell;

/// Logger that keeps messages per level for assertions.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    warnings: RefCell<Vec<String>>,
    infos: RefCell<Vec<String>>,
    verbose: RefCell<Vec<String>>,
}

impl RecordingLogger {
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.borrow().clone()
    }

    pub fn info_messages(&self) -> Vec<String> {
        self.infos.borrow().clone()
    }

    pub fn verbose_messages(&self) -> Vec<String> {
        self.verbose.borrow().clone()
    }
}

impl Logger for RecordingLogger {
    fn warning(&self, message: &str) {
        self.warnings.borrow_mut().push(message.to_string());
    }

    fn info(&self, message: &str) {
        self.infos.borrow_mut().push(message.to_string());
    }

    fn verbose(&self, message: &str) {
        self.verbose.borrow_mut().push(message.to_string());
    }
}
