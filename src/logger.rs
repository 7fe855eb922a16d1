//! Leveled logging collaborator.
//!
//! The dispatcher only decides message content; where lines end up is up to
//! the [`Logger`] implementation.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::Level;

pub trait Logger {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards to `tracing`, tagging every event with the logger name.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    name: String,
}

impl TracingLogger {
    pub fn new(name: impl Into<String>) -> Self {
        TracingLogger { name: name.into() }
    }

    /// Child logger named `<parent>.<name>`.
    pub fn named(&self, name: &str) -> Self {
        TracingLogger {
            name: format!("{}.{name}", self.name),
        }
    }
}

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!(logger = %self.name, "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(logger = %self.name, "{message}");
    }
}

/// Keeps every line in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryLogger {
    lines: Rc<RefCell<Vec<(Level, String)>>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.borrow().clone()
    }

    pub fn messages(&self, level: Level) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// True if any line at `level` contains `needle`.
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.lines
            .borrow()
            .iter()
            .any(|(l, m)| *l == level && m.contains(needle))
    }

    pub fn clear(&self) {
        self.lines.borrow_mut().clear();
    }
}

impl Logger for MemoryLogger {
    fn info(&self, message: &str) {
        self.lines.borrow_mut().push((Level::INFO, message.to_string()));
    }

    fn error(&self, message: &str) {
        self.lines.borrow_mut().push((Level::ERROR, message.to_string()));
    }
}

impl<L: Logger + ?Sized> Logger for Box<L> {
    fn info(&self, message: &str) {
        (**self).info(message)
    }

    fn error(&self, message: &str) {
        (**self).error(message)
    }
}
