//! Test-only helpers: a recording sink and metadata shortcuts.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use tracing::Level;

use crate::core::matcher::DEFAULT_NAMESPACE;
use crate::core::types::MethodMeta;
use crate::io::sink::Sink;

/// Sink that keeps every line in memory, in emission order.
#[derive(Debug)]
pub struct RecordingSink {
    min_level: Level,
    lines: Mutex<Vec<(Level, String)>>,
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::with_min_level(Level::TRACE)
    }
}

impl RecordingSink {
    pub fn with_min_level(min_level: Level) -> Self {
        Self {
            min_level,
            lines: Mutex::new(Vec::new()),
        }
    }

    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.lines().into_iter().map(|(_, message)| message).collect()
    }

    pub fn levels(&self) -> Vec<Level> {
        self.lines().into_iter().map(|(level, _)| level).collect()
    }
}

impl Sink for RecordingSink {
    fn enabled(&self, level: Level) -> bool {
        level <= self.min_level
    }

    fn log(&self, level: Level, message: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((level, message.to_string()));
    }
}

/// Metadata for `{DEFAULT_NAMESPACE}::{type_name}::{method}`.
pub fn core_method(type_name: &str, method: &str) -> MethodMeta {
    MethodMeta::new(format!("{DEFAULT_NAMESPACE}::{type_name}"), method)
}

/// Argument that counts how often it was rendered.
#[derive(Debug, Default)]
pub struct CountingArg {
    renders: AtomicUsize,
}

impl CountingArg {
    pub fn renders(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }
}

impl fmt::Display for CountingArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.renders.fetch_add(1, Ordering::SeqCst);
        f.write_str("counted")
    }
}
