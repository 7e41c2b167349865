// SPDX-License-Identifier: MIT OR Apache-2.0
//! The logging collaborator.
//!
//! Operations that log take a `&L where L: Logger`; nothing in this crate
//! reaches for a process-wide logger on its own. The binary decides at its
//! composition root which implementation to hand out:
//!
//! - [`TracingLogger`] forwards to the `tracing` macros, so output goes to
//!   whatever subscriber the application installed.
//! - [`MemoryLogger`] keeps every record in memory, which is what tests use
//!   to assert on what was logged.

use crate::Mutex;
use std::fmt;

/// Severity of a log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
    Debug,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Debug => "DEBUG",
        };
        f.write_str(name)
    }
}

/// A thread-safe sink for leveled messages.
pub trait Logger: Send + Sync {
    /// Emits `message` at `level`. May be called from any thread.
    fn log(&self, level: LogLevel, message: &str);
}

impl<L: Logger + ?Sized> Logger for &L {
    fn log(&self, level: LogLevel, message: &str) {
        (**self).log(level, message)
    }
}

impl<L: Logger + ?Sized> Logger for std::sync::Arc<L> {
    fn log(&self, level: LogLevel, message: &str) {
        (**self).log(level, message)
    }
}

/// Forwards every message to `tracing` at the matching level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Info => tracing::info!("{message}"),
            LogLevel::Warning => tracing::warn!("{message}"),
            LogLevel::Error => tracing::error!("{message}"),
            LogLevel::Debug => tracing::debug!("{message}"),
        }
    }
}

/// One captured log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
}

/// Records messages in memory.
///
/// ```
/// use readers_writers::logger::{LogLevel, Logger, MemoryLogger};
///
/// let logger = MemoryLogger::new();
/// logger.log(LogLevel::Warning, "index out of range");
/// assert_eq!(logger.count(LogLevel::Warning), 1);
/// assert!(logger.contains("out of range"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLogger {
    /// An empty logger.
    pub fn new() -> Self {
        MemoryLogger::default()
    }

    /// A copy of everything logged so far, in logging order.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.with_sync(|records| records.clone())
    }

    /// Number of records logged at `level`.
    pub fn count(&self, level: LogLevel) -> usize {
        self.records
            .with_sync(|records| records.iter().filter(|r| r.level == level).count())
    }

    /// Whether any message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.records
            .with_sync(|records| records.iter().any(|r| r.message.contains(needle)))
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: LogLevel, message: &str) {
        let record = LogRecord {
            level,
            message: message.to_owned(),
        };
        self.records.with_mut_sync(|records| records.push(record));
    }
}

/// A short label for the calling thread, used in log messages.
pub fn thread_label() -> String {
    let current = std::thread::current();
    match current.name() {
        Some(name) => format!("{name} ({:?})", current.id()),
        None => format!("{:?}", current.id()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    #[test]
    fn level_names() {
        assert_eq!(LogLevel::Info.to_string(), "INFO");
        assert_eq!(LogLevel::Warning.to_string(), "WARNING");
        assert_eq!(LogLevel::Error.to_string(), "ERROR");
        assert_eq!(LogLevel::Debug.to_string(), "DEBUG");
    }

    #[test]
    fn memory_logger_collects_from_many_threads() {
        let logger = Arc::new(MemoryLogger::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let logger = Arc::clone(&logger);
                thread::spawn(move || {
                    for j in 0..10 {
                        logger.log(LogLevel::Debug, &format!("worker {i} step {j}"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(logger.records().len(), 40);
        assert_eq!(logger.count(LogLevel::Debug), 40);
        assert!(logger.contains("worker 3 step 9"));
    }

    #[test]
    fn tracing_logger_accepts_every_level() {
        let logger = TracingLogger;
        for level in [
            LogLevel::Info,
            LogLevel::Warning,
            LogLevel::Error,
            LogLevel::Debug,
        ] {
            logger.log(level, "no subscriber installed");
        }
    }

    #[test]
    fn thread_label_uses_thread_name() {
        let label = thread::Builder::new()
            .name("reader-7".into())
            .spawn(thread_label)
            .unwrap()
            .join()
            .unwrap();
        assert!(label.starts_with("reader-7 (ThreadId("));
    }
}
