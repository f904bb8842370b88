use std::sync::Mutex;

///
/// Logger
///
/// Diagnostics sink threaded through a processing pass. `debug` messages
/// are dropped unless debug output was requested.
///

pub trait Logger {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

///
/// TracingLogger
///

#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger {
    debug: bool,
}

impl TracingLogger {
    #[must_use]
    pub const fn new(debug: bool) -> Self {
        Self { debug }
    }
}

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        if self.debug {
            tracing::debug!(target: "destinations", "{message}");
        }
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "destinations", "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "destinations", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "destinations", "{message}");
    }
}

///
/// RecordingLogger
///
/// Keeps every message in memory, for hosts that forward diagnostics later.
///

#[derive(Debug, Default)]
pub struct RecordingLogger {
    debug: bool,
    records: Mutex<Vec<(Level, String)>>,
}

///
/// Level
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl RecordingLogger {
    #[must_use]
    pub fn new(debug: bool) -> Self {
        Self {
            debug,
            records: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn records(&self) -> Vec<(Level, String)> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    fn push(&self, level: Level, message: &str) {
        if let Ok(mut records) = self.records.lock() {
            records.push((level, message.to_string()));
        }
    }
}

impl Logger for RecordingLogger {
    fn debug(&self, message: &str) {
        if self.debug {
            self.push(Level::Debug, message);
        }
    }

    fn info(&self, message: &str) {
        self.push(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.push(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.push(Level::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_is_dropped_unless_enabled() {
        let quiet = RecordingLogger::new(false);
        quiet.debug("hidden");
        quiet.info("shown");

        assert_eq!(quiet.records(), vec![(Level::Info, "shown".to_string())]);

        let verbose = RecordingLogger::new(true);
        verbose.debug("visible");
        assert_eq!(verbose.records().len(), 1);
    }
}
