//! Destination for bridge log lines on the host side

use larapush_core::LogLevel;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

/// Host logger receiving `(level, target, line)`
///
/// Platform glue wraps logcat, os_log or the JS console in one of these.
/// It may be called from any thread, including the SDK worker threads.
pub type LogCallback = Arc<dyn Fn(LogLevel, &str, &str) + Send + Sync>;

static GLOBAL_SINK: Lazy<HostLogSink> = Lazy::new(HostLogSink::new);

/// Level gate plus the currently installed host logger
pub struct HostLogSink {
    callback: RwLock<Option<LogCallback>>,
    level: AtomicU8,
}

impl HostLogSink {
    pub fn new() -> Self {
        Self {
            callback: RwLock::new(None),
            level: AtomicU8::new(LogLevel::Info as u8),
        }
    }

    /// Sink shared by [`HostLogLayer::new`](crate::HostLogLayer::new) and
    /// [`init_logging`](crate::init_logging)
    pub fn global() -> &'static HostLogSink {
        &GLOBAL_SINK
    }

    /// Install `callback`, returning the one it replaces
    pub fn replace_callback(&self, callback: LogCallback) -> Option<LogCallback> {
        self.callback.write().replace(callback)
    }

    pub fn clear_callback(&self) -> Option<LogCallback> {
        self.callback.write().take()
    }

    pub fn has_callback(&self) -> bool {
        self.callback.read().is_some()
    }

    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Whether a line at `level` would reach the host
    pub fn accepts(&self, level: LogLevel) -> bool {
        level != LogLevel::Off && level >= self.level()
    }

    /// Hand one line to the host logger
    ///
    /// Lines below the level, or sent while no logger is installed, are
    /// discarded. The lock is released before the logger runs so a logger
    /// may itself swap the callback.
    pub fn forward(&self, level: LogLevel, target: &str, line: &str) {
        if !self.accepts(level) {
            return;
        }
        let callback = self.callback.read().clone();
        if let Some(callback) = callback {
            callback(level, target, line);
        }
    }
}

impl Default for HostLogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HostLogSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostLogSink")
            .field("level", &self.level())
            .field("has_callback", &self.has_callback())
            .finish()
    }
}
