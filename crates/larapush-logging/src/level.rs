//! Changing the bridge log level after startup

use crate::sink::HostLogSink;
use larapush_core::LogLevel;
use once_cell::sync::{Lazy, OnceCell};
use tracing_subscriber::Registry;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::reload;

type FilterHandle = reload::Handle<LevelFilter, Registry>;

static GLOBAL_CONTROL: Lazy<LevelControl> = Lazy::new(|| LevelControl::new(HostLogSink::global()));

/// Moves the subscriber filter and the host sink gate together
///
/// Before a filter is installed only the sink level changes, which still
/// governs what reaches the host.
pub struct LevelControl {
    filter: OnceCell<FilterHandle>,
    sink: &'static HostLogSink,
}

impl LevelControl {
    pub fn new(sink: &'static HostLogSink) -> Self {
        Self {
            filter: OnceCell::new(),
            sink,
        }
    }

    /// Control used by [`init_logging`](crate::init_logging)
    pub fn global() -> &'static LevelControl {
        &GLOBAL_CONTROL
    }

    /// Register the reloadable filter; later registrations are ignored
    pub fn install(&self, filter: FilterHandle) -> bool {
        self.filter.set(filter).is_ok()
    }

    pub fn is_installed(&self) -> bool {
        self.filter.get().is_some()
    }

    pub fn level(&self) -> LogLevel {
        self.sink.level()
    }

    pub fn set_level(&self, level: LogLevel) -> Result<(), reload::Error> {
        self.sink.set_level(level);
        match self.filter.get() {
            Some(filter) => filter.reload(level_filter(level)),
            None => Ok(()),
        }
    }
}

pub(crate) fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Trace => LevelFilter::TRACE,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Off => LevelFilter::OFF,
    }
}

#[cfg(test)]
#[path = "level/level_tests.rs"]
mod level_tests;
