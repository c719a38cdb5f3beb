//! larapush-logging - Bridge logs into the host platform log
//!
//! This crate provides:
//! - [`HostLogLayer`] tracing layer that forwards events to a host callback
//! - [`HostLogSink`] holding the host [`LogCallback`] (logcat, os_log, console)
//! - [`LevelControl`] for changing the level after startup

mod layer;
mod level;
mod sink;

pub use larapush_core::LogLevel;
pub use layer::{HostLogLayer, init_logging};
pub use level::LevelControl;
pub use sink::{HostLogSink, LogCallback};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{HostLogLayer, HostLogSink, LevelControl, LogCallback, LogLevel, init_logging};
}
