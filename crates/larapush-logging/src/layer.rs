//! Tracing layer that forwards to the host log callback

use crate::level::{LevelControl, level_filter};
use crate::sink::HostLogSink;
use larapush_core::LogLevel;
use std::fmt::Write as _;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

/// Tracing layer that renders events as one line and hands them to the host
///
/// Structured fields are appended after the message as `key=value`, so a
/// line looks like `reply sent method=setTags code=SET_TAGS_ERROR`.
pub struct HostLogLayer {
    sink: &'static HostLogSink,
}

impl HostLogLayer {
    /// Layer writing to [`HostLogSink::global`]
    pub fn new() -> Self {
        Self::with_sink(HostLogSink::global())
    }

    pub fn with_sink(sink: &'static HostLogSink) -> Self {
        Self { sink }
    }

    fn convert_level(level: &Level) -> LogLevel {
        match *level {
            Level::TRACE => LogLevel::Trace,
            Level::DEBUG => LogLevel::Debug,
            Level::INFO => LogLevel::Info,
            Level::WARN => LogLevel::Warn,
            Level::ERROR => LogLevel::Error,
        }
    }
}

impl Default for HostLogLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for HostLogLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = Self::convert_level(metadata.level());

        if !self.sink.accepts(level) {
            return;
        }

        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);

        self.sink.forward(level, metadata.target(), &visitor.finish());
    }

    fn enabled(&self, metadata: &tracing::Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        self.sink.accepts(Self::convert_level(metadata.level()))
    }
}

/// Collects the message and the remaining fields of an event
#[derive(Default)]
struct LineVisitor {
    message: Option<String>,
    fields: String,
}

impl LineVisitor {
    fn push_field(&mut self, name: &str, value: std::fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{name}={value}");
    }

    fn finish(self) -> String {
        match (self.message, self.fields.is_empty()) {
            (Some(message), true) => message,
            (Some(message), false) => format!("{message} {}", self.fields),
            (None, _) => self.fields,
        }
    }
}

impl Visit for LineVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        } else {
            self.push_field(field.name(), format_args!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.push_field(field.name(), format_args!("{value}"));
        }
    }
}

/// Install the host log layer as the global subscriber
///
/// The first call installs a registry with a reloadable level filter and
/// [`HostLogLayer`]. Every call, including later ones, applies `level`
/// through [`LevelControl::global`].
pub fn init_logging(level: LogLevel) {
    use tracing_subscriber::prelude::*;

    let control = LevelControl::global();
    let (filter, handle) = tracing_subscriber::reload::Layer::new(level_filter(level));
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(HostLogLayer::new());
    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        control.install(handle);
    }

    if let Err(e) = control.set_level(level) {
        tracing::debug!(error = %e, "log filter not reloaded");
    }
}
