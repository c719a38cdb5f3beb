//! SDK and bridge configuration types

use crate::error::{BridgeError, BridgeResult};
use crate::method::Dialect;
use serde::{Deserialize, Serialize};

/// One SDK initialization: which panel, which application, debug or not
///
/// Constructed once per `initialize` call and handed to the SDK, which owns it
/// from then on.
///
/// Deserializing goes through [`PushConfig::new`], so blank fields are
/// rejected there too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawPushConfig")]
pub struct PushConfig {
    panel_url: String,
    application_id: String,
    debug: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPushConfig {
    panel_url: String,
    application_id: String,
    #[serde(default)]
    debug: bool,
}

impl TryFrom<RawPushConfig> for PushConfig {
    type Error = BridgeError;

    fn try_from(raw: RawPushConfig) -> BridgeResult<Self> {
        PushConfig::new(raw.panel_url, raw.application_id, raw.debug)
    }
}

impl PushConfig {
    /// Create a validated configuration
    ///
    /// `panel_url` and `application_id` must be non-blank.
    pub fn new(
        panel_url: impl Into<String>,
        application_id: impl Into<String>,
        debug: bool,
    ) -> BridgeResult<Self> {
        let panel_url = panel_url.into();
        let application_id = application_id.into();

        if panel_url.trim().is_empty() {
            return Err(BridgeError::InvalidArguments(
                "panelUrl must not be empty".to_string(),
            ));
        }
        if application_id.trim().is_empty() {
            return Err(BridgeError::InvalidArguments(
                "applicationId must not be empty".to_string(),
            ));
        }

        Ok(Self {
            panel_url,
            application_id,
            debug,
        })
    }

    pub fn panel_url(&self) -> &str {
        &self.panel_url
    }

    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    pub fn debug(&self) -> bool {
        self.debug
    }
}

/// Bridge configuration supplied by the host when the adapter is built
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Channel (or native module) name; must match the script side exactly
    #[serde(default = "default_channel_name")]
    pub channel_name: String,

    /// Host framework dialect
    #[serde(default)]
    pub dialect: Dialect,

    /// Number of async worker threads (default: number of CPU cores)
    #[serde(default)]
    pub worker_threads: Option<usize>,

    /// Initial log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Route main-thread operations to the main-thread executor
    ///
    /// When false every operation runs on the worker runtime.
    #[serde(default = "default_main_thread_dispatch")]
    pub main_thread_dispatch: bool,

    /// Milliseconds running SDK calls get to finish when the bridge-owned
    /// worker runtime stops
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_ms: u64,
}

fn default_channel_name() -> String {
    "larapush".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_main_thread_dispatch() -> bool {
    true
}

fn default_shutdown_timeout() -> u64 {
    5000
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            channel_name: default_channel_name(),
            dialect: Dialect::default(),
            worker_threads: None,
            log_level: default_log_level(),
            main_thread_dispatch: default_main_thread_dispatch(),
            shutdown_timeout_ms: default_shutdown_timeout(),
        }
    }
}

impl BridgeConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults for the React Native packaging (`LaraPushModule`)
    pub fn react_native() -> Self {
        Self {
            channel_name: "LaraPushModule".to_string(),
            dialect: Dialect::ReactNative,
            ..Self::default()
        }
    }

    /// Create configuration from JSON bytes
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_slice(bytes)
    }

    /// Set the channel name
    pub fn with_channel_name(mut self, name: impl Into<String>) -> Self {
        self.channel_name = name.into();
        self
    }

    /// Set the dialect
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn shutdown_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.shutdown_timeout_ms)
    }
}

#[cfg(test)]
#[path = "config/config_tests.rs"]
mod config_tests;
