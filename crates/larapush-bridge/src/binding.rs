//! Attaching a bridge to a host channel

use crate::adapter::PushBridge;
use crate::channel::{Channel, ChannelRegistry};
use larapush_core::{BridgeConfig, BridgeResult, ChannelState, LogLevel};
use larapush_logging::{HostLogSink, LogCallback, init_logging};
use std::sync::Arc;

/// Registration of one [`PushBridge`] on a named channel
///
/// The handler stays registered until [`detach`](Self::detach) is called or
/// the binding is dropped. After detach the bridge refuses calls even through
/// retained handles.
pub struct PluginBinding {
    registry: Arc<ChannelRegistry>,
    bridge: PushBridge,
    channel_name: String,
}

impl PluginBinding {
    /// Register `bridge` on `registry` under `channel_name`
    ///
    /// Fails with [`BridgeError::Detached`](larapush_core::BridgeError::Detached)
    /// if the bridge was attached or detached before.
    pub fn attach(
        registry: Arc<ChannelRegistry>,
        bridge: PushBridge,
        channel_name: impl Into<String>,
    ) -> BridgeResult<Self> {
        let channel_name = channel_name.into();
        bridge.mark_attached()?;
        registry.set_handler(channel_name.clone(), Some(Arc::new(bridge.clone())));
        tracing::info!(channel = %channel_name, dialect = %bridge.dialect(), "bridge attached");

        Ok(Self {
            registry,
            bridge,
            channel_name,
        })
    }

    /// Register under the channel name from `config`
    pub fn attach_with_config(
        registry: Arc<ChannelRegistry>,
        bridge: PushBridge,
        config: &BridgeConfig,
    ) -> BridgeResult<Self> {
        Self::attach(registry, bridge, config.channel_name.clone())
    }

    /// Caller-side handle for the bound channel
    pub fn channel(&self) -> Channel {
        Channel::new(self.registry.clone(), self.channel_name.clone())
    }

    pub fn bridge(&self) -> &PushBridge {
        &self.bridge
    }

    pub fn channel_name(&self) -> &str {
        &self.channel_name
    }

    pub fn is_attached(&self) -> bool {
        self.bridge.state() == ChannelState::Attached
    }

    /// Unregister the handler and stop the bridge; repeated calls do nothing
    pub fn detach(&self) {
        if self.bridge.mark_detached() {
            self.registry.set_handler(self.channel_name.as_str(), None);
            tracing::info!(channel = %self.channel_name, "bridge detached");
        }
    }
}

impl Drop for PluginBinding {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for PluginBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginBinding")
            .field("channel_name", &self.channel_name)
            .field("state", &self.bridge.state())
            .finish()
    }
}

/// Route bridge logs to the host log at the level from `config`
///
/// A `None` callback keeps whatever callback was installed before.
pub fn install_host_logging(config: &BridgeConfig, callback: Option<LogCallback>) {
    if let Some(callback) = callback {
        HostLogSink::global().replace_callback(callback);
    }
    init_logging(LogLevel::from_name(&config.log_level));
}
