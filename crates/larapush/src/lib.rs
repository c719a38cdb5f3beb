//! # larapush
//!
//! Bridge the LaraPush push-notification SDK to cross-platform application
//! layers.
//!
//! The native side registers a [`PushBridge`] on a channel; application code
//! talks to it through the [`LaraPush`] client. Every operation gets exactly
//! one reply: a typed value or a `{code, message}` failure.
//!
//! ## Native side
//!
//! ```ignore
//! use larapush::prelude::*;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(ChannelRegistry::new());
//! let bridge = PushBridge::builder(Arc::new(MyPushSdk::new()))
//!     .config(&BridgeConfig::default())
//!     .context(Arc::new(FixedContext::new(HostContext::new("application"))))
//!     .build()?;
//! let _binding = PluginBinding::attach(registry.clone(), bridge, "larapush")?;
//! ```
//!
//! ## Application side
//!
//! ```ignore
//! let push = LaraPush::connect(registry, "larapush");
//! push.initialize("https://panel.example", "app-123", false).await?;
//! push.set_tags(["vip", "beta"]).await?;
//! let tags = push.get_tags().await?;
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`larapush_core`] - Operation table, config, errors, SDK capability trait
//! - [`larapush_transport`] - Call and reply envelopes, JSON codec
//! - [`larapush_bridge`] - Adapter, channels, binding, platform dialects
//! - [`larapush_logging`] - Host log forwarding

mod client;
mod error;
mod transport;

pub use client::LaraPush;
pub use error::{ClientError, ClientResult};
pub use transport::Transport;

// Re-export core types
pub use larapush_core::{
    BridgeConfig, BridgeError, ChannelState, ContextSource, DetachableContext, Dialect,
    FixedContext, HostContext, InMemoryPushSdk, LogLevel, Method, PushConfig, PushSdk, Reply,
    SdkError, SdkResult,
};

// Re-export bridge types
pub use larapush_bridge::{
    Channel, ChannelError, ChannelRegistry, MethodCallHandler, PluginBinding, PushBridge,
    ReplySink, SetupError, install_host_logging, platform,
};

pub use larapush_logging::LogCallback;
pub use larapush_transport::MethodCall;

// Re-export common dependencies that SDK integrators need
pub use async_trait::async_trait;
pub use serde_json;
pub use tokio;
pub use tracing;

/// Prelude module for convenient imports.
///
/// Use `use larapush::prelude::*;` to import commonly used types.
pub mod prelude {
    pub use crate::{
        BridgeConfig, ChannelRegistry, ClientError, ClientResult, ContextSource, FixedContext,
        HostContext, LaraPush, PluginBinding, PushBridge, PushConfig, PushSdk, SdkError,
        SdkResult, Transport, async_trait,
    };
}
