//! larapush-bridge - Native bridge adapter for the LaraPush SDK
//!
//! This crate provides:
//! - [`PushBridge`] adapter: argument validation, SDK dispatch, error mapping
//! - [`ReplySink`] guaranteeing exactly one reply per call
//! - [`ChannelRegistry`] and [`Channel`] standing in for the host messenger
//! - [`PluginBinding`] for attach/detach
//! - [`platform`] dialects for Flutter and React Native
//!
//! # Example
//!
//! ```ignore
//! use larapush_bridge::prelude::*;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(ChannelRegistry::new());
//! let bridge = PushBridge::builder(Arc::new(InMemoryPushSdk::new()))
//!     .context(Arc::new(FixedContext::new(HostContext::new("application"))))
//!     .build()?;
//! let binding = PluginBinding::attach(registry, bridge, "larapush")?;
//! let reply = binding.channel().invoke(MethodCall::new("getTags")).await?;
//! ```

mod adapter;
mod binding;
mod channel;
mod panic_guard;
pub mod platform;
mod reply;

pub use adapter::{MAIN_THREAD_NAME, PushBridge, PushBridgeBuilder, SetupError};
pub use binding::{PluginBinding, install_host_logging};
pub use channel::{Channel, ChannelError, ChannelRegistry, MethodCallHandler};
pub use panic_guard::panic_message;
pub use reply::{REPLY_DROPPED, ReplyReceiver, ReplySink};

// Re-export dependent crates for convenience
pub use larapush_core;
pub use larapush_runtime;
pub use larapush_transport;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Channel, ChannelError, ChannelRegistry, MethodCallHandler, PluginBinding, PushBridge,
        ReplySink, SetupError,
    };
    pub use larapush_core::prelude::*;
    pub use larapush_core::{FixedContext, InMemoryPushSdk};
    pub use larapush_transport::MethodCall;
}
