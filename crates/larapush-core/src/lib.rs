//! larapush-core - Operation table, configuration, and the SDK capability seam
//!
//! This crate provides the foundational types for the LaraPush bridge:
//! - [`Method`] canonical operation table shared by every platform dialect
//! - [`PushConfig`] and [`BridgeConfig`] for SDK and bridge configuration
//! - [`BridgeError`] and [`SdkError`] for error handling
//! - [`PushSdk`] trait standing in for the external push SDK
//! - [`Reply`] and [`ChannelState`] for the reply model and channel lifecycle
//! - [`LogLevel`] shared by configuration and host log forwarding

mod config;
mod error;
mod lifecycle;
mod log_level;
mod memory;
mod method;
mod reply;
mod sdk;

pub use config::{BridgeConfig, PushConfig};
pub use error::{BridgeError, BridgeResult, SdkError, SdkResult};
pub use lifecycle::{AtomicChannelState, ChannelState};
pub use log_level::LogLevel;
pub use memory::InMemoryPushSdk;
pub use method::{Dialect, Method};
pub use reply::Reply;
pub use sdk::{ContextSource, DetachableContext, FixedContext, HostContext, PushSdk};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BridgeConfig, BridgeError, BridgeResult, ChannelState, ContextSource, Dialect,
        HostContext, LogLevel, Method, PushConfig, PushSdk, Reply, SdkError, SdkResult,
    };
}
