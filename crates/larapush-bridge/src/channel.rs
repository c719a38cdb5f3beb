//! Named method channels

use crate::reply::ReplySink;
use dashmap::DashMap;
use larapush_core::Reply;
use larapush_transport::{Codec, CodecError, JsonCodec, MethodCall, ReplyEnvelope};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// Receiver of calls arriving on a channel
///
/// Implementations must reply through the sink exactly once; the sink
/// enforces that by consuming itself.
pub trait MethodCallHandler: Send + Sync + 'static {
    fn on_method_call(&self, call: MethodCall, sink: ReplySink);
}

/// Errors raised by the channel plumbing itself, never by an operation
#[derive(Error, Debug)]
pub enum ChannelError {
    #[error("no handler registered for channel {0}")]
    MissingHandler(String),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Registry of channel name to handler
///
/// This is the messenger the host platform owns. Handlers are registered on
/// attach and removed on detach.
pub struct ChannelRegistry {
    handlers: DashMap<String, Arc<dyn MethodCallHandler>>,
    next_call_id: AtomicU64,
    codec: JsonCodec,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self {
            handlers: DashMap::new(),
            next_call_id: AtomicU64::new(1),
            codec: JsonCodec::new(),
        }
    }

    /// Register a handler, or remove it with `None`
    ///
    /// Returns the handler previously registered under `name`.
    pub fn set_handler(
        &self,
        name: impl Into<String>,
        handler: Option<Arc<dyn MethodCallHandler>>,
    ) -> Option<Arc<dyn MethodCallHandler>> {
        let name = name.into();
        match handler {
            Some(handler) => {
                tracing::debug!(channel = %name, "handler registered");
                self.handlers.insert(name, handler)
            }
            None => {
                tracing::debug!(channel = %name, "handler removed");
                self.handlers.remove(&name).map(|(_, handler)| handler)
            }
        }
    }

    pub fn has_handler(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Names of every registered channel
    pub fn channel_names(&self) -> Vec<String> {
        self.handlers.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Send a call to the channel's handler and wait for its reply
    pub async fn invoke(&self, name: &str, mut call: MethodCall) -> Result<Reply, ChannelError> {
        let handler = self
            .handlers
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| ChannelError::MissingHandler(name.to_string()))?;

        if call.call_id.is_none() {
            call.call_id = Some(self.next_call_id.fetch_add(1, Ordering::Relaxed));
        }
        tracing::trace!(channel = name, method = %call.method, call_id = call.call_id, "invoke");

        let (sink, receiver) = ReplySink::channel(call.method.clone());
        handler.on_method_call(call, sink);
        Ok(receiver.recv().await)
    }

    /// Byte-level entry point: JSON call in, JSON reply envelope out
    pub async fn invoke_encoded(&self, name: &str, data: &[u8]) -> Result<Vec<u8>, ChannelError> {
        let call = self.codec.decode_call(data)?;
        let call_id = call.call_id;
        let reply = self.invoke(name, call).await?;
        let envelope = ReplyEnvelope::from(reply).with_call_id(call_id);
        Ok(self.codec.encode_reply(&envelope)?)
    }
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Caller-side view of one named channel
#[derive(Clone)]
pub struct Channel {
    registry: Arc<ChannelRegistry>,
    name: String,
}

impl Channel {
    pub fn new(registry: Arc<ChannelRegistry>, name: impl Into<String>) -> Self {
        Self {
            registry,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn invoke(&self, call: MethodCall) -> Result<Reply, ChannelError> {
        self.registry.invoke(&self.name, call).await
    }
}

impl std::fmt::Debug for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel").field("name", &self.name).finish()
    }
}
