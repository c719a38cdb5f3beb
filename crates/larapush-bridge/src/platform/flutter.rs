//! Flutter method-channel dialect
//!
//! Calls carry keyed arguments. Replies go through a result callback with
//! `success`, `error` and `notImplemented`, delivered on the main executor
//! the way a Flutter engine expects.

use crate::adapter::{PushBridge, SetupError};
use crate::binding::PluginBinding;
use crate::channel::{ChannelRegistry, MethodCallHandler};
use crate::reply::ReplySink;
use larapush_core::{
    BridgeConfig, BridgeError, Dialect, FixedContext, HostContext, PushSdk, Reply,
};
use larapush_transport::MethodCall;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

/// Channel name the Dart side opens
pub const CHANNEL_NAME: &str = "larapush";

/// Result callback handed over with each Flutter method call
pub trait FlutterResult: Send + 'static {
    fn success(self: Box<Self>, result: Value);

    fn error(self: Box<Self>, code: String, message: Option<String>, details: Option<Value>);

    fn not_implemented(self: Box<Self>);
}

/// Hand a reply to a Flutter result callback
pub fn deliver(reply: Reply, result: Box<dyn FlutterResult>) {
    match reply {
        Reply::Success(value) => result.success(value),
        Reply::Failure {
            code,
            message,
            details,
        } => result.error(code, message, details),
        Reply::NotImplemented => result.not_implemented(),
    }
}

/// Flutter plugin: attaches a bridge while an engine is running
pub struct FlutterPlugin {
    sdk: Arc<dyn PushSdk>,
    config: BridgeConfig,
    binding: Mutex<Option<PluginBinding>>,
}

impl FlutterPlugin {
    pub fn new(sdk: Arc<dyn PushSdk>) -> Self {
        Self::with_config(sdk, BridgeConfig::default().with_channel_name(CHANNEL_NAME))
    }

    /// Create a plugin; the dialect is forced to Flutter
    pub fn with_config(sdk: Arc<dyn PushSdk>, config: BridgeConfig) -> Self {
        Self {
            sdk,
            config: config.with_dialect(Dialect::Flutter),
            binding: Mutex::new(None),
        }
    }

    /// Register the channel, capturing the application context
    ///
    /// An engine that attaches twice replaces the earlier binding.
    pub fn on_attached_to_engine(
        &self,
        registry: Arc<ChannelRegistry>,
        application_context: HostContext,
    ) -> Result<(), SetupError> {
        self.on_detached_from_engine();

        let bridge = PushBridge::builder(self.sdk.clone())
            .config(&self.config)
            .context(Arc::new(FixedContext::new(application_context)))
            .build()?;
        let binding = PluginBinding::attach_with_config(registry, bridge, &self.config)?;
        *self.binding.lock() = Some(binding);
        Ok(())
    }

    /// Unregister the channel; later calls fail with `CHANNEL_DETACHED`
    pub fn on_detached_from_engine(&self) {
        let binding = self.binding.lock().take();
        if let Some(binding) = binding {
            binding.detach();
        }
    }

    pub fn is_attached(&self) -> bool {
        self.binding
            .lock()
            .as_ref()
            .is_some_and(PluginBinding::is_attached)
    }

    /// Entry point for the engine's method-call callback
    pub fn on_method_call(&self, method: &str, arguments: Value, result: Box<dyn FlutterResult>) {
        let Some(bridge) = self.bridge() else {
            tracing::warn!(method, "call on detached Flutter channel");
            reject(BridgeError::Detached, result);
            return;
        };

        let call = match MethodCall::from_value(method, arguments) {
            Ok(call) => call,
            Err(err) => {
                reject(err, result);
                return;
            }
        };

        let main = bridge.main_dispatcher().clone();
        let sink = ReplySink::from_fn(method, move |reply| {
            main.dispatch(Box::pin(async move { deliver(reply, result) }));
        });
        bridge.on_method_call(call, sink);
    }

    fn bridge(&self) -> Option<PushBridge> {
        self.binding
            .lock()
            .as_ref()
            .filter(|binding| binding.is_attached())
            .map(|binding| binding.bridge().clone())
    }
}

fn reject(err: BridgeError, result: Box<dyn FlutterResult>) {
    match err.code(Dialect::Flutter) {
        Some(code) => result.error(code.to_string(), err.reply_message(), None),
        None => result.not_implemented(),
    }
}
