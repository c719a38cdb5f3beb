//! React Native native-module dialect
//!
//! The script side calls exported methods with positional arguments and gets
//! a promise back. Positions are mapped to names through
//! [`Method::params`], so both dialects share one argument model.

use crate::adapter::{PushBridge, SetupError};
use crate::binding::PluginBinding;
use crate::channel::{ChannelRegistry, MethodCallHandler};
use crate::reply::ReplySink;
use larapush_core::{
    BridgeConfig, BridgeError, BridgeResult, DetachableContext, Dialect, HostContext, Method,
    PushSdk, Reply,
};
use larapush_transport::MethodCall;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

/// Name the module is registered under
pub const MODULE_NAME: &str = "LaraPushModule";

/// Rejection code for a method outside the operation table
pub const NOT_IMPLEMENTED: &str = "NOT_IMPLEMENTED";

/// Promise handed over with each React Native call
pub trait Promise: Send + 'static {
    fn resolve(self: Box<Self>, value: Value);

    fn reject(self: Box<Self>, code: String, message: Option<String>);
}

/// Settle a promise from a reply
pub fn settle(method: &str, reply: Reply, promise: Box<dyn Promise>) {
    match reply {
        Reply::Success(value) => promise.resolve(value),
        Reply::Failure { code, message, .. } => promise.reject(code, message),
        Reply::NotImplemented => promise.reject(
            NOT_IMPLEMENTED.to_string(),
            Some(format!("{method} is not implemented")),
        ),
    }
}

/// Turn positional arguments into a keyed call
///
/// Unknown methods keep no arguments; the bridge answers them with
/// not-implemented anyway.
pub fn keyed_call(method: &str, arguments: Vec<Value>) -> BridgeResult<MethodCall> {
    let mut call = MethodCall::new(method);
    let Some(known) = Method::from_name(method) else {
        return Ok(call);
    };

    let params = known.params();
    if arguments.len() > params.len() {
        return Err(BridgeError::InvalidArguments(format!(
            "{method} takes at most {} arguments, got {}",
            params.len(),
            arguments.len()
        )));
    }
    for (name, value) in params.iter().zip(arguments) {
        call.arguments.insert((*name).to_string(), value);
    }
    Ok(call)
}

/// React Native module exposing the full operation table
///
/// The host context is the current activity: it is attached on resume and
/// cleared on destroy, so `initialize` without a foreground activity fails
/// with `CONTEXT_ERROR`.
pub struct LaraPushModule {
    bridge: PushBridge,
    activity: Arc<DetachableContext>,
    binding: Mutex<Option<PluginBinding>>,
}

impl LaraPushModule {
    pub fn new(sdk: Arc<dyn PushSdk>) -> Result<Self, SetupError> {
        Self::with_config(sdk, &BridgeConfig::react_native())
    }

    /// Create a module; the dialect is forced to React Native
    pub fn with_config(sdk: Arc<dyn PushSdk>, config: &BridgeConfig) -> Result<Self, SetupError> {
        let activity = Arc::new(DetachableContext::new());
        let bridge = PushBridge::builder(sdk)
            .config(config)
            .dialect(Dialect::ReactNative)
            .context(activity.clone())
            .build()?;

        Ok(Self {
            bridge,
            activity,
            binding: Mutex::new(None),
        })
    }

    pub fn name(&self) -> &'static str {
        MODULE_NAME
    }

    /// Exported method names, in table order
    pub fn method_names(&self) -> Vec<&'static str> {
        Method::ALL.iter().map(Method::name).collect()
    }

    /// Register the module on the host's channel registry
    pub fn register(&self, registry: Arc<ChannelRegistry>) -> Result<(), SetupError> {
        let binding = PluginBinding::attach(registry, self.bridge.clone(), MODULE_NAME)?;
        *self.binding.lock() = Some(binding);
        Ok(())
    }

    pub fn on_host_resume(&self, activity: HostContext) {
        self.activity.attach(activity);
    }

    pub fn on_host_destroy(&self) {
        self.activity.detach();
    }

    /// Tear the module down; later calls are rejected with `CHANNEL_DETACHED`
    pub fn invalidate(&self) {
        self.activity.detach();
        let binding = self.binding.lock().take();
        match binding {
            Some(binding) => binding.detach(),
            None => {
                self.bridge.mark_detached();
            }
        }
    }

    /// Entry point for an exported method call
    pub fn invoke(&self, method: &str, arguments: Vec<Value>, promise: Box<dyn Promise>) {
        let call = match keyed_call(method, arguments) {
            Ok(call) => call,
            Err(err) => {
                let code = err.code(Dialect::ReactNative).unwrap_or(NOT_IMPLEMENTED);
                promise.reject(code.to_string(), err.reply_message());
                return;
            }
        };

        let name = method.to_string();
        let sink = ReplySink::from_fn(method, move |reply| settle(&name, reply, promise));
        self.bridge.on_method_call(call, sink);
    }

    pub fn bridge(&self) -> &PushBridge {
        &self.bridge
    }
}
