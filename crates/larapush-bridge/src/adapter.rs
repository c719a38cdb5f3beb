//! Native bridge adapter
//!
//! [`PushBridge`] turns one [`MethodCall`] into one [`Reply`]: it validates
//! arguments, resolves the host context, invokes the injected [`PushSdk`],
//! and maps every error to the dialect's failure code. Nothing raised by the
//! SDK (including a panic) escapes past [`PushBridge::handle`].

use crate::channel::MethodCallHandler;
use crate::panic_guard::join_error_message;
use crate::reply::ReplySink;
use larapush_core::{
    AtomicChannelState, BridgeConfig, BridgeError, BridgeResult, ChannelState, ContextSource,
    DetachableContext, Dialect, Method, PushConfig, PushSdk, Reply, SdkError,
};
use larapush_runtime::{AsyncRuntime, MainThread, RuntimeConfig, RuntimeError, TaskDispatcher};
use larapush_transport::MethodCall;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Name of the thread standing in for the host UI thread
pub const MAIN_THREAD_NAME: &str = "larapush-main";

/// Errors raised while assembling a bridge
#[derive(Error, Debug)]
pub enum SetupError {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("failed to attach bridge: {0}")]
    Attach(#[from] BridgeError),
}

/// Adapter between a host channel and the push SDK
///
/// Cloning is cheap; clones share the SDK, the executors and the channel
/// state.
#[derive(Clone)]
pub struct PushBridge {
    inner: Arc<Inner>,
}

struct Inner {
    sdk: Arc<dyn PushSdk>,
    context: Arc<dyn ContextSource>,
    dialect: Dialect,
    main: Arc<dyn TaskDispatcher>,
    worker: Arc<dyn TaskDispatcher>,
    main_thread_dispatch: bool,
    state: AtomicChannelState,
}

impl PushBridge {
    /// Start building a bridge around an SDK
    pub fn builder(sdk: Arc<dyn PushSdk>) -> PushBridgeBuilder {
        PushBridgeBuilder::new(sdk)
    }

    pub fn dialect(&self) -> Dialect {
        self.inner.dialect
    }

    pub fn state(&self) -> ChannelState {
        self.inner.state.get()
    }

    /// Mark the bridge as registered on a channel
    pub fn mark_attached(&self) -> BridgeResult<()> {
        self.inner
            .state
            .transition_to(ChannelState::Attached)
            .map_err(|current| {
                tracing::warn!(state = %current, "bridge cannot be attached");
                BridgeError::Detached
            })
    }

    /// Mark the bridge as detached; every later call is refused
    ///
    /// Returns `false` if the bridge was already detached.
    pub fn mark_detached(&self) -> bool {
        match self.inner.state.transition_to(ChannelState::Detached) {
            Ok(()) => {
                tracing::debug!(dialect = %self.inner.dialect, "bridge detached");
                true
            }
            Err(_) => false,
        }
    }

    /// Executor a method name is dispatched to
    pub fn dispatcher_for(&self, method: &str) -> &Arc<dyn TaskDispatcher> {
        let on_main = self.inner.main_thread_dispatch
            && Method::from_name(method).is_some_and(|m| m.runs_on_main_thread());
        if on_main {
            &self.inner.main
        } else {
            &self.inner.worker
        }
    }

    /// Executor standing in for the host UI thread
    pub fn main_dispatcher(&self) -> &Arc<dyn TaskDispatcher> {
        &self.inner.main
    }

    /// Handle one call and produce its reply
    ///
    /// Must be polled inside a Tokio runtime.
    pub async fn handle(&self, call: MethodCall) -> Reply {
        let Some(method) = Method::from_name(&call.method) else {
            tracing::debug!(method = %call.method, "method not implemented");
            return Reply::NotImplemented;
        };

        let result = if self.inner.state.get().is_terminal() {
            Err(BridgeError::Detached)
        } else {
            self.guarded_dispatch(method, call).await
        };

        match result {
            Ok(payload) => Reply::Success(payload),
            Err(err) => self.failure_reply(method, err),
        }
    }

    /// Run one operation against the SDK
    pub async fn dispatch(&self, method: Method, call: &MethodCall) -> BridgeResult<Value> {
        tracing::debug!(method = %method, dialect = %self.inner.dialect, "dispatching");

        let sdk = &self.inner.sdk;
        let sdk_err = |err: SdkError| BridgeError::sdk(method, err);

        match method {
            Method::Initialize => {
                let config = push_config(call)?;
                let context = self.inner.context.current().ok_or_else(|| {
                    BridgeError::ContextUnavailable("Context not available".to_string())
                })?;
                sdk.init(&context, config).await.map_err(sdk_err)?;
                Ok(Value::Bool(true))
            }
            Method::SetTags => {
                sdk.set_tags(&tags(call)?).await.map_err(sdk_err)?;
                Ok(Value::Bool(true))
            }
            Method::RemoveTags => {
                sdk.remove_tags(&tags(call)?).await.map_err(sdk_err)?;
                Ok(Value::Bool(true))
            }
            Method::ClearTags => {
                sdk.clear_tags().await.map_err(sdk_err)?;
                Ok(Value::Bool(true))
            }
            Method::GetTags => Ok(Value::from(sdk.get_tags().await.map_err(sdk_err)?)),
            Method::GetToken => Ok(sdk
                .get_token()
                .await
                .map_err(sdk_err)?
                .map_or(Value::Null, Value::String)),
            Method::RefreshToken => {
                sdk.refresh_token().await.map_err(sdk_err)?;
                Ok(Value::Bool(true))
            }
            Method::AreNotificationsEnabled => Ok(Value::Bool(
                sdk.are_notifications_enabled().await.map_err(sdk_err)?,
            )),
        }
    }

    async fn guarded_dispatch(&self, method: Method, call: MethodCall) -> BridgeResult<Value> {
        let bridge = self.clone();
        let task = tokio::spawn(async move { bridge.dispatch(method, &call).await });

        match task.await {
            Ok(result) => result,
            Err(err) => {
                let message = join_error_message(err);
                tracing::error!(method = %method, "{message}");
                Err(BridgeError::Sdk {
                    method,
                    message: Some(message),
                })
            }
        }
    }

    fn failure_reply(&self, method: Method, err: BridgeError) -> Reply {
        match err.code(self.inner.dialect) {
            Some(code) => {
                tracing::warn!(method = %method, code, error = %err, "call failed");
                Reply::failure(code, err.reply_message())
            }
            None => Reply::NotImplemented,
        }
    }
}

impl MethodCallHandler for PushBridge {
    fn on_method_call(&self, call: MethodCall, sink: ReplySink) {
        let dispatcher = self.dispatcher_for(&call.method).clone();
        let bridge = self.clone();
        dispatcher.dispatch(Box::pin(async move {
            let reply = bridge.handle(call).await;
            sink.send(reply);
        }));
    }
}

impl std::fmt::Debug for PushBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PushBridge")
            .field("dialect", &self.inner.dialect)
            .field("state", &self.inner.state.get())
            .field("main", &self.inner.main.label())
            .field("worker", &self.inner.worker.label())
            .finish()
    }
}

fn push_config(call: &MethodCall) -> BridgeResult<PushConfig> {
    let panel_url: Option<String> = call.argument("panelUrl")?;
    let application_id: Option<String> = call.argument("applicationId")?;
    let debug = call.argument::<bool>("debug")?.unwrap_or(false);

    match (panel_url, application_id) {
        (Some(panel_url), Some(application_id)) => {
            PushConfig::new(panel_url, application_id, debug)
        }
        _ => Err(BridgeError::InvalidArguments(
            "panelUrl and applicationId are required".to_string(),
        )),
    }
}

fn tags(call: &MethodCall) -> BridgeResult<Vec<String>> {
    Ok(call.argument::<Vec<String>>("tags")?.unwrap_or_default())
}

/// Builder for [`PushBridge`]
pub struct PushBridgeBuilder {
    sdk: Arc<dyn PushSdk>,
    context: Option<Arc<dyn ContextSource>>,
    dialect: Dialect,
    main_thread_dispatch: bool,
    runtime: RuntimeConfig,
    main: Option<Arc<dyn TaskDispatcher>>,
    worker: Option<Arc<dyn TaskDispatcher>>,
}

impl PushBridgeBuilder {
    fn new(sdk: Arc<dyn PushSdk>) -> Self {
        Self {
            sdk,
            context: None,
            dialect: Dialect::default(),
            main_thread_dispatch: true,
            runtime: RuntimeConfig::new(),
            main: None,
            worker: None,
        }
    }

    /// Source of the host context handed to `init`
    ///
    /// Without one, `initialize` fails with `CONTEXT_ERROR`.
    pub fn context(mut self, context: Arc<dyn ContextSource>) -> Self {
        self.context = Some(context);
        self
    }

    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Apply dialect, dispatch and thread settings from a [`BridgeConfig`]
    pub fn config(mut self, config: &BridgeConfig) -> Self {
        self.dialect = config.dialect;
        self.main_thread_dispatch = config.main_thread_dispatch;
        let mut runtime = RuntimeConfig::new().with_drain_timeout(config.shutdown_timeout());
        if let Some(threads) = config.worker_threads {
            runtime = runtime.with_worker_threads(threads);
        }
        self.runtime = runtime;
        self
    }

    /// Executor for main-thread operations
    pub fn main_dispatcher(mut self, dispatcher: Arc<dyn TaskDispatcher>) -> Self {
        self.main = Some(dispatcher);
        self
    }

    /// Executor for everything else
    pub fn worker_dispatcher(mut self, dispatcher: Arc<dyn TaskDispatcher>) -> Self {
        self.worker = Some(dispatcher);
        self
    }

    /// Build the bridge, starting default executors where none were given
    ///
    /// The worker defaults to the current Tokio runtime, or a new
    /// [`AsyncRuntime`] outside of one. The main executor defaults to a
    /// [`MainThread`]; with main-thread dispatch disabled it is the worker.
    pub fn build(self) -> Result<PushBridge, SetupError> {
        let worker = match self.worker {
            Some(worker) => worker,
            None => default_worker(self.runtime)?,
        };
        let main = match self.main {
            Some(main) => main,
            None if self.main_thread_dispatch => Arc::new(MainThread::spawn(MAIN_THREAD_NAME)?),
            None => worker.clone(),
        };
        let context = self
            .context
            .unwrap_or_else(|| Arc::new(DetachableContext::new()));

        tracing::debug!(
            dialect = %self.dialect,
            main = main.label(),
            worker = worker.label(),
            "bridge built"
        );

        Ok(PushBridge {
            inner: Arc::new(Inner {
                sdk: self.sdk,
                context,
                dialect: self.dialect,
                main,
                worker,
                main_thread_dispatch: self.main_thread_dispatch,
                state: AtomicChannelState::new(),
            }),
        })
    }
}

fn default_worker(runtime: RuntimeConfig) -> Result<Arc<dyn TaskDispatcher>, SetupError> {
    if let Ok(handle) = tokio::runtime::Handle::try_current() {
        return Ok(Arc::new(handle));
    }
    Ok(Arc::new(AsyncRuntime::new(runtime)?))
}

#[cfg(test)]
#[path = "adapter/adapter_tests.rs"]
mod adapter_tests;
