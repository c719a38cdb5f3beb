//! External push SDK capability and host context types

use crate::config::PushConfig;
use crate::error::SdkResult;
use async_trait::async_trait;
use parking_lot::RwLock;

/// Opaque handle to the host environment the SDK is initialized against
///
/// On Android this stands for an application or activity context; the bridge
/// never looks inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostContext {
    label: String,
    token: Option<usize>,
}

impl HostContext {
    /// Create a context identified by a label
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            token: None,
        }
    }

    /// Attach a pointer-sized native token (e.g. a JNI global ref)
    pub fn with_token(mut self, token: usize) -> Self {
        self.token = Some(token);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn token(&self) -> Option<usize> {
        self.token
    }
}

/// Source of the host context at call time
pub trait ContextSource: Send + Sync + 'static {
    /// The context to initialize against, if one is available right now
    fn current(&self) -> Option<HostContext>;
}

/// Context captured once when the plugin attaches (Flutter application context)
#[derive(Debug, Clone)]
pub struct FixedContext(HostContext);

impl FixedContext {
    pub fn new(context: HostContext) -> Self {
        Self(context)
    }
}

impl ContextSource for FixedContext {
    fn current(&self) -> Option<HostContext> {
        Some(self.0.clone())
    }
}

/// Context that comes and goes with the host's foreground activity
#[derive(Debug, Default)]
pub struct DetachableContext {
    current: RwLock<Option<HostContext>>,
}

impl DetachableContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the context that just became available
    pub fn attach(&self, context: HostContext) {
        *self.current.write() = Some(context);
    }

    /// Forget the current context
    pub fn detach(&self) {
        *self.current.write() = None;
    }
}

impl ContextSource for DetachableContext {
    fn current(&self) -> Option<HostContext> {
        self.current.read().clone()
    }
}

/// Capability set of the external LaraPush SDK
///
/// The bridge holds an `Arc<dyn PushSdk>` instead of reaching for a
/// process-wide singleton, so any implementation can be swapped in. Every
/// operation other than [`PushSdk::init`] is expected to fail with
/// [`SdkError::NotInitialized`](crate::SdkError::NotInitialized) until `init`
/// has succeeded. Thread-safety of the implementation is its own concern.
#[async_trait]
pub trait PushSdk: Send + Sync + 'static {
    /// Initialize the SDK against a host context
    async fn init(&self, context: &HostContext, config: PushConfig) -> SdkResult<()>;

    /// Add tags to this installation
    async fn set_tags(&self, tags: &[String]) -> SdkResult<()>;

    /// Remove tags from this installation
    async fn remove_tags(&self, tags: &[String]) -> SdkResult<()>;

    /// Remove every tag
    async fn clear_tags(&self) -> SdkResult<()>;

    /// Tags currently attached, in no particular order
    async fn get_tags(&self) -> SdkResult<Vec<String>>;

    /// Current push token, if one has been issued
    async fn get_token(&self) -> SdkResult<Option<String>>;

    /// Ask the SDK to obtain a fresh token
    async fn refresh_token(&self) -> SdkResult<()>;

    /// Whether the user currently allows notifications
    async fn are_notifications_enabled(&self) -> SdkResult<bool>;
}
