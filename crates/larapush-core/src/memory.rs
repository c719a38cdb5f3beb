//! In-memory stand-in for the external LaraPush SDK
//!
//! Used by the bridge's own tests and by integrators who want to exercise
//! their channel wiring without a device. Tags keep insertion order with
//! duplicates collapsed; the token is issued on `init` and replaced on
//! `refresh_token`.

use crate::config::PushConfig;
use crate::error::{SdkError, SdkResult};
use crate::method::Method;
use crate::sdk::{HostContext, PushSdk};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
struct SdkState {
    config: Option<PushConfig>,
    context: Option<HostContext>,
    tags: Vec<String>,
    token: Option<String>,
    token_generation: u64,
    notifications_enabled: bool,
    fail_next: HashMap<Method, Option<String>>,
    panic_next: HashSet<Method>,
    calls: HashMap<Method, usize>,
}

/// In-memory [`PushSdk`] with failure injection and call accounting
#[derive(Debug)]
pub struct InMemoryPushSdk {
    state: Mutex<SdkState>,
}

impl InMemoryPushSdk {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SdkState {
                notifications_enabled: true,
                ..SdkState::default()
            }),
        }
    }

    /// Make the next call to `method` fail with the given message
    pub fn fail_next(&self, method: Method, message: Option<&str>) {
        self.state
            .lock()
            .fail_next
            .insert(method, message.map(str::to_string));
    }

    /// Make the next call to `method` panic
    pub fn panic_next(&self, method: Method) {
        self.state.lock().panic_next.insert(method);
    }

    /// Set what `are_notifications_enabled` reports
    pub fn set_notifications_enabled(&self, enabled: bool) {
        self.state.lock().notifications_enabled = enabled;
    }

    /// Number of times `method` reached the SDK
    pub fn calls(&self, method: Method) -> usize {
        self.state.lock().calls.get(&method).copied().unwrap_or(0)
    }

    /// Total number of calls that reached the SDK
    pub fn total_calls(&self) -> usize {
        self.state.lock().calls.values().sum()
    }

    /// Configuration from the last successful `init`
    pub fn config(&self) -> Option<PushConfig> {
        self.state.lock().config.clone()
    }

    /// Context from the last successful `init`
    pub fn context(&self) -> Option<HostContext> {
        self.state.lock().context.clone()
    }

    /// Record the call, apply injected behaviour, and check initialization
    fn enter(&self, method: Method) -> SdkResult<parking_lot::MutexGuard<'_, SdkState>> {
        let mut state = self.state.lock();
        *state.calls.entry(method).or_insert(0) += 1;

        if state.panic_next.remove(&method) {
            drop(state);
            panic!("injected panic in {method}");
        }
        if let Some(message) = state.fail_next.remove(&method) {
            return Err(SdkError::Failed(message));
        }
        if method != Method::Initialize && state.config.is_none() {
            return Err(SdkError::NotInitialized);
        }
        Ok(state)
    }

    fn issue_token(state: &mut SdkState) {
        state.token_generation += 1;
        let app = state
            .config
            .as_ref()
            .map(|c| c.application_id().to_string())
            .unwrap_or_default();
        state.token = Some(format!("lp-{}-{:04}", app, state.token_generation));
    }
}

impl Default for InMemoryPushSdk {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PushSdk for InMemoryPushSdk {
    async fn init(&self, context: &HostContext, config: PushConfig) -> SdkResult<()> {
        let mut state = self.enter(Method::Initialize)?;
        tracing::debug!(
            panel_url = config.panel_url(),
            application_id = config.application_id(),
            "in-memory SDK initialized"
        );
        state.config = Some(config);
        state.context = Some(context.clone());
        if state.token.is_none() {
            Self::issue_token(&mut state);
        }
        Ok(())
    }

    async fn set_tags(&self, tags: &[String]) -> SdkResult<()> {
        let mut state = self.enter(Method::SetTags)?;
        for tag in tags {
            if !state.tags.contains(tag) {
                state.tags.push(tag.clone());
            }
        }
        Ok(())
    }

    async fn remove_tags(&self, tags: &[String]) -> SdkResult<()> {
        let mut state = self.enter(Method::RemoveTags)?;
        state.tags.retain(|t| !tags.contains(t));
        Ok(())
    }

    async fn clear_tags(&self) -> SdkResult<()> {
        let mut state = self.enter(Method::ClearTags)?;
        state.tags.clear();
        Ok(())
    }

    async fn get_tags(&self) -> SdkResult<Vec<String>> {
        let state = self.enter(Method::GetTags)?;
        Ok(state.tags.clone())
    }

    async fn get_token(&self) -> SdkResult<Option<String>> {
        let state = self.enter(Method::GetToken)?;
        Ok(state.token.clone())
    }

    async fn refresh_token(&self) -> SdkResult<()> {
        let mut state = self.enter(Method::RefreshToken)?;
        Self::issue_token(&mut state);
        Ok(())
    }

    async fn are_notifications_enabled(&self) -> SdkResult<bool> {
        let state = self.enter(Method::AreNotificationsEnabled)?;
        Ok(state.notifications_enabled)
    }
}
