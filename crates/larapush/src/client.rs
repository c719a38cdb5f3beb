//! Client facade over a bridge channel

use crate::error::{ClientError, ClientResult};
use crate::transport::Transport;
use larapush_bridge::{Channel, ChannelRegistry};
use larapush_core::{Method, Reply};
use larapush_transport::MethodCall;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;

/// Typed client for the LaraPush operations
///
/// Arguments are forwarded as given; validation happens on the native side.
/// Each method resolves with the decoded success payload or rejects with the
/// failure code and message.
pub struct LaraPush<T> {
    transport: T,
}

impl LaraPush<Channel> {
    /// Client for the channel registered as `name`
    pub fn connect(registry: Arc<ChannelRegistry>, name: impl Into<String>) -> Self {
        Self::new(Channel::new(registry, name))
    }
}

impl<T: Transport> LaraPush<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn initialize(
        &self,
        panel_url: impl Into<String>,
        application_id: impl Into<String>,
        debug: bool,
    ) -> ClientResult<bool> {
        let call = MethodCall::new(Method::Initialize.name())
            .with_argument("panelUrl", panel_url.into())
            .with_argument("applicationId", application_id.into())
            .with_argument("debug", debug);
        self.call(call).await
    }

    /// Add tags, in the order given
    pub async fn set_tags<I, S>(&self, tags: I) -> ClientResult<bool>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.call(tag_call(Method::SetTags, tags)).await
    }

    pub async fn remove_tags<I, S>(&self, tags: I) -> ClientResult<bool>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.call(tag_call(Method::RemoveTags, tags)).await
    }

    pub async fn clear_tags(&self) -> ClientResult<bool> {
        self.call(MethodCall::new(Method::ClearTags.name())).await
    }

    pub async fn get_tags(&self) -> ClientResult<Vec<String>> {
        self.call(MethodCall::new(Method::GetTags.name())).await
    }

    /// Current push token; `None` until the SDK has issued one
    pub async fn get_token(&self) -> ClientResult<Option<String>> {
        self.call(MethodCall::new(Method::GetToken.name())).await
    }

    pub async fn refresh_token(&self) -> ClientResult<bool> {
        self.call(MethodCall::new(Method::RefreshToken.name())).await
    }

    pub async fn are_notifications_enabled(&self) -> ClientResult<bool> {
        self.call(MethodCall::new(Method::AreNotificationsEnabled.name()))
            .await
    }

    async fn call<R: DeserializeOwned>(&self, call: MethodCall) -> ClientResult<R> {
        let method = call.method.clone();
        tracing::trace!(method = %method, "client call");

        match self.transport.invoke(call).await? {
            Reply::Success(payload) => serde_json::from_value(payload)
                .map_err(|e| ClientError::UnexpectedPayload(format!("{method}: {e}"))),
            Reply::Failure {
                code,
                message,
                details,
            } => Err(ClientError::Failed {
                code,
                message,
                details,
            }),
            Reply::NotImplemented => Err(ClientError::NotImplemented { method }),
        }
    }
}

fn tag_call<I, S>(method: Method, tags: I) -> MethodCall
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
    MethodCall::new(method.name()).with_argument("tags", json!(tags))
}
