//! Seam between the client facade and a channel

use async_trait::async_trait;
use larapush_bridge::{Channel, ChannelError};
use larapush_core::Reply;
use larapush_transport::MethodCall;
use std::sync::Arc;

/// Anything that can carry one method call and bring back its reply
#[async_trait]
pub trait Transport: Send + Sync {
    async fn invoke(&self, call: MethodCall) -> Result<Reply, ChannelError>;
}

#[async_trait]
impl Transport for Channel {
    async fn invoke(&self, call: MethodCall) -> Result<Reply, ChannelError> {
        Channel::invoke(self, call).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn invoke(&self, call: MethodCall) -> Result<Reply, ChannelError> {
        (**self).invoke(call).await
    }
}
