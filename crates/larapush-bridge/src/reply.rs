//! Exactly-once reply delivery

use larapush_core::Reply;
use tokio::sync::oneshot;

/// Failure code sent when a sink is dropped without an explicit reply
pub const REPLY_DROPPED: &str = "REPLY_DROPPED";

enum Target {
    Channel(oneshot::Sender<Reply>),
    Callback(Box<dyn FnOnce(Reply) + Send + 'static>),
}

impl Target {
    fn deliver(self, reply: Reply) {
        match self {
            Target::Channel(sender) => {
                if sender.send(reply).is_err() {
                    tracing::trace!("caller stopped waiting for reply");
                }
            }
            Target::Callback(callback) => callback(reply),
        }
    }
}

/// One-shot reply slot for a single dispatched call
///
/// Every reply method consumes the sink, so a second reply cannot be
/// written. A sink dropped without replying (its task was torn down, or a
/// dispatcher refused the work) delivers a `REPLY_DROPPED` failure instead,
/// so the caller always hears back exactly once.
pub struct ReplySink {
    target: Option<Target>,
    method: String,
}

impl ReplySink {
    /// Create a sink paired with a receiver the caller can await
    pub fn channel(method: impl Into<String>) -> (Self, ReplyReceiver) {
        let (sender, receiver) = oneshot::channel();
        let sink = Self {
            target: Some(Target::Channel(sender)),
            method: method.into(),
        };
        (sink, ReplyReceiver { receiver })
    }

    /// Create a sink that hands the reply to a host callback
    pub fn from_fn<F>(method: impl Into<String>, callback: F) -> Self
    where
        F: FnOnce(Reply) + Send + 'static,
    {
        Self {
            target: Some(Target::Callback(Box::new(callback))),
            method: method.into(),
        }
    }

    /// Method name this sink replies for
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Deliver the reply
    pub fn send(mut self, reply: Reply) {
        if let Some(target) = self.target.take() {
            target.deliver(reply);
        }
    }

    pub fn success(self, payload: serde_json::Value) {
        self.send(Reply::Success(payload));
    }

    pub fn failure(self, code: impl Into<String>, message: Option<String>) {
        self.send(Reply::failure(code, message));
    }

    pub fn not_implemented(self) {
        self.send(Reply::NotImplemented);
    }
}

impl Drop for ReplySink {
    fn drop(&mut self) {
        if let Some(target) = self.target.take() {
            tracing::warn!(method = %self.method, "reply dropped before completion");
            target.deliver(Reply::failure(
                REPLY_DROPPED,
                Some(format!("{} was dropped before it replied", self.method)),
            ));
        }
    }
}

impl std::fmt::Debug for ReplySink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplySink")
            .field("method", &self.method)
            .field("pending", &self.target.is_some())
            .finish()
    }
}

/// Caller side of a [`ReplySink::channel`]
#[derive(Debug)]
pub struct ReplyReceiver {
    receiver: oneshot::Receiver<Reply>,
}

impl ReplyReceiver {
    /// Wait for the reply
    pub async fn recv(self) -> Reply {
        self.receiver.await.unwrap_or_else(|_| {
            Reply::failure(REPLY_DROPPED, Some("reply sink vanished".to_string()))
        })
    }
}
