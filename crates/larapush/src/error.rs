//! Errors seen by client code

use larapush_bridge::ChannelError;
use serde_json::Value;
use thiserror::Error;

/// Result type for facade operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Why a facade call did not produce a value
#[derive(Error, Debug)]
pub enum ClientError {
    /// The bridge replied with a failure
    #[error("{code}: {}", .message.as_deref().unwrap_or("no message"))]
    Failed {
        code: String,
        message: Option<String>,
        details: Option<Value>,
    },

    /// The native side does not know the method
    #[error("{method} is not implemented by the native side")]
    NotImplemented { method: String },

    /// The call never reached a handler
    #[error(transparent)]
    Channel(#[from] ChannelError),

    /// The success payload did not have the expected shape
    #[error("unexpected payload: {0}")]
    UnexpectedPayload(String),
}

impl ClientError {
    /// Failure code, if the bridge sent one
    pub fn code(&self) -> Option<&str> {
        match self {
            ClientError::Failed { code, .. } => Some(code),
            _ => None,
        }
    }
}
