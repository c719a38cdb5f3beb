//! Error types for the LaraPush bridge

use crate::method::{Dialect, Method};
use thiserror::Error;

/// Result type alias for bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Result type alias for SDK calls
pub type SdkResult<T> = Result<T, SdkError>;

/// Error raised by the external push SDK
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SdkError {
    /// The SDK singleton was used before `init`
    #[error("LaraPush is not initialized")]
    NotInitialized,

    /// Any other SDK failure; the message may be absent
    #[error("{}", .0.as_deref().unwrap_or("LaraPush SDK failure"))]
    Failed(Option<String>),
}

impl SdkError {
    /// Create a failure carrying a message
    pub fn failed(message: impl Into<String>) -> Self {
        SdkError::Failed(Some(message.into()))
    }

    /// Message forwarded to the channel reply
    pub fn message(&self) -> Option<String> {
        match self {
            SdkError::NotInitialized => Some(self.to_string()),
            SdkError::Failed(message) => message.clone(),
        }
    }
}

/// Error type for bridge operations
#[derive(Error, Debug)]
pub enum BridgeError {
    /// A required argument was missing or had the wrong type
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// No host context was available when the call arrived
    #[error("context unavailable: {0}")]
    ContextUnavailable(String),

    /// The external SDK raised during a known operation
    #[error("{method} failed: {}", .message.as_deref().unwrap_or("no message"))]
    Sdk {
        method: Method,
        message: Option<String>,
    },

    /// The method name is not part of the operation table
    #[error("method not implemented: {0}")]
    NotImplemented(String),

    /// The adapter has been detached from its channel
    #[error("channel detached")]
    Detached,

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl BridgeError {
    /// Wrap an SDK error raised during `method`
    pub fn sdk(method: Method, err: SdkError) -> Self {
        BridgeError::Sdk {
            method,
            message: err.message(),
        }
    }

    /// Failure code for the channel reply
    ///
    /// Returns `None` for [`BridgeError::NotImplemented`], which is reported
    /// through the channel's dedicated not-implemented signal instead.
    pub fn code(&self, dialect: Dialect) -> Option<&'static str> {
        match self {
            BridgeError::InvalidArguments(_) => Some("INVALID_ARGUMENTS"),
            BridgeError::ContextUnavailable(_) => Some("CONTEXT_ERROR"),
            BridgeError::Sdk { method, .. } => Some(method.failure_code(dialect)),
            BridgeError::NotImplemented(_) => None,
            BridgeError::Detached => Some("CHANNEL_DETACHED"),
            BridgeError::Serialization(_) => Some("SERIALIZATION_ERROR"),
        }
    }

    /// Message for the channel reply
    ///
    /// SDK failures forward the SDK's own message untouched, which may be absent.
    pub fn reply_message(&self) -> Option<String> {
        match self {
            BridgeError::InvalidArguments(msg)
            | BridgeError::ContextUnavailable(msg)
            | BridgeError::Serialization(msg) => Some(msg.clone()),
            BridgeError::Sdk { message, .. } => message.clone(),
            BridgeError::NotImplemented(_) | BridgeError::Detached => Some(self.to_string()),
        }
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::Serialization(err.to_string())
    }
}
