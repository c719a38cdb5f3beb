//! Reply model shared by every dialect

use serde_json::Value;

/// Outcome of one dispatched call
///
/// Exactly one `Reply` is produced per call.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Call succeeded with a payload
    Success(Value),
    /// Call failed with a documented code
    Failure {
        code: String,
        message: Option<String>,
        details: Option<Value>,
    },
    /// Method name is not part of the operation table
    NotImplemented,
}

impl Reply {
    /// Create a success reply
    pub fn success(payload: impl Into<Value>) -> Self {
        Reply::Success(payload.into())
    }

    /// Create a failure reply without details
    pub fn failure(code: impl Into<String>, message: Option<String>) -> Self {
        Reply::Failure {
            code: code.into(),
            message,
            details: None,
        }
    }

    /// Check if this is a success reply
    pub fn is_success(&self) -> bool {
        matches!(self, Reply::Success(_))
    }

    /// Get the payload if this is a success reply
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Reply::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Get the failure code if this is a failure reply
    pub fn failure_code(&self) -> Option<&str> {
        match self {
            Reply::Failure { code, .. } => Some(code),
            _ => None,
        }
    }
}
