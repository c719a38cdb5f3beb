//! Method call and reply envelopes carried on the channel

use larapush_core::{BridgeError, BridgeResult, Reply};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

/// One method invocation: a name plus keyed arguments
///
/// Lives only for the duration of one dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    /// Method name (e.g. "setTags")
    pub method: String,

    /// Arguments keyed by parameter name
    #[serde(default)]
    pub arguments: Map<String, Value>,

    /// Optional call ID for correlating replies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_id: Option<u64>,
}

impl MethodCall {
    /// Create a call with no arguments
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            arguments: Map::new(),
            call_id: None,
        }
    }

    /// Add an argument
    pub fn with_argument(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Set call ID
    pub fn with_call_id(mut self, id: u64) -> Self {
        self.call_id = Some(id);
        self
    }

    /// Build a call from an arbitrary JSON arguments value
    ///
    /// `null` means no arguments; anything other than an object is rejected.
    pub fn from_value(method: impl Into<String>, arguments: Value) -> BridgeResult<Self> {
        let arguments = match arguments {
            Value::Null => Map::new(),
            Value::Object(map) => map,
            other => {
                return Err(BridgeError::InvalidArguments(format!(
                    "arguments must be a map, got {}",
                    json_type_name(&other)
                )));
            }
        };
        Ok(Self {
            method: method.into(),
            arguments,
            call_id: None,
        })
    }

    /// Extract a typed argument
    ///
    /// A missing key or an explicit `null` yields `Ok(None)`. A value of the
    /// wrong type is an [`BridgeError::InvalidArguments`] naming the key.
    pub fn argument<T: DeserializeOwned>(&self, key: &str) -> BridgeResult<Option<T>> {
        match self.arguments.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => T::deserialize(value).map(Some).map_err(|e| {
                BridgeError::InvalidArguments(format!("{key} has the wrong type: {e}"))
            }),
        }
    }

    /// Extract a required argument
    pub fn required<T: DeserializeOwned>(&self, key: &str) -> BridgeResult<T> {
        self.argument(key)?
            .ok_or_else(|| BridgeError::InvalidArguments(format!("{key} is required")))
    }

    /// Serialize to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Deserialize from bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(data)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "map",
    }
}

/// Failure code substituted when an error envelope carries none
const MISSING_CODE: &str = "SERIALIZATION_ERROR";

/// Reply status on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyStatus {
    /// Call completed successfully
    Success,
    /// Call failed with a code
    Error,
    /// Method is not part of the operation table
    NotImplemented,
}

/// Wire form of a [`Reply`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyEnvelope {
    /// Reply status
    pub status: ReplyStatus,

    /// Payload on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,

    /// Failure code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Failure message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Failure details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,

    /// Call ID of the originating call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_id: Option<u64>,
}

impl ReplyEnvelope {
    /// Set call ID for correlation
    pub fn with_call_id(mut self, id: Option<u64>) -> Self {
        self.call_id = id;
        self
    }

    /// Check if this is a success reply
    pub fn is_success(&self) -> bool {
        self.status == ReplyStatus::Success
    }

    /// Convert back into a [`Reply`]
    ///
    /// A success without payload decodes as `null`. An error without a code
    /// cannot be answered faithfully and becomes a `SERIALIZATION_ERROR`
    /// failure, keeping its details.
    pub fn into_reply(self) -> Reply {
        match self.status {
            ReplyStatus::Success => Reply::Success(self.payload.unwrap_or(Value::Null)),
            ReplyStatus::Error => match self.code.filter(|code| !code.is_empty()) {
                Some(code) => Reply::Failure {
                    code,
                    message: self.message,
                    details: self.details,
                },
                None => Reply::Failure {
                    code: MISSING_CODE.to_string(),
                    message: Some("error reply has no code".to_string()),
                    details: self.details,
                },
            },
            ReplyStatus::NotImplemented => Reply::NotImplemented,
        }
    }

    /// Serialize to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Deserialize from bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(data)
    }
}

impl From<Reply> for ReplyEnvelope {
    fn from(reply: Reply) -> Self {
        let empty = Self {
            status: ReplyStatus::Success,
            payload: None,
            code: None,
            message: None,
            details: None,
            call_id: None,
        };
        match reply {
            Reply::Success(payload) => Self {
                payload: Some(payload),
                ..empty
            },
            Reply::Failure {
                code,
                message,
                details,
            } => Self {
                status: ReplyStatus::Error,
                code: Some(code),
                message,
                details,
                ..empty
            },
            Reply::NotImplemented => Self {
                status: ReplyStatus::NotImplemented,
                ..empty
            },
        }
    }
}

impl From<ReplyEnvelope> for Reply {
    fn from(envelope: ReplyEnvelope) -> Self {
        envelope.into_reply()
    }
}
