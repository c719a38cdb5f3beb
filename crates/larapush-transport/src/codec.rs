//! Byte framing for channel envelopes
//!
//! A channel moves opaque frames. The codec turns [`MethodCall`]s and
//! [`ReplyEnvelope`]s into frames and back, rejecting frames that parse but
//! cannot be a valid envelope.

use crate::envelope::{MethodCall, ReplyEnvelope, ReplyStatus};
use larapush_core::BridgeError;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Why a frame could not be produced or read
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("failed to encode frame: {0}")]
    Encode(String),

    #[error("failed to decode frame: {0}")]
    Decode(String),

    #[error("empty frame")]
    EmptyFrame,

    #[error("call frame has no method name")]
    MissingMethod,

    #[error("error reply frame has no code")]
    MissingCode,
}

impl From<CodecError> for BridgeError {
    fn from(err: CodecError) -> Self {
        BridgeError::Serialization(err.to_string())
    }
}

/// Frame format for one channel
pub trait Codec: Send + Sync {
    /// MIME type of the frames
    fn content_type(&self) -> &'static str;

    fn encode_call(&self, call: &MethodCall) -> Result<Vec<u8>, CodecError>;

    /// Read a call frame; the method name must not be empty
    fn decode_call(&self, data: &[u8]) -> Result<MethodCall, CodecError>;

    fn encode_reply(&self, reply: &ReplyEnvelope) -> Result<Vec<u8>, CodecError>;

    /// Read a reply frame; an error reply must carry a code
    fn decode_reply(&self, data: &[u8]) -> Result<ReplyEnvelope, CodecError>;
}

/// JSON frames via serde_json
#[derive(Debug, Clone, Default)]
pub struct JsonCodec {
    pretty: bool,
}

impl JsonCodec {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Indented output, for logs and fixtures
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    fn write<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        let result = if self.pretty {
            serde_json::to_vec_pretty(value)
        } else {
            serde_json::to_vec(value)
        };
        result.map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn read<T: DeserializeOwned>(data: &[u8]) -> Result<T, CodecError> {
        if data.iter().all(u8::is_ascii_whitespace) {
            return Err(CodecError::EmptyFrame);
        }
        serde_json::from_slice(data).map_err(|e| CodecError::Decode(e.to_string()))
    }
}

impl Codec for JsonCodec {
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn encode_call(&self, call: &MethodCall) -> Result<Vec<u8>, CodecError> {
        self.write(call)
    }

    fn decode_call(&self, data: &[u8]) -> Result<MethodCall, CodecError> {
        let call: MethodCall = Self::read(data)?;
        if call.method.is_empty() {
            return Err(CodecError::MissingMethod);
        }
        Ok(call)
    }

    fn encode_reply(&self, reply: &ReplyEnvelope) -> Result<Vec<u8>, CodecError> {
        self.write(reply)
    }

    fn decode_reply(&self, data: &[u8]) -> Result<ReplyEnvelope, CodecError> {
        let reply: ReplyEnvelope = Self::read(data)?;
        if reply.status == ReplyStatus::Error && reply.code.as_deref().is_none_or(str::is_empty) {
            return Err(CodecError::MissingCode);
        }
        Ok(reply)
    }
}
