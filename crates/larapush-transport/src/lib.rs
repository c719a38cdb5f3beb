//! larapush-transport - Channel envelopes and JSON codec
//!
//! This crate provides:
//! - [`MethodCall`] envelope with typed argument extraction
//! - [`ReplyEnvelope`] wire shape for replies
//! - [`Codec`] trait and [`JsonCodec`] implementation for byte channels

mod codec;
mod envelope;

pub use codec::{Codec, CodecError, JsonCodec};
pub use envelope::{MethodCall, ReplyEnvelope, ReplyStatus};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{Codec, CodecError, JsonCodec, MethodCall, ReplyEnvelope, ReplyStatus};
}
