//! Panic handling at the SDK boundary
//!
//! SDK calls run in their own task so a panic unwinds into a
//! [`JoinError`](tokio::task::JoinError) instead of the host's thread. These
//! helpers turn that into a reply message.

use std::any::Any;
use tokio::task::JoinError;

/// Convert a panic payload to a human-readable string
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("LaraPush SDK panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("LaraPush SDK panicked: {s}")
    } else {
        "LaraPush SDK panicked with unknown payload".to_string()
    }
}

/// Describe why a spawned SDK task did not produce a value
pub(crate) fn join_error_message(err: JoinError) -> String {
    if err.is_panic() {
        let payload = err.into_panic();
        panic_message(payload.as_ref())
    } else {
        "LaraPush SDK call was cancelled".to_string()
    }
}
