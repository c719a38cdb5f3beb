//! larapush-runtime - Executors for bridge calls
//!
//! This crate provides:
//! - [`AsyncRuntime`] worker runtime for hosts without their own Tokio runtime
//! - [`MainThread`] dedicated executor standing in for the host UI thread
//! - [`TaskDispatcher`] seam through which the bridge hands work to either
//! - Shutdown signalling used when the bridge detaches

mod dispatcher;
mod main_thread;
mod runtime;
mod shutdown;

pub use dispatcher::{BoxTask, TaskDispatcher};
pub use main_thread::MainThread;
pub use runtime::{AsyncRuntime, RuntimeConfig, RuntimeError};
pub use shutdown::{ShutdownHandle, ShutdownSignal};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AsyncRuntime, BoxTask, MainThread, RuntimeConfig, RuntimeError, ShutdownHandle,
        ShutdownSignal, TaskDispatcher,
    };
}
