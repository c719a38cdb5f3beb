//! Stop flag shared between an executor and the work it runs
//!
//! The flag is sticky: a [`ShutdownSignal`] taken after the trigger still
//! sees it, and a signal whose [`ShutdownHandle`] is gone counts as stopped.

use std::sync::Arc;
use tokio::sync::watch;

/// Owner side of the stop flag
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    sender: Arc<watch::Sender<bool>>,
}

impl ShutdownHandle {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Raise the flag
    ///
    /// Returns `true` only for the call that actually raised it.
    pub fn trigger(&self) -> bool {
        self.sender
            .send_if_modified(|stopped| !std::mem::replace(stopped, true))
    }

    pub fn is_triggered(&self) -> bool {
        *self.sender.borrow()
    }

    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            receiver: self.sender.subscribe(),
        }
    }
}

impl Default for ShutdownHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Observer side of the stop flag
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    receiver: watch::Receiver<bool>,
}

impl ShutdownSignal {
    pub fn is_triggered(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolve once the flag is raised or the handle is dropped
    pub async fn wait(&mut self) {
        if self.receiver.wait_for(|stopped| *stopped).await.is_err() {
            tracing::trace!("shutdown handle dropped");
        }
    }
}
