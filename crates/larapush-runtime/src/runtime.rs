//! Worker runtime for SDK calls

use crate::shutdown::{ShutdownHandle, ShutdownSignal};
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::{Builder, Handle, Runtime};

/// Errors raised while building or tearing down executors
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("failed to create runtime: {0}")]
    Build(String),

    #[error("failed to spawn executor thread: {0}")]
    ThreadSpawn(String),
}

/// Sizing of the worker runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Worker thread count; `None` uses one per core
    pub worker_threads: Option<usize>,
    pub thread_name: String,
    /// How long calls still running at shutdown may take to finish
    pub drain_timeout: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            worker_threads: None,
            thread_name: "larapush-worker".to_string(),
            drain_timeout: Duration::from_millis(250),
        }
    }
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero is raised to one thread
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = Some(threads.max(1));
        self
    }

    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    pub fn with_drain_timeout(mut self, timeout: Duration) -> Self {
        self.drain_timeout = timeout;
        self
    }
}

/// Multi-threaded Tokio runtime the bridge owns when the host has none
///
/// Hosts already running Tokio hand the bridge their
/// [`Handle`](tokio::runtime::Handle) instead.
pub struct AsyncRuntime {
    runtime: Option<Runtime>,
    handle: Handle,
    shutdown: ShutdownHandle,
    config: RuntimeConfig,
}

impl AsyncRuntime {
    pub fn new(config: RuntimeConfig) -> Result<Self, RuntimeError> {
        let mut builder = Builder::new_multi_thread();
        builder.thread_name(config.thread_name.clone()).enable_all();
        if let Some(threads) = config.worker_threads {
            builder.worker_threads(threads);
        }
        let runtime = builder
            .build()
            .map_err(|e| RuntimeError::Build(e.to_string()))?;

        tracing::debug!(
            thread_name = %config.thread_name,
            worker_threads = ?config.worker_threads,
            "worker runtime started"
        );

        Ok(Self {
            handle: runtime.handle().clone(),
            runtime: Some(runtime),
            shutdown: ShutdownHandle::new(),
            config,
        })
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Completes once [`shutdown`](Self::shutdown) runs or the runtime is dropped
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.is_triggered()
    }

    /// Stop the runtime, letting running calls finish within the drain timeout
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.shutdown.trigger();
        let Some(runtime) = self.runtime.take() else {
            return;
        };
        // Blocking on the drain is not allowed from inside another runtime
        if Handle::try_current().is_ok() {
            tracing::debug!(thread_name = %self.config.thread_name, "worker runtime detached");
            runtime.shutdown_background();
        } else {
            runtime.shutdown_timeout(self.config.drain_timeout);
            tracing::debug!(thread_name = %self.config.thread_name, "worker runtime drained");
        }
    }
}

impl Drop for AsyncRuntime {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for AsyncRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncRuntime")
            .field("config", &self.config)
            .field("shutting_down", &self.is_shutting_down())
            .finish()
    }
}
