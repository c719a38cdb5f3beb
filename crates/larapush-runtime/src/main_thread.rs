//! Dedicated executor standing in for the host main/UI thread
//!
//! Work dispatched here runs serially on one named OS thread. Hosts that
//! expose their own UI loop implement [`TaskDispatcher`](crate::TaskDispatcher)
//! for it instead.

use crate::dispatcher::BoxTask;
use crate::runtime::RuntimeError;
use crate::shutdown::{ShutdownHandle, ShutdownSignal};
use parking_lot::Mutex;
use std::thread::JoinHandle;
use tokio::runtime::{Builder, Handle};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

/// Single-threaded executor on a dedicated OS thread
///
/// Tasks queued before shutdown always run to completion; the thread exits
/// only once the queue is empty and every started task has finished.
pub struct MainThread {
    queue: mpsc::UnboundedSender<BoxTask>,
    shutdown: ShutdownHandle,
    thread: Mutex<Option<JoinHandle<()>>>,
    thread_name: String,
}

impl MainThread {
    /// Start the executor thread
    pub fn spawn(thread_name: impl Into<String>) -> Result<Self, RuntimeError> {
        let thread_name = thread_name.into();
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| RuntimeError::Build(e.to_string()))?;
        let (queue, inbox) = mpsc::unbounded_channel();
        let shutdown = ShutdownHandle::new();
        let signal = shutdown.signal();

        let thread = std::thread::Builder::new()
            .name(thread_name.clone())
            .spawn(move || {
                runtime.block_on(run_queue(inbox, signal));
                tracing::debug!("main-thread executor stopped");
            })
            .map_err(|e| RuntimeError::ThreadSpawn(e.to_string()))?;

        Ok(Self {
            queue,
            shutdown,
            thread: Mutex::new(Some(thread)),
            thread_name,
        })
    }

    /// Queue a task for the executor thread
    ///
    /// After the thread has exited the task goes to the caller's Tokio
    /// runtime if there is one, so replies it carries are still delivered.
    /// Without a runtime it is dropped.
    pub fn submit(&self, task: BoxTask) {
        let Err(mpsc::error::SendError(task)) = self.queue.send(task) else {
            return;
        };
        match Handle::try_current() {
            Ok(current) => {
                tracing::debug!(thread = %self.thread_name, "executor stopped, running task on caller runtime");
                drop(current.spawn(task));
            }
            Err(_) => {
                tracing::warn!(thread = %self.thread_name, "executor stopped, task dropped");
            }
        }
    }

    pub fn thread_name(&self) -> &str {
        &self.thread_name
    }

    /// Check if shutdown has been triggered
    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.is_triggered()
    }

    /// Stop the executor and join its thread
    ///
    /// Blocks until queued and running tasks have finished. Calling this
    /// from the executor thread itself only signals; the thread exits on its
    /// own once drained.
    pub fn shutdown(&self) {
        self.shutdown.trigger();
        let thread = self.thread.lock().take();
        if let Some(thread) = thread {
            if thread.thread().id() == std::thread::current().id() {
                return;
            }
            if thread.join().is_err() {
                tracing::error!("main-thread executor {} panicked", self.thread_name);
            }
        }
    }
}

async fn run_queue(mut inbox: mpsc::UnboundedReceiver<BoxTask>, mut signal: ShutdownSignal) {
    let mut running = JoinSet::new();
    loop {
        tokio::select! {
            task = inbox.recv() => match task {
                Some(task) => {
                    running.spawn(task);
                }
                None => break,
            },
            Some(_) = running.join_next(), if !running.is_empty() => {}
            _ = signal.wait() => break,
        }
    }

    inbox.close();
    while let Some(task) = inbox.recv().await {
        running.spawn(task);
    }
    while running.join_next().await.is_some() {}
}

impl Drop for MainThread {
    fn drop(&mut self) {
        self.shutdown();
    }
}
