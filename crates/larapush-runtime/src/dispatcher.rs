//! Seam between the bridge and whatever executes its work

use crate::main_thread::MainThread;
use crate::runtime::AsyncRuntime;
use std::future::Future;
use std::pin::Pin;

/// A unit of bridge work: runs one call and delivers its reply
pub type BoxTask = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Something that can run bridge work
///
/// The bridge never awaits the task it hands over; the task itself is
/// responsible for replying. A dispatcher that drops a task (for example
/// because it is shutting down) is fine: the task's reply sink reports the
/// drop.
pub trait TaskDispatcher: Send + Sync + 'static {
    /// Hand a task over for execution
    fn dispatch(&self, task: BoxTask);

    /// Short name used in logs
    fn label(&self) -> &str {
        "dispatcher"
    }
}

impl TaskDispatcher for tokio::runtime::Handle {
    fn dispatch(&self, task: BoxTask) {
        drop(self.spawn(task));
    }

    fn label(&self) -> &str {
        "tokio"
    }
}

impl TaskDispatcher for AsyncRuntime {
    fn dispatch(&self, task: BoxTask) {
        drop(self.handle().spawn(task));
    }

    fn label(&self) -> &str {
        &self.config().thread_name
    }
}

impl TaskDispatcher for MainThread {
    fn dispatch(&self, task: BoxTask) {
        self.submit(task);
    }

    fn label(&self) -> &str {
        self.thread_name()
    }
}
