use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, ThreadId};

use tokio::sync::mpsc;
use tracing::{error, warn};

/// A unit of work handed to a [`Dispatcher`].
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// An execution context that completions can be scheduled onto.
pub trait Dispatcher: Send + Sync + 'static {
    /// Schedules `job` to run on this context. Must not run it inline.
    fn dispatch(&self, job: Job);
}

/// Runs jobs on the blocking pool of the given runtime.
impl Dispatcher for tokio::runtime::Handle {
    fn dispatch(&self, job: Job) {
        // detached; the job reports its own outcome
        drop(self.spawn_blocking(job));
    }
}

/// A dedicated named thread that runs jobs one at a time, in order.
///
/// This is the analogue of a main or UI queue: every completion routed
/// through it observes the same thread. The thread exits once the
/// dispatcher is dropped and the queued jobs have run.
#[derive(Debug)]
pub struct ThreadDispatcher {
    name: String,
    thread_id: ThreadId,
    sender: mpsc::UnboundedSender<Job>,
}

impl ThreadDispatcher {
    /// Spawns the worker thread.
    pub fn new(name: impl Into<String>) -> std::io::Result<Self> {
        let name = name.into();
        let (sender, mut receiver) = mpsc::unbounded_channel::<Job>();

        let handle = thread::Builder::new().name(name.clone()).spawn(move || {
            while let Some(job) = receiver.blocking_recv() {
                if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
                    error!("Dispatched job panicked");
                }
            }
        })?;

        Ok(Self {
            name,
            thread_id: handle.thread().id(),
            sender,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the id of the thread jobs run on.
    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }
}

impl Dispatcher for ThreadDispatcher {
    fn dispatch(&self, job: Job) {
        if self.sender.send(job).is_err() {
            warn!(queue = %self.name, "Dispatcher thread is gone, dropping job");
        }
    }
}
