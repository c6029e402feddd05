// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use parking_lot::Mutex;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread::JoinHandle;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Returned when work is submitted after [`FixedThreadPool::shutdown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolClosedError;

impl std::fmt::Display for PoolClosedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "thread pool is shut down and no longer accepts work")
    }
}

impl std::error::Error for PoolClosedError {}

/// Fixed-size pool of named worker threads fed from a shared job queue.
///
/// Shutdown is explicit: intake closes immediately, already queued jobs
/// still run to completion and the workers are joined. A panicking job is
/// caught and logged; it never takes a worker thread down with it.
pub struct FixedThreadPool {
    sender: Option<Sender<Job>>,
    handles: Vec<JoinHandle<()>>,
}

impl FixedThreadPool {
    pub fn new(workers: usize) -> Self {
        let workers = workers.max(1);
        let (sender, receiver) = channel::<Job>();
        let receiver = Arc::new(Mutex::new(receiver));

        let mut handles = Vec::with_capacity(workers);
        for worker_id in 0..workers {
            let receiver = Arc::clone(&receiver);
            let handle = std::thread::Builder::new()
                .name(format!("work-unit-{worker_id}"))
                .spawn(move || Self::worker_loop(worker_id, &receiver))
                .expect("failed to spawn work-unit thread");
            handles.push(handle);
        }

        Self {
            sender: Some(sender),
            handles,
        }
    }

    fn worker_loop(worker_id: usize, receiver: &Mutex<Receiver<Job>>) {
        loop {
            // The guard must be released before the job runs.
            let job = { receiver.lock().recv() };
            match job {
                Ok(job) => {
                    if catch_unwind(AssertUnwindSafe(job)).is_err() {
                        tracing::error!(worker_id, "work unit panicked, worker continues");
                    }
                }
                Err(_) => break,
            }
        }
    }

    #[inline]
    pub fn workers(&self) -> usize {
        self.handles.len()
    }

    pub fn submit<F>(&self, job: F) -> Result<(), PoolClosedError>
    where
        F: FnOnce() + Send + 'static,
    {
        match &self.sender {
            Some(sender) => sender.send(Box::new(job)).map_err(|_| PoolClosedError),
            None => Err(PoolClosedError),
        }
    }

    /// Stops accepting submissions, drains queued jobs and joins all
    /// workers. Idempotent.
    pub fn shutdown(&mut self) {
        self.sender.take();
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}

impl Drop for FixedThreadPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}
