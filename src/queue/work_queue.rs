//! Unbounded work queue drained by a fixed pool of consumer threads.
//!
//! Lifecycle: [`WorkQueue::start`] spawns the consumers, the producer calls
//! [`WorkQueue::enqueue`] for every item, then [`WorkQueue::signal_draining`]
//! exactly once, then [`WorkQueue::await_drain`].
//!
//! Signalling drops the only sender, so the channel reports disconnection to
//! a consumer only once it is empty. A consumer asks for the next item only
//! after it has finished and marked done the previous one, so no consumer
//! exits while holding an item.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use log::{debug, error, warn};
use parking_lot::{Condvar, Mutex};
use serde::{Deserialize, Serialize};

use super::config::QueueConfig;
use crate::error::{Result, WikiRaiderError};

/// Work done by a consumer for one item.
///
/// An `Err` or a panic is logged and counted; the item is still marked done
/// and the consumer keeps running.
pub trait ItemProcessor<T>: Send + Sync {
    /// Process one item.
    fn process(&self, item: T) -> Result<()>;
}

/// Counters of a work queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStats {
    /// Items accepted by `enqueue`.
    pub enqueued: u64,

    /// Items processed without error.
    pub processed: u64,

    /// Items whose processing returned an error or panicked.
    pub failed: u64,
}

/// State shared between the producer and the consumers.
#[derive(Debug, Default)]
struct QueueState {
    /// Set once, when the producer has enqueued its last item.
    finishing: AtomicBool,

    /// Set once, after every item is done and every consumer has exited.
    finished: AtomicBool,

    /// Set when the queue is dropped without a drain; remaining items are
    /// marked done without being processed.
    abandoned: AtomicBool,

    /// Items enqueued but not yet marked done.
    outstanding: Mutex<u64>,
    all_done: Condvar,

    enqueued: AtomicU64,
    processed: AtomicU64,
    failed: AtomicU64,
}

impl QueueState {
    fn mark_done(&self) {
        let mut outstanding = self.outstanding.lock();
        *outstanding = outstanding.saturating_sub(1);
        if *outstanding == 0 {
            self.all_done.notify_all();
        }
    }
}

/// Bounded-concurrency work distribution with a two-phase shutdown.
pub struct WorkQueue<T: Send + 'static> {
    config: QueueConfig,
    sender: Mutex<Option<Sender<T>>>,
    state: Arc<QueueState>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl<T: Send + 'static> WorkQueue<T> {
    /// Spawn `config.consumer_amount` consumers running `processor`.
    pub fn start<P>(config: QueueConfig, processor: Arc<P>) -> Result<Self>
    where
        P: ItemProcessor<T> + 'static,
    {
        config.validate()?;

        let (sender, receiver) = unbounded();
        let state = Arc::new(QueueState::default());
        let processor: Arc<dyn ItemProcessor<T>> = processor;

        let mut workers = Vec::with_capacity(config.consumer_amount);
        for consumer_id in 0..config.consumer_amount {
            let worker = spawn_consumer(
                consumer_id,
                receiver.clone(),
                Arc::clone(&processor),
                Arc::clone(&state),
                config.idle_timeout,
            )?;
            workers.push(worker);
        }

        Ok(Self {
            config,
            sender: Mutex::new(Some(sender)),
            state,
            workers: Mutex::new(workers),
        })
    }

    /// Append an item. Never blocks; there is no capacity limit.
    pub fn enqueue(&self, item: T) -> Result<()> {
        let sender = self.sender.lock();
        let Some(sender) = sender.as_ref() else {
            return Err(WikiRaiderError::invalid_operation(
                "cannot enqueue after draining was signalled",
            ));
        };

        *self.state.outstanding.lock() += 1;
        if sender.send(item).is_err() {
            self.state.mark_done();
            return Err(WikiRaiderError::invalid_operation(
                "every consumer of the work queue has exited",
            ));
        }
        self.state.enqueued.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Announce that no more items will be enqueued.
    ///
    /// Consumers that find the queue empty from now on exit instead of
    /// waiting. May only be called once.
    pub fn signal_draining(&self) -> Result<()> {
        let mut sender = self.sender.lock();
        if self.state.finishing.swap(true, Ordering::AcqRel) {
            return Err(WikiRaiderError::invalid_operation(
                "draining was already signalled",
            ));
        }
        sender.take();
        Ok(())
    }

    /// Block until every enqueued item is done and every consumer has exited.
    pub fn await_drain(&self) -> Result<()> {
        if !self.state.finishing.load(Ordering::Acquire) {
            return Err(WikiRaiderError::invalid_operation(
                "await_drain requires signal_draining first",
            ));
        }

        {
            let mut outstanding = self.state.outstanding.lock();
            while *outstanding > 0 {
                self.state.all_done.wait(&mut outstanding);
            }
        }

        let workers = std::mem::take(&mut *self.workers.lock());
        let mut panicked = 0;
        for worker in workers {
            if worker.join().is_err() {
                panicked += 1;
            }
        }
        if panicked > 0 {
            return Err(WikiRaiderError::ThreadJoin(format!(
                "{panicked} consumer thread(s) panicked"
            )));
        }

        self.state.finished.store(true, Ordering::Release);
        Ok(())
    }

    /// Whether `signal_draining` has been called.
    pub fn is_finishing(&self) -> bool {
        self.state.finishing.load(Ordering::Acquire)
    }

    /// Whether `await_drain` has completed.
    pub fn is_finished(&self) -> bool {
        self.state.finished.load(Ordering::Acquire)
    }

    /// Items enqueued but not yet marked done.
    pub fn pending(&self) -> u64 {
        *self.state.outstanding.lock()
    }

    /// Number of consumer threads.
    pub fn consumer_amount(&self) -> usize {
        self.config.consumer_amount
    }

    /// Snapshot of the counters.
    pub fn stats(&self) -> QueueStats {
        QueueStats {
            enqueued: self.state.enqueued.load(Ordering::Relaxed),
            processed: self.state.processed.load(Ordering::Relaxed),
            failed: self.state.failed.load(Ordering::Relaxed),
        }
    }
}

impl<T: Send + 'static> Drop for WorkQueue<T> {
    fn drop(&mut self) {
        if self.is_finished() {
            return;
        }
        let workers = std::mem::take(&mut *self.workers.lock());
        if workers.is_empty() {
            return;
        }

        warn!("Work queue dropped before draining; discarding remaining items");
        self.state.abandoned.store(true, Ordering::Release);
        self.sender.lock().take();
        for worker in workers {
            let _ = worker.join();
        }
    }
}

fn spawn_consumer<T: Send + 'static>(
    consumer_id: usize,
    receiver: Receiver<T>,
    processor: Arc<dyn ItemProcessor<T>>,
    state: Arc<QueueState>,
    idle_timeout: Duration,
) -> Result<JoinHandle<()>> {
    let handle = thread::Builder::new()
        .name(format!("consumer-{consumer_id}"))
        .spawn(move || {
            debug!("Consumer #{consumer_id} started");
            loop {
                match receiver.recv_timeout(idle_timeout) {
                    Ok(item) => {
                        if !state.abandoned.load(Ordering::Acquire) {
                            run_item(consumer_id, item, processor.as_ref(), &state);
                        }
                        state.mark_done();
                    }
                    Err(RecvTimeoutError::Timeout) => {
                        debug!("Consumer #{consumer_id} is idle. Will resume when new items are queued.");
                    }
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            debug!("Consumer #{consumer_id} exited");
        })?;

    Ok(handle)
}

fn run_item<T>(consumer_id: usize, item: T, processor: &dyn ItemProcessor<T>, state: &QueueState) {
    match panic::catch_unwind(AssertUnwindSafe(|| processor.process(item))) {
        Ok(Ok(())) => {
            state.processed.fetch_add(1, Ordering::Relaxed);
        }
        Ok(Err(e)) => {
            state.failed.fetch_add(1, Ordering::Relaxed);
            error!("Consumer #{consumer_id}: exception occurred while parsing page. {e}");
        }
        Err(payload) => {
            state.failed.fetch_add(1, Ordering::Relaxed);
            error!(
                "Consumer #{consumer_id}: page processing panicked: {}",
                panic_message(payload.as_ref())
            );
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
