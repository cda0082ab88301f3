//! # Chatbox Reply Scheduling
//!
//! File: cli/src/widget/scheduler.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The chat handler never sleeps. It hands a one-shot callback to a
//! `Scheduler` and returns immediately; the scheduler runs the callback once
//! the delay has elapsed. Two implementations are provided:
//!
//! - `TokioScheduler`: spawns a task on the current tokio runtime that sleeps,
//!   then fires. Used by the interactive `chat` command.
//! - `ManualScheduler`: a virtual clock advanced explicitly. Used for headless
//!   rendering (`page`) and for deterministic tests.
//!
//! ## Cancellation
//!
//! Every scheduled callback lives in a slot shared between the returned
//! `ScheduledTask` and the scheduler. Firing and cancelling both *take* the
//! callback out of the slot, so exactly one of them wins: a cancelled callback
//! never runs, and a callback that already ran cannot be cancelled.
//!
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tracing::trace;

/// A one-shot piece of work run by a scheduler.
pub type Callback = Box<dyn FnOnce() + Send + 'static>;

type Slot = Arc<Mutex<Option<Callback>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A panicking callback must not wedge every later submission.
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Runs the callback held by `slot`, unless it was cancelled or already fired.
fn fire(slot: &Slot) -> bool {
    let callback = lock(slot).take();
    match callback {
        Some(callback) => {
            callback();
            true
        }
        None => false,
    }
}

/// Handle to a scheduled callback.
pub struct ScheduledTask {
    slot: Slot,
    timer: Option<AbortHandle>,
}

impl ScheduledTask {
    fn new(callback: Callback) -> (Self, Slot) {
        let slot: Slot = Arc::new(Mutex::new(Some(callback)));
        let task = Self {
            slot: Arc::clone(&slot),
            timer: None,
        };
        (task, slot)
    }

    /// `true` while the callback has neither fired nor been cancelled.
    pub fn is_pending(&self) -> bool {
        lock(&self.slot).is_some()
    }

    /// Cancels the callback. Returns `true` if it had not run yet, in which
    /// case it never will.
    pub fn cancel(self) -> bool {
        let cancelled = lock(&self.slot).take().is_some();
        if let Some(timer) = &self.timer {
            timer.abort();
        }
        cancelled
    }
}

impl fmt::Debug for ScheduledTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduledTask")
            .field("pending", &self.is_pending())
            .finish()
    }
}

/// Runs one-shot callbacks after a delay.
pub trait Scheduler: Send + Sync {
    /// Schedules `callback` to run once, `delay` from now.
    fn schedule(&self, delay: Duration, callback: Callback) -> ScheduledTask;
}

/// Scheduler backed by tokio timers.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    runtime: Handle,
}

impl TokioScheduler {
    /// Binds to the runtime of the calling context.
    ///
    /// ## Panics
    ///
    /// Panics when called outside a tokio runtime, like `tokio::spawn`.
    pub fn new() -> Self {
        Self::with_handle(Handle::current())
    }

    pub fn with_handle(runtime: Handle) -> Self {
        Self { runtime }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, callback: Callback) -> ScheduledTask {
        let (mut task, slot) = ScheduledTask::new(callback);
        // Measured from now, not from when the spawned task is first polled.
        let deadline = tokio::time::Instant::now() + delay;
        let join = self.runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if !fire(&slot) {
                trace!("Timer elapsed for a cancelled callback");
            }
        });
        task.timer = Some(join.abort_handle());
        task
    }
}

struct QueuedCallback {
    due: Duration,
    seq: u64,
    slot: Slot,
}

#[derive(Default)]
struct ManualQueue {
    now: Duration,
    next_seq: u64,
    queued: Vec<QueuedCallback>,
}

/// # Manual Scheduler (`ManualScheduler`)
///
/// A virtual clock for cooperative event loops. Nothing fires until `advance`
/// is called. Due callbacks run in deadline order, and callbacks sharing a
/// deadline run in the order they were scheduled.
///
/// Clones share the same clock and queue.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Arc<Mutex<ManualQueue>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the virtual clock.
    pub fn now(&self) -> Duration {
        lock(&self.queue).now
    }

    /// Number of callbacks that have neither fired nor been cancelled.
    pub fn pending(&self) -> usize {
        lock(&self.queue)
            .queued
            .iter()
            .filter(|q| lock(&q.slot).is_some())
            .count()
    }

    /// Moves the clock forward by `by`, firing every callback that falls due.
    /// Returns the number of callbacks that ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = lock(&self.queue).now + by;
        let mut fired = 0;
        // Callbacks run without the queue lock held; one may schedule another.
        while let Some(entry) = self.pop_due(target) {
            lock(&self.queue).now = entry.due;
            if fire(&entry.slot) {
                fired += 1;
            }
        }
        lock(&self.queue).now = target;
        fired
    }

    fn pop_due(&self, target: Duration) -> Option<QueuedCallback> {
        let mut queue = lock(&self.queue);
        let index = queue
            .queued
            .iter()
            .enumerate()
            .filter(|(_, q)| q.due <= target)
            .min_by_key(|(_, q)| (q.due, q.seq))
            .map(|(i, _)| i)?;
        Some(queue.queued.remove(index))
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("now", &self.now())
            .field("pending", &self.pending())
            .finish()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, callback: Callback) -> ScheduledTask {
        let (task, slot) = ScheduledTask::new(callback);
        let mut queue = lock(&self.queue);
        let entry = QueuedCallback {
            due: queue.now + delay,
            seq: queue.next_seq,
            slot,
        };
        queue.next_seq += 1;
        queue.queued.push(entry);
        task
    }
}
