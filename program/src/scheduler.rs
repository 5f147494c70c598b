// Live Draw Engine - Timer scheduling
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Handle returned by a [`Scheduler`], used to cancel a pending timer
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(pub u64);

/// What a timer does when it fires
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimerKind {
    /// End of the mixing stage
    BeginReveal,
    /// Reveal the winner at `index` in the full winner list
    Reveal { index: usize },
}

/// Timer payload handed back to the sequencer when it fires
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawTimer {
    /// Session that scheduled the timer
    pub session: u64,
    pub kind: TimerKind,
}

/// Monotonic one-shot timer facility provided by the host.
///
/// Fired timers are delivered back to `DrawSequencer::on_timer`.
pub trait Scheduler {
    fn schedule(&mut self, delay_ms: u64, timer: DrawTimer) -> TimerHandle;

    fn cancel(&mut self, handle: TimerHandle);

    /// Called once a delivered timer has been consumed
    fn release(&mut self, _handle: TimerHandle) {}
}

/// Simulated clock. Nothing fires until the owner advances time.
///
/// Timers come out ordered by due time, then by scheduling order.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now_ms: u64,
    next_id: u64,
    queue: BTreeMap<(u64, u64), DrawTimer>,
    due: HashMap<TimerHandle, u64>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of timers scheduled and not yet fired or cancelled
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Pop the earliest timer due at or before `until_ms`, moving the clock to its due time
    pub fn pop_due(&mut self, until_ms: u64) -> Option<DrawTimer> {
        let (&(due_ms, id), _) = self.queue.iter().next()?;
        if due_ms > until_ms {
            return None;
        }
        let timer = self.queue.remove(&(due_ms, id))?;
        self.due.remove(&TimerHandle(id));
        self.now_ms = self.now_ms.max(due_ms);
        Some(timer)
    }

    pub fn advance_to(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay_ms: u64, timer: DrawTimer) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;

        let due_ms = self.now_ms.saturating_add(delay_ms);
        self.queue.insert((due_ms, handle.0), timer);
        self.due.insert(handle, due_ms);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(due_ms) = self.due.remove(&handle) {
            self.queue.remove(&(due_ms, handle.0));
        }
    }
}

/// Tokio-backed timers: one sleeping task per timer, aborted on cancel.
///
/// Must be used from within a tokio runtime.
pub struct TokioScheduler {
    next_id: u64,
    tasks: HashMap<TimerHandle, JoinHandle<()>>,
    fired: mpsc::UnboundedSender<DrawTimer>,
}

impl TokioScheduler {
    /// Create a scheduler and the receiver its fired timers arrive on
    pub fn new() -> (Self, mpsc::UnboundedReceiver<DrawTimer>) {
        let (fired, fired_rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            next_id: 0,
            tasks: HashMap::new(),
            fired,
        };
        (scheduler, fired_rx)
    }

    /// Timer tasks still tracked (sleeping, or fired but not yet consumed)
    pub fn active(&self) -> usize {
        self.tasks.len()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, delay_ms: u64, timer: DrawTimer) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;

        let fired = self.fired.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            // Receiver gone means the runner was dropped
            let _ = fired.send(timer);
        });
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
        }
    }

    fn release(&mut self, handle: TimerHandle) {
        self.tasks.remove(&handle);
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}
