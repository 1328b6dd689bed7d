//! Loading progress simulation.
//!
//! The backend exposes no real progress signal, so the loading panel is
//! driven by a fixed client-side timer schedule: four abstract steps, each
//! activated at a fixed offset from the start of the current request. The
//! schedule is purely cosmetic and must never outlive the request that
//! started it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tracing::trace;

/// Number of simulated loading steps.
pub const STEP_COUNT: usize = 4;

/// Offsets from request start at which each step becomes active.
pub const STEP_OFFSETS: [Duration; STEP_COUNT] = [
    Duration::ZERO,
    Duration::from_millis(3000),
    Duration::from_millis(8000),
    Duration::from_millis(13000),
];

/// Labels for the loading step indicators, mirroring the backend pipeline.
pub const STEP_LABELS: [&str; STEP_COUNT] = [
    "Querying search engines",
    "Scoring authority",
    "Scoring relevance",
    "Filtering results",
];

/// State of one loading step indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepState {
    #[default]
    Pending,
    Active,
    Completed,
}

/// The four step indicators of the loading panel.
///
/// Transitions are monotonic: steps become active and complete strictly in
/// index order and never regress within one query lifecycle. The only way
/// back to all-pending is [`LoadingProgress::reset`] at the start of the
/// next query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadingProgress {
    steps: [StepState; STEP_COUNT],
}

impl LoadingProgress {
    /// Returns all-pending progress.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets every step to pending.
    pub fn reset(&mut self) {
        self.steps = [StepState::Pending; STEP_COUNT];
    }

    /// Marks `step` active, completing every earlier step.
    ///
    /// Already-completed steps are left alone, so out-of-order or repeated
    /// calls cannot move a step backwards.
    pub fn activate(&mut self, step: usize) {
        for state in &mut self.steps[..step] {
            *state = StepState::Completed;
        }
        if self.steps[step] == StepState::Pending {
            self.steps[step] = StepState::Active;
        }
    }

    /// State of one step.
    pub fn step(&self, index: usize) -> StepState {
        self.steps[index]
    }

    /// All step states in order.
    pub fn steps(&self) -> &[StepState; STEP_COUNT] {
        &self.steps
    }

    /// True when every step is pending.
    pub fn is_all_pending(&self) -> bool {
        self.steps.iter().all(|s| *s == StepState::Pending)
    }
}

/// One-shot timer schedule driving [`LoadingProgress`].
///
/// Each `start` belongs to one request generation. Pending timers from a
/// prior generation are both aborted and invalidated by a generation counter,
/// so a stale timer can never mutate step state after the request completed
/// or a new query began.
pub struct ProgressSimulator {
    progress: Arc<Mutex<LoadingProgress>>,
    generation: Arc<AtomicU64>,
    offsets: [Duration; STEP_COUNT],
    tasks: Vec<JoinHandle<()>>,
}

impl ProgressSimulator {
    /// Creates a simulator with the standard schedule.
    pub fn new() -> Self {
        Self::with_offsets(STEP_OFFSETS)
    }

    /// Creates a simulator with a custom schedule.
    pub fn with_offsets(offsets: [Duration; STEP_COUNT]) -> Self {
        Self {
            progress: Arc::new(Mutex::new(LoadingProgress::new())),
            generation: Arc::new(AtomicU64::new(0)),
            offsets,
            tasks: Vec::new(),
        }
    }

    /// Starts a fresh schedule for a new request.
    ///
    /// Cancels anything still pending from the previous request, resets all
    /// steps and spawns one timer per step.
    pub fn start(&mut self) {
        self.cancel();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.progress
            .lock()
            .expect("progress lock poisoned")
            .reset();

        for (step, offset) in self.offsets.into_iter().enumerate() {
            let progress = Arc::clone(&self.progress);
            let current = Arc::clone(&self.generation);
            self.tasks.push(tokio::spawn(async move {
                sleep(offset).await;
                // The generation check happens under the progress lock:
                // cancel/start bump the counter before the next reset takes
                // the lock, so a timer that got past a check outside the
                // lock could still apply a stale transition.
                let mut progress = progress.lock().expect("progress lock poisoned");
                if current.load(Ordering::SeqCst) == generation {
                    trace!(step, "loading step activated");
                    progress.activate(step);
                }
            }));
        }
    }

    /// Invalidates and aborts all pending timers.
    ///
    /// Called when the request completes (either way) and before a new one
    /// starts. Step states are left as they are; the next `start` resets
    /// them.
    pub fn cancel(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }

    /// Current step states.
    pub fn snapshot(&self) -> LoadingProgress {
        self.progress
            .lock()
            .expect("progress lock poisoned")
            .clone()
    }
}

impl Default for ProgressSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ProgressSimulator {
    fn drop(&mut self) {
        self.cancel();
    }
}
