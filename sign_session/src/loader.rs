//! Asynchronous model loading with progress events.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

// ════════════════════════════════════════════════════════════════════════════
// ModelHandle
// ════════════════════════════════════════════════════════════════════════════

/// Opaque proof that a hand model finished loading.  The scheduler will
/// not enter Running without one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelHandle {
    id: u64,
}

impl ModelHandle {
    pub fn new(id: u64) -> Self {
        ModelHandle { id }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ModelLoader trait
// ════════════════════════════════════════════════════════════════════════════

/// Progress stream from a loader worker.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadEvent {
    /// Fraction in 0.0–1.0; the scheduler turns this into a clamped,
    /// monotonic percentage.
    Progress(f32),
    Ready(ModelHandle),
    Failed(String),
}

/// A model-loading backend.  Runs on its own thread; reports through the
/// event channel and terminates.
pub trait ModelLoader: Send + 'static {
    fn run(self: Box<Self>, events: Sender<LoadEvent>);
}

/// Spawn a loader and return the scheduler's receiving end.
pub fn spawn_model_loader<L: ModelLoader>(loader: L) -> Receiver<LoadEvent> {
    let (event_tx, event_rx) = mpsc::channel();
    thread::spawn(move || Box::new(loader).run(event_tx));
    event_rx
}

// ════════════════════════════════════════════════════════════════════════════
// SimModelLoader
// ════════════════════════════════════════════════════════════════════════════

/// Loader for simulation and tests: emits evenly spaced progress
/// fractions, then Ready (or a configured failure).
pub struct SimModelLoader {
    steps: u32,
    step_delay: Duration,
    fail_with: Option<String>,
}

impl SimModelLoader {
    pub fn new(steps: u32, step_delay: Duration) -> Self {
        SimModelLoader { steps, step_delay, fail_with: None }
    }

    /// Instantaneous successful load.
    pub fn instant() -> Self {
        SimModelLoader::new(0, Duration::ZERO)
    }

    pub fn failing(message: &str) -> Self {
        SimModelLoader { steps: 0, step_delay: Duration::ZERO, fail_with: Some(message.into()) }
    }
}

impl ModelLoader for SimModelLoader {
    fn run(self: Box<Self>, events: Sender<LoadEvent>) {
        for step in 1..=self.steps {
            if !self.step_delay.is_zero() {
                thread::sleep(self.step_delay);
            }
            let fraction = step as f32 / (self.steps + 1) as f32;
            if events.send(LoadEvent::Progress(fraction)).is_err() {
                return;
            }
        }
        let last = match self.fail_with {
            Some(message) => LoadEvent::Failed(message),
            None => LoadEvent::Ready(ModelHandle::new(1)),
        };
        let _ = events.send(last);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
