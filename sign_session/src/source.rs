//! Asynchronous landmark estimation behind a channel protocol.
//!
//! A source runs on its own thread and answers estimate requests one at a
//! time; the scheduler never has more than one request outstanding.  Every
//! request carries the scheduler's current generation, and the reply
//! echoes it back.  A reply whose generation no longer matches (the
//! session was stopped or restarted while the estimate was in flight) is
//! discarded by the receiver instead of being applied to the new session.
//!
//! Sources validate raw model output themselves: a malformed frame (wrong
//! point count) is reported as "no detection", never as landmarks.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use hand_stream::LandmarkSet;

// ════════════════════════════════════════════════════════════════════════════
// Protocol messages
// ════════════════════════════════════════════════════════════════════════════

/// One estimate request; `generation` identifies the session issuing it.
#[derive(Clone, Copy, Debug)]
pub struct EstimateRequest {
    pub generation: u64,
}

/// Completion of one estimate.
#[derive(Clone, Debug)]
pub struct EstimateReply {
    /// Echo of the request's generation; mismatches are stale.
    pub generation: u64,
    /// `Ok(None)` means no hand in frame (including malformed frames);
    /// `Err` is a broken estimator and fatal to the session.
    pub outcome: Result<Option<LandmarkSet>, String>,
}

// ════════════════════════════════════════════════════════════════════════════
// LandmarkSource trait — unified interface for sim, replay, and hardware
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can answer [`EstimateRequest`]s over a channel.
pub trait LandmarkSource: Send + 'static {
    fn run(self: Box<Self>, requests: Receiver<EstimateRequest>, replies: Sender<EstimateReply>);
}

/// The scheduler's end of a spawned source.
pub struct SourceHandle {
    request_tx: Sender<EstimateRequest>,
    reply_rx: Receiver<EstimateReply>,
}

impl SourceHandle {
    /// Issue a request.  Returns false when the source thread is gone.
    pub fn request(&self, generation: u64) -> bool {
        self.request_tx.send(EstimateRequest { generation }).is_ok()
    }

    /// Non-blocking poll for the next completion.
    pub fn try_reply(&self) -> Option<EstimateReply> {
        self.reply_rx.try_recv().ok()
    }
}

/// Spawn a source on its own thread and return the scheduler's handle.
pub fn spawn_landmark_source<S: LandmarkSource>(source: S) -> SourceHandle {
    let (request_tx, request_rx) = mpsc::channel();
    let (reply_tx, reply_rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(request_rx, reply_tx));
    SourceHandle { request_tx, reply_rx }
}

// ════════════════════════════════════════════════════════════════════════════
// ScriptedSource — deterministic replay for tests and demos
// ════════════════════════════════════════════════════════════════════════════

/// One scripted answer.
#[derive(Clone, Debug)]
pub enum ScriptedStep {
    /// A validated hand.
    Hand(LandmarkSet),
    /// Raw model output, validated on replay; the wrong point count
    /// degrades to "no detection" exactly like a live malformed frame.
    Raw(Vec<[f32; 3]>),
    /// No hand in frame.
    NoHand,
    /// Estimator failure.
    Fail(String),
}

/// Serves a fixed sequence of steps, one per request, then repeats the
/// final step forever.  Optional per-request latency makes in-flight
/// windows observable.
pub struct ScriptedSource {
    steps: Vec<ScriptedStep>,
    latency: Duration,
    requests_seen: Arc<AtomicUsize>,
}

impl ScriptedSource {
    pub fn new(steps: Vec<ScriptedStep>) -> Self {
        ScriptedSource {
            steps,
            latency: Duration::ZERO,
            requests_seen: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Delay each reply by `latency`, simulating inference cost.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Shared counter of requests received, for concurrency assertions.
    pub fn request_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.requests_seen)
    }
}

impl LandmarkSource for ScriptedSource {
    fn run(self: Box<Self>, requests: Receiver<EstimateRequest>, replies: Sender<EstimateReply>) {
        let mut next = 0usize;
        for request in requests {
            self.requests_seen.fetch_add(1, Ordering::SeqCst);
            if !self.latency.is_zero() {
                thread::sleep(self.latency);
            }

            let step = match self.steps.get(next) {
                Some(step) => {
                    next += 1;
                    step.clone()
                }
                None => self.steps.last().cloned().unwrap_or(ScriptedStep::NoHand),
            };

            let outcome = match step {
                ScriptedStep::Hand(set) => Ok(Some(set)),
                ScriptedStep::Raw(points) => Ok(LandmarkSet::from_points(&points).ok()),
                ScriptedStep::NoHand => Ok(None),
                ScriptedStep::Fail(message) => Err(message),
            };

            let reply = EstimateReply { generation: request.generation, outcome };
            if replies.send(reply).is_err() {
                return;
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_stream::pose;
    use std::time::Instant;

    fn recv_reply(handle: &SourceHandle) -> EstimateReply {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            if let Some(reply) = handle.try_reply() {
                return reply;
            }
            assert!(Instant::now() < deadline, "no reply within 2s");
            thread::sleep(Duration::from_millis(2));
        }
    }

    #[test]
    fn scripted_steps_play_in_order_then_repeat() {
        let source = ScriptedSource::new(vec![
            ScriptedStep::Hand(pose::letter_a()),
            ScriptedStep::NoHand,
        ]);
        let handle = spawn_landmark_source(source);

        handle.request(1);
        assert_eq!(recv_reply(&handle).outcome, Ok(Some(pose::letter_a())));

        for gen in 2..4 {
            handle.request(gen);
            assert_eq!(recv_reply(&handle).outcome, Ok(None));
        }
    }

    #[test]
    fn replies_echo_the_request_generation() {
        let handle = spawn_landmark_source(ScriptedSource::new(vec![ScriptedStep::NoHand]));
        handle.request(42);
        assert_eq!(recv_reply(&handle).generation, 42);
    }

    #[test]
    fn malformed_raw_frames_degrade_to_no_detection() {
        let twenty_points = vec![[1.0, 2.0, 0.0]; 20];
        let handle = spawn_landmark_source(ScriptedSource::new(vec![
            ScriptedStep::Raw(twenty_points),
            ScriptedStep::Raw(pose::letter_b().into()),
        ]));

        handle.request(1);
        assert_eq!(recv_reply(&handle).outcome, Ok(None));

        handle.request(2);
        assert_eq!(recv_reply(&handle).outcome, Ok(Some(pose::letter_b())));
    }

    #[test]
    fn failures_carry_the_message() {
        let handle = spawn_landmark_source(ScriptedSource::new(vec![ScriptedStep::Fail(
            "backend lost".into(),
        )]));
        handle.request(1);
        assert_eq!(recv_reply(&handle).outcome, Err("backend lost".into()));
    }
}
