//! Simulated hand: the landmark source used when no real model or
//! camera is present.
//!
//! The window's number keys pick a pose; the source thread answers every
//! estimate request from the currently selected pose, with a configurable
//! latency (standing in for inference cost) and a little positional
//! wobble so the overlay does not look frozen.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use rand::Rng;

use hand_stream::{pose, Landmark, LandmarkSet};
use sign_session::{EstimateReply, EstimateRequest, LandmarkSource};

// ════════════════════════════════════════════════════════════════════════════
// SimPose
// ════════════════════════════════════════════════════════════════════════════

/// What the simulated hand is currently doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimPose {
    LetterA,
    LetterB,
    LetterC,
    LetterL,
    LetterO,
    /// Open, spread hand that matches no rule.
    OpenSpread,
    /// No hand in frame.
    Absent,
}

impl SimPose {
    pub fn landmarks(self) -> Option<LandmarkSet> {
        match self {
            SimPose::LetterA => Some(pose::letter_a()),
            SimPose::LetterB => Some(pose::letter_b()),
            SimPose::LetterC => Some(pose::letter_c()),
            SimPose::LetterL => Some(pose::letter_l()),
            SimPose::LetterO => Some(pose::letter_o()),
            SimPose::OpenSpread => Some(pose::open_spread()),
            SimPose::Absent => None,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            SimPose::LetterA => "fist (A)",
            SimPose::LetterB => "flat hand (B)",
            SimPose::LetterC => "curved hand (C)",
            SimPose::LetterL => "point (L)",
            SimPose::LetterO => "pinch (O)",
            SimPose::OpenSpread => "open spread",
            SimPose::Absent => "no hand",
        }
    }
}

/// Shared cell the window writes and the source thread reads.
pub type PoseCell = Arc<Mutex<SimPose>>;

pub fn pose_cell(initial: SimPose) -> PoseCell {
    Arc::new(Mutex::new(initial))
}

// ════════════════════════════════════════════════════════════════════════════
// SimSource
// ════════════════════════════════════════════════════════════════════════════

/// Landmark source backed by the shared pose cell.
pub struct SimSource {
    pose: PoseCell,
    latency: Duration,
    jitter_px: f32,
}

impl SimSource {
    pub fn new(pose: PoseCell, latency: Duration, jitter_px: f32) -> Self {
        SimSource { pose, latency, jitter_px }
    }
}

impl LandmarkSource for SimSource {
    fn run(self: Box<Self>, requests: Receiver<EstimateRequest>, replies: Sender<EstimateReply>) {
        let mut rng = rand::rng();
        for request in requests {
            if !self.latency.is_zero() {
                thread::sleep(self.latency);
            }
            let current = *self.pose.lock().unwrap();
            let landmarks = current
                .landmarks()
                .map(|set| jitter(&set, self.jitter_px, &mut rng));

            let reply = EstimateReply {
                generation: request.generation,
                outcome: Ok(landmarks),
            };
            if replies.send(reply).is_err() {
                return;
            }
        }
    }
}

/// Wobble every point by up to ±`amount` per axis.  The pose catalog
/// keeps its distances far enough from every threshold that the default
/// wobble cannot flip a classification.
fn jitter(set: &LandmarkSet, amount: f32, rng: &mut impl Rng) -> LandmarkSet {
    if amount <= 0.0 {
        return set.clone();
    }
    let mut points = *set.points();
    for point in &mut points {
        *point = Landmark::new(
            point.x + rng.random_range(-amount..=amount),
            point.y + rng.random_range(-amount..=amount),
            point.z,
        );
    }
    LandmarkSet::from_array(points)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
