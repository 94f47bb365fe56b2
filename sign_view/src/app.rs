//! Top-level application: wires the detection loop to the simulated
//! hand, the camera provider, the speech backend, and the window, and
//! translates keyboard events into session commands.

use std::sync::Arc;
use std::time::{Duration, Instant};

use sign_rules::Classifier;
use sign_session::{
    spawn_landmark_source, CameraConstraints, DetectionLoop, FrameUpdate, RenderSink,
    SimCameraProvider, SimModelLoader, SpeechSink,
};

use crate::config::AppConfig;
use crate::sim::{pose_cell, PoseCell, SimPose, SimSource};
use crate::speech;
use crate::visualizer::{UiEvent, Visualizer};

// ════════════════════════════════════════════════════════════════════════════
// App
// ════════════════════════════════════════════════════════════════════════════

/// Owns the detection loop and every collaborator around it.  Contains
/// no windowing state, so the whole command surface is testable
/// headlessly.
pub struct App {
    detection: DetectionLoop,
    camera: SimCameraProvider,
    constraints: CameraConstraints,
    pose: PoseCell,
    speech: Box<dyn SpeechSink>,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        let classifier = Classifier::new(config.thresholds.clone());
        let mut detection = DetectionLoop::new(classifier, config.tuning());

        let pose = pose_cell(SimPose::Absent);
        detection.attach_source(spawn_landmark_source(SimSource::new(
            Arc::clone(&pose),
            Duration::from_millis(config.sim_latency_ms),
            config.sim_jitter_px,
        )));
        detection.begin_loading(SimModelLoader::new(
            config.sim_load_steps,
            Duration::from_millis(config.sim_load_step_ms),
        ));

        App {
            detection,
            camera: SimCameraProvider::new(),
            constraints: config.camera.clone(),
            pose,
            speech: speech::from_command(&config.speech_command),
        }
    }

    pub fn detection(&self) -> &DetectionLoop {
        &self.detection
    }

    pub fn camera(&self) -> &SimCameraProvider {
        &self.camera
    }

    pub fn pose(&self) -> SimPose {
        *self.pose.lock().unwrap()
    }

    /// Swap the speech backend (tests use a recorder).
    pub fn set_speech(&mut self, sink: Box<dyn SpeechSink>) {
        self.speech = sink;
    }

    /// Advance the pipeline one display frame.
    pub fn tick(&mut self, now: Instant) -> FrameUpdate {
        self.detection.tick(now)
    }

    /// Apply one keyboard action.  Returns false when the app should
    /// quit.
    pub fn handle_event(&mut self, event: UiEvent) -> bool {
        match event {
            UiEvent::Quit => return false,
            UiEvent::ToggleCamera => {
                if self.detection.state().is_sampling() {
                    self.detection.stop();
                } else if let Err(err) = self.detection.start(&self.camera, &self.constraints) {
                    // The loop already surfaced the reason in its status.
                    tracing::warn!(%err, "camera start refused");
                }
            }
            UiEvent::ToggleDetection => self.detection.toggle_detection(),
            UiEvent::Restart => self.detection.restart(),
            UiEvent::Speak => {
                let text = self.detection.current_label().display_text();
                if !text.is_empty() {
                    self.speech.speak(text);
                }
            }
            UiEvent::ClearLabel => self.detection.clear_label(),
            UiEvent::ClearHistory => self.detection.clear_history(),
            UiEvent::SetPose(sim_pose) => {
                *self.pose.lock().unwrap() = sim_pose;
            }
        }
        true
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the window loop
// ════════════════════════════════════════════════════════════════════════════

/// Open the window and drive the pipeline at the display cadence.  This
/// is the per-refresh callback the scheduler's tick contract assumes.
pub fn run(config: AppConfig) -> Result<(), String> {
    let mut vis = Visualizer::new()?;
    let mut app = App::new(&config);

    while vis.is_open() {
        for event in vis.poll_input() {
            if !app.handle_event(event) {
                return Ok(());
            }
        }

        let update = app.tick(Instant::now());
        vis.set_pose_caption(app.pose().describe());
        RenderSink::frame(&mut vis, &update);
    }

    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
