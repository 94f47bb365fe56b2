//! # sign_session
//!
//! The detection loop behind the translator: owns the lifecycle between
//! "camera on/off", "model loading" and "detection active/paused", drives
//! classification at a bounded cadence, and keeps the bounded history of
//! recognized letters.
//!
//! ## Shape
//!
//! The host (window loop, test harness) calls
//! [`DetectionLoop::tick`](scheduler::DetectionLoop::tick) once per
//! display refresh.  Each tick drains pending model-loader and
//! landmark-source messages, optionally issues **one** new estimate
//! request (at most one is ever in flight, and at most one per rate-limit
//! window), and returns a [`FrameUpdate`](sink::FrameUpdate) snapshot for
//! the render sink.
//!
//! Landmark estimation runs on a worker thread behind the
//! [`LandmarkSource`](source::LandmarkSource) trait; completions are
//! tagged with the generation they were requested under, and anything
//! stale (a reply from before a stop or restart) is discarded on
//! arrival rather than applied to the wrong session.
//!
//! The camera stream handle is owned by the loop only while Running or
//! Paused; every exit path stops its tracks.

pub mod camera;
pub mod error;
pub mod history;
pub mod loader;
pub mod scheduler;
pub mod sink;
pub mod source;
pub mod state;

pub use camera::{CameraConstraints, CameraProvider, SimCameraProvider, StreamHandle};
pub use error::SessionError;
pub use history::{HistoryEntry, HistoryLedger, HISTORY_CAP};
pub use loader::{spawn_model_loader, LoadEvent, ModelHandle, ModelLoader, SimModelLoader};
pub use scheduler::{DetectionLoop, SessionTuning};
pub use sink::{FrameUpdate, NullRenderSink, NullSpeech, RenderSink, SpeechSink};
pub use source::{
    spawn_landmark_source, EstimateReply, EstimateRequest, LandmarkSource, ScriptedSource,
    ScriptedStep, SourceHandle,
};
pub use state::{CurrentLabel, DetectionState};
