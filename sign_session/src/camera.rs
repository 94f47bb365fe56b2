//! Camera acquisition and the stream handle the scheduler owns.
//!
//! A [`StreamHandle`] is a registry of tracks shared between the producer
//! and every observer clone, mirroring how a media stream hands out track
//! lists: stopping the handle stops the shared tracks, so a test holding
//! its own clone can verify that nothing was left live after the
//! scheduler released the camera.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

// ════════════════════════════════════════════════════════════════════════════
// CameraConstraints
// ════════════════════════════════════════════════════════════════════════════

/// Requested capture parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConstraints {
    pub width: u32,
    pub height: u32,
    /// Front-facing ("user") camera when true.
    pub facing_user: bool,
}

impl Default for CameraConstraints {
    fn default() -> Self {
        CameraConstraints { width: 1280, height: 720, facing_user: true }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// StreamHandle
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
struct Track {
    kind: &'static str,
    live: bool,
}

/// Handle to an acquired capture stream.  Clones share the same track
/// registry; `stop_all` through any clone kills every track.
#[derive(Clone, Debug)]
pub struct StreamHandle {
    tracks: Arc<Mutex<Vec<Track>>>,
}

impl StreamHandle {
    /// A stream carrying a single live video track.
    pub fn single_video() -> Self {
        StreamHandle {
            tracks: Arc::new(Mutex::new(vec![Track { kind: "video", live: true }])),
        }
    }

    /// Number of tracks still live.
    pub fn live_tracks(&self) -> usize {
        self.tracks.lock().unwrap().iter().filter(|t| t.live).count()
    }

    /// Stop every live track.  Idempotent.
    pub fn stop_all(&self) {
        for track in self.tracks.lock().unwrap().iter_mut() {
            if track.live {
                tracing::debug!(kind = track.kind, "stopping capture track");
                track.live = false;
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// CameraProvider
// ════════════════════════════════════════════════════════════════════════════

/// Hands out capture streams.  Acquisition failure is fatal to starting a
/// session but leaves the loop in its prior state.
pub trait CameraProvider {
    fn acquire(&self, constraints: &CameraConstraints) -> Result<StreamHandle, SessionError>;
}

/// Provider for simulation and tests: always succeeds (or always fails
/// with a configured message) and remembers every handle it issued so
/// leak checks can sweep them.
#[derive(Default)]
pub struct SimCameraProvider {
    deny_with: Option<String>,
    issued: Mutex<Vec<StreamHandle>>,
}

impl SimCameraProvider {
    pub fn new() -> Self {
        SimCameraProvider::default()
    }

    /// A provider that refuses every acquisition, like a denied
    /// permission prompt.
    pub fn denying(message: &str) -> Self {
        SimCameraProvider { deny_with: Some(message.to_string()), issued: Mutex::new(Vec::new()) }
    }

    /// Total live tracks across every handle ever issued.
    pub fn live_total(&self) -> usize {
        self.issued.lock().unwrap().iter().map(StreamHandle::live_tracks).sum()
    }
}

impl CameraProvider for SimCameraProvider {
    fn acquire(&self, constraints: &CameraConstraints) -> Result<StreamHandle, SessionError> {
        if let Some(message) = &self.deny_with {
            return Err(SessionError::CameraAcquisitionFailure(message.clone()));
        }
        tracing::debug!(
            width = constraints.width,
            height = constraints.height,
            "issuing simulated capture stream"
        );
        let handle = StreamHandle::single_video();
        self.issued.lock().unwrap().push(handle.clone());
        Ok(handle)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
