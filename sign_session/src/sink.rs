//! Outbound seams: per-frame rendering and speech.

use hand_stream::LandmarkSet;

use crate::history::HistoryEntry;
use crate::state::{CurrentLabel, DetectionState};

/// Snapshot handed to the render sink every tick.
#[derive(Clone, Debug)]
pub struct FrameUpdate {
    /// Latest known skeleton, for the overlay; `None` clears it.
    pub landmarks: Option<LandmarkSet>,
    pub label: CurrentLabel,
    pub state: DetectionState,
    /// Human-readable status line.
    pub status: String,
    /// History snapshot, newest first.
    pub history: Vec<HistoryEntry>,
}

/// Consumes per-frame geometry and labels for display.
pub trait RenderSink {
    fn frame(&mut self, update: &FrameUpdate);
}

/// Discards everything; the test-side sink.
pub struct NullRenderSink;

impl RenderSink for NullRenderSink {
    fn frame(&mut self, _update: &FrameUpdate) {}
}

/// Fire-and-forget text-to-speech.
pub trait SpeechSink {
    fn speak(&self, text: &str);
}

/// Silent speech backend.
pub struct NullSpeech;

impl SpeechSink for NullSpeech {
    fn speak(&self, _text: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sinks_are_object_safe() {
        let update = FrameUpdate {
            landmarks: None,
            label: CurrentLabel::Blank,
            state: DetectionState::Idle,
            status: String::new(),
            history: Vec::new(),
        };
        let mut render: Box<dyn RenderSink> = Box::new(NullRenderSink);
        render.frame(&update);
        let speech: Box<dyn SpeechSink> = Box::new(NullSpeech);
        speech.speak("A");
    }
}
