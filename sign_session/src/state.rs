//! Detection lifecycle states and the label the UI currently shows.

use sign_rules::SignLabel;

// ════════════════════════════════════════════════════════════════════════════
// DetectionState
// ════════════════════════════════════════════════════════════════════════════

/// Lifecycle of one detection session.  Owned exclusively by the
/// scheduler; everyone else observes.
#[derive(Clone, Debug, PartialEq)]
pub enum DetectionState {
    /// Nothing loaded yet.
    Idle,
    /// Model download/compile in progress; `percent` is monotonically
    /// non-decreasing and pinned below 100 until the loader finishes.
    ModelLoading { percent: u8 },
    /// Model loaded, camera off.
    Ready,
    /// Sampling and classifying.
    Running,
    /// Sampling continues (live skeleton preview); results are not
    /// applied.
    Paused,
    /// Camera released, session over; may be started again.
    Stopped,
    /// Terminal until an external restart.
    Error(String),
}

impl DetectionState {
    /// True while the loop should keep polling the landmark source.
    pub fn is_sampling(&self) -> bool {
        matches!(self, DetectionState::Running | DetectionState::Paused)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, DetectionState::Error(_))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// CurrentLabel
// ════════════════════════════════════════════════════════════════════════════

/// What the translation panel shows right now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CurrentLabel {
    /// Nothing yet (startup, or cleared).
    Blank,
    /// The last frame contained no hand.
    NoHands,
    /// A hand was seen but no rule matched.
    Unrecognized,
    /// A recognized letter.
    Sign(SignLabel),
}

impl CurrentLabel {
    /// Text for the UI panel.  Sentinels get guidance strings; a
    /// recognized letter shows as itself.
    pub fn display_text(&self) -> &'static str {
        match self {
            CurrentLabel::Blank => "",
            CurrentLabel::NoHands => "Position your hands in the camera frame...",
            CurrentLabel::Unrecognized => "Sign not recognized. Try another.",
            CurrentLabel::Sign(label) => label.as_str(),
        }
    }

    /// The letter, if one is currently shown.
    pub fn sign(&self) -> Option<SignLabel> {
        match self {
            CurrentLabel::Sign(label) => Some(*label),
            _ => None,
        }
    }
}
