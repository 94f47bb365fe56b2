//! Session error taxonomy.
//!
//! Extraction and classification problems never escape the scheduler as
//! `Err`; they become state transitions or sentinel labels.  These
//! variants are what the hosting UI gets to show as human-readable text.

/// Failures surfaced by the detection loop.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Fatal to the session: the loop halts in the Error state.
    #[error("failed to load the hand model: {0}")]
    ModelLoadFailure(String),

    /// Fatal to *starting* a session only; the prior state is kept.
    #[error("camera unavailable: {0}")]
    CameraAcquisitionFailure(String),

    /// The estimator broke mid-session.  The loop stops itself rather
    /// than hammering a broken model handle.
    #[error("hand estimation failed: {0}")]
    ClassificationRuntimeFailure(String),

    /// A start was refused because a required handle is missing.
    #[error("cannot start detection: {0}")]
    NotReady(&'static str),
}
