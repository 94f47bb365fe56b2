//! # hand_stream
//!
//! Data model for a single detected hand: a validated set of 21 3D
//! landmarks, the named pairwise distances the sign classifier consumes,
//! and the skeleton adjacency used for drawing.
//!
//! ## Landmark indices
//!
//! | Index | Point |
//! |---|---|
//! | 0 | wrist |
//! | 1–4 | thumb, base → tip |
//! | 5–8 | index finger, base → tip |
//! | 9–12 | middle finger, base → tip |
//! | 13–16 | ring finger, base → tip |
//! | 17–20 | pinky, base → tip |
//!
//! A [`LandmarkSet`](landmark::LandmarkSet) can only be built through its
//! validating constructors, so anything downstream of construction may
//! assume exactly 21 points.  Distances are measured on the (x, y)
//! projection; the z coordinate is carried but not consumed by the
//! feature set.
//!
//! The [`pose`] module generates synthetic hands for the keyboard
//! simulator and the test suites.

pub mod feature;
pub mod landmark;
pub mod pose;
pub mod skeleton;

pub use feature::{DistancePair, FeatureVector};
pub use landmark::{InvalidLandmarkSet, Landmark, LandmarkSet, LANDMARK_COUNT};
