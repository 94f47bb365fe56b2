//! Synthetic hand poses.
//!
//! The keyboard simulator and the test suites need full 21-point hands
//! whose feature distances land well inside the classifier's threshold
//! bands.  Coordinates are in a nominal 640×480 camera frame with the
//! wrist near the bottom centre; intermediate finger joints are
//! interpolated between base and tip, which is enough for the skeleton
//! overlay and irrelevant to classification.

use crate::landmark::{Landmark, LandmarkSet, LANDMARK_COUNT};

// Shared knuckle row and wrist for every pose.
const WRIST_AT: (f32, f32) = (330.0, 380.0);
const THUMB_BASE_AT: (f32, f32) = (270.0, 330.0);
const INDEX_BASE_AT: (f32, f32) = (300.0, 300.0);
const MIDDLE_BASE_AT: (f32, f32) = (330.0, 300.0);
const RING_BASE_AT: (f32, f32) = (360.0, 300.0);
const PINKY_BASE_AT: (f32, f32) = (390.0, 300.0);

/// Closed fist: fingertips curled to the knuckle row, thumb resting
/// against the index knuckle.
pub fn letter_a() -> LandmarkSet {
    assemble(
        (285.0, 310.0),
        (300.0, 330.0),
        (330.0, 330.0),
        (360.0, 330.0),
        (390.0, 330.0),
    )
}

/// Flat hand: four fingers extended and together, thumb folded across
/// the palm.
pub fn letter_b() -> LandmarkSet {
    assemble(
        (350.0, 335.0),
        (300.0, 180.0),
        (330.0, 175.0),
        (360.0, 180.0),
        (390.0, 185.0),
    )
}

/// Curved hand: fingers arc halfway closed, thumb mirroring below.
pub fn letter_c() -> LandmarkSet {
    assemble(
        (380.0, 330.0),
        (355.0, 245.0),
        (385.0, 250.0),
        (415.0, 255.0),
        (440.0, 265.0),
    )
}

/// Index pointing up, thumb out to the side, remaining fingers curled.
pub fn letter_l() -> LandmarkSet {
    assemble(
        (180.0, 320.0),
        (300.0, 170.0),
        (330.0, 340.0),
        (360.0, 345.0),
        (390.0, 340.0),
    )
}

/// Thumb and index tips pinched into a ring, other fingers curled in.
pub fn letter_o() -> LandmarkSet {
    assemble(
        (320.0, 245.0),
        (310.0, 240.0),
        (335.0, 265.0),
        (365.0, 270.0),
        (393.0, 275.0),
    )
}

/// Splayed open hand: extended but spread, matching no letter.
pub fn open_spread() -> LandmarkSet {
    assemble(
        (150.0, 280.0),
        (250.0, 160.0),
        (330.0, 150.0),
        (430.0, 160.0),
        (500.0, 200.0),
    )
}

/// Every pose paired with the tip coordinates above, for sweep tests.
pub fn catalog() -> [(&'static str, LandmarkSet); 6] {
    [
        ("A", letter_a()),
        ("B", letter_b()),
        ("C", letter_c()),
        ("L", letter_l()),
        ("O", letter_o()),
        ("open", open_spread()),
    ]
}

// ════════════════════════════════════════════════════════════════════════════
// Assembly
// ════════════════════════════════════════════════════════════════════════════

fn assemble(
    thumb_tip: (f32, f32),
    index_tip: (f32, f32),
    middle_tip: (f32, f32),
    ring_tip: (f32, f32),
    pinky_tip: (f32, f32),
) -> LandmarkSet {
    let mut points = [Landmark::default(); LANDMARK_COUNT];
    points[0] = Landmark::new(WRIST_AT.0, WRIST_AT.1, 0.0);
    write_chain(&mut points, 1, THUMB_BASE_AT, thumb_tip);
    write_chain(&mut points, 5, INDEX_BASE_AT, index_tip);
    write_chain(&mut points, 9, MIDDLE_BASE_AT, middle_tip);
    write_chain(&mut points, 13, RING_BASE_AT, ring_tip);
    write_chain(&mut points, 17, PINKY_BASE_AT, pinky_tip);
    LandmarkSet::from_array(points)
}

/// Fill `base, pip, dip, tip` for one finger, lerping the inner joints.
fn write_chain(points: &mut [Landmark; LANDMARK_COUNT], base_idx: usize, base: (f32, f32), tip: (f32, f32)) {
    for (offset, t) in [(0usize, 0.0f32), (1, 0.4), (2, 0.75), (3, 1.0)] {
        let x = base.0 + (tip.0 - base.0) * t;
        let y = base.1 + (tip.1 - base.1) * t;
        // Knuckles sit slightly proud of the image plane.
        points[base_idx + offset] = Landmark::new(x, y, -5.0 - 5.0 * t);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{DistancePair, FeatureVector};

    #[test]
    fn fist_thumb_hugs_index_knuckle() {
        let f = FeatureVector::extract(&letter_a());
        assert!(f.get(DistancePair::ThumbTipToIndexBase) < 50.0);
        assert!(f.get(DistancePair::IndexTipToMiddleTip) < 40.0);
    }

    #[test]
    fn pointing_pose_spreads_thumb_and_index() {
        let f = FeatureVector::extract(&letter_l());
        assert!(f.get(DistancePair::ThumbTipToIndexTip) > 100.0);
        assert!(f.get(DistancePair::MiddleTipToMiddleBase) < 70.0);
    }

    #[test]
    fn flat_hand_extends_all_four_fingers() {
        let f = FeatureVector::extract(&letter_b());
        for pair in [
            DistancePair::IndexTipToIndexBase,
            DistancePair::MiddleTipToMiddleBase,
            DistancePair::RingTipToRingBase,
            DistancePair::PinkyTipToPinkyBase,
        ] {
            assert!(f.get(pair) > 100.0, "{} too short", pair.name());
        }
        // Thumb folded across the palm must not read as a fist.
        assert!(f.get(DistancePair::ThumbTipToIndexBase) >= 50.0);
    }

    #[test]
    fn curved_hand_sits_in_the_middle_band() {
        let f = FeatureVector::extract(&letter_c());
        for pair in [
            DistancePair::IndexTipToIndexBase,
            DistancePair::MiddleTipToMiddleBase,
            DistancePair::RingTipToRingBase,
            DistancePair::PinkyTipToPinkyBase,
        ] {
            let d = f.get(pair);
            assert!(d > 40.0 && d < 90.0, "{} = {} outside band", pair.name(), d);
        }
    }

    #[test]
    fn pinch_brings_thumb_to_index_tip() {
        let f = FeatureVector::extract(&letter_o());
        assert!(f.get(DistancePair::ThumbTipToIndexTip) < 30.0);
        // But not into fist territory.
        assert!(f.get(DistancePair::ThumbTipToIndexBase) >= 50.0);
    }

    #[test]
    fn every_pose_is_a_valid_set() {
        for (name, set) in catalog() {
            assert_eq!(set.points().len(), LANDMARK_COUNT, "{name}");
        }
    }
}
