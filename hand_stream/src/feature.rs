//! The fixed set of named pairwise distances the classifier consumes.

use crate::landmark::{
    LandmarkSet, INDEX_BASE, INDEX_TIP, MIDDLE_BASE, MIDDLE_TIP, PINKY_BASE, PINKY_TIP,
    RING_BASE, RING_TIP, THUMB_TIP,
};

// ════════════════════════════════════════════════════════════════════════════
// DistancePair
// ════════════════════════════════════════════════════════════════════════════

/// A named landmark pair whose planar distance is part of every feature
/// vector.  The enumeration is closed: the classifier's rule table refers
/// to these and nothing else.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum DistancePair {
    ThumbTipToIndexBase,
    IndexTipToMiddleTip,
    MiddleTipToRingTip,
    RingTipToPinkyTip,
    ThumbTipToIndexTip,
    MiddleTipToMiddleBase,
    RingTipToRingBase,
    PinkyTipToPinkyBase,
    IndexTipToIndexBase,
    ThumbTipToMiddleTip,
}

/// Evaluation order of the pairs inside a [`FeatureVector`].
pub const ALL_PAIRS: [DistancePair; 10] = [
    DistancePair::ThumbTipToIndexBase,
    DistancePair::IndexTipToMiddleTip,
    DistancePair::MiddleTipToRingTip,
    DistancePair::RingTipToPinkyTip,
    DistancePair::ThumbTipToIndexTip,
    DistancePair::MiddleTipToMiddleBase,
    DistancePair::RingTipToRingBase,
    DistancePair::PinkyTipToPinkyBase,
    DistancePair::IndexTipToIndexBase,
    DistancePair::ThumbTipToMiddleTip,
];

impl DistancePair {
    /// The two landmark indices this pair measures between.
    pub fn endpoints(self) -> (usize, usize) {
        match self {
            DistancePair::ThumbTipToIndexBase   => (THUMB_TIP, INDEX_BASE),
            DistancePair::IndexTipToMiddleTip   => (INDEX_TIP, MIDDLE_TIP),
            DistancePair::MiddleTipToRingTip    => (MIDDLE_TIP, RING_TIP),
            DistancePair::RingTipToPinkyTip     => (RING_TIP, PINKY_TIP),
            DistancePair::ThumbTipToIndexTip    => (THUMB_TIP, INDEX_TIP),
            DistancePair::MiddleTipToMiddleBase => (MIDDLE_TIP, MIDDLE_BASE),
            DistancePair::RingTipToRingBase     => (RING_TIP, RING_BASE),
            DistancePair::PinkyTipToPinkyBase   => (PINKY_TIP, PINKY_BASE),
            DistancePair::IndexTipToIndexBase   => (INDEX_TIP, INDEX_BASE),
            DistancePair::ThumbTipToMiddleTip   => (THUMB_TIP, MIDDLE_TIP),
        }
    }

    /// Stable name used in logs and threshold diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            DistancePair::ThumbTipToIndexBase   => "thumbTip-indexBase",
            DistancePair::IndexTipToMiddleTip   => "indexTip-middleTip",
            DistancePair::MiddleTipToRingTip    => "middleTip-ringTip",
            DistancePair::RingTipToPinkyTip     => "ringTip-pinkyTip",
            DistancePair::ThumbTipToIndexTip    => "thumbTip-indexTip",
            DistancePair::MiddleTipToMiddleBase => "middleTip-middleBase",
            DistancePair::RingTipToRingBase     => "ringTip-ringBase",
            DistancePair::PinkyTipToPinkyBase   => "pinkyTip-pinkyBase",
            DistancePair::IndexTipToIndexBase   => "indexTip-indexBase",
            DistancePair::ThumbTipToMiddleTip   => "thumbTip-middleTip",
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// FeatureVector
// ════════════════════════════════════════════════════════════════════════════

/// Planar distances for every [`DistancePair`], recomputed each cycle.
///
/// Derived and ephemeral: a vector never outlives the frame it was
/// extracted from.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureVector([f32; ALL_PAIRS.len()]);

impl FeatureVector {
    /// Extract every named distance from a validated landmark set.
    ///
    /// Infallible: a [`LandmarkSet`] is 21 points by construction.
    pub fn extract(set: &LandmarkSet) -> Self {
        let mut values = [0.0; ALL_PAIRS.len()];
        for (slot, pair) in values.iter_mut().zip(ALL_PAIRS) {
            let (a, b) = pair.endpoints();
            *slot = set.distance(a, b);
        }
        FeatureVector(values)
    }

    /// Build a vector from explicit per-pair distances, in [`ALL_PAIRS`]
    /// order.  Exists so rule predicates can be exercised on synthetic
    /// inputs without fabricating full hands.
    pub fn from_distances(values: [f32; ALL_PAIRS.len()]) -> Self {
        FeatureVector(values)
    }

    pub fn get(&self, pair: DistancePair) -> f32 {
        self.0[pair as usize]
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
