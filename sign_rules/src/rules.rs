//! The ordered rule table and the classifier that walks it.

use hand_stream::feature::DistancePair as P;
use hand_stream::FeatureVector;

use crate::label::SignLabel;
use crate::thresholds::Thresholds;

// ════════════════════════════════════════════════════════════════════════════
// Rule
// ════════════════════════════════════════════════════════════════════════════

/// One `(label, predicate)` entry in the table.  Predicates are
/// independent of each other; ordering alone resolves overlaps.
#[derive(Clone, Copy)]
pub struct Rule {
    pub label: SignLabel,
    matches: fn(&FeatureVector, &Thresholds) -> bool,
}

impl Rule {
    pub fn matches(&self, features: &FeatureVector, thresholds: &Thresholds) -> bool {
        (self.matches)(features, thresholds)
    }
}

/// The table, in firing order.  The order is a compatibility contract:
/// a vector matching several rules must classify as the earliest.
pub fn rule_table() -> &'static [Rule] {
    &RULES
}

static RULES: [Rule; 5] = [
    Rule { label: SignLabel::A, matches: fist },
    Rule { label: SignLabel::L, matches: point },
    Rule { label: SignLabel::B, matches: flat_hand },
    Rule { label: SignLabel::C, matches: cup },
    Rule { label: SignLabel::O, matches: pinch_ring },
];

// ── predicates ──────────────────────────────────────────────────────────────

fn fist(f: &FeatureVector, t: &Thresholds) -> bool {
    f.get(P::ThumbTipToIndexBase) < t.fist_thumb_max
        && f.get(P::IndexTipToMiddleTip) < t.tips_together_max
        && f.get(P::MiddleTipToRingTip) < t.tips_together_max
        && f.get(P::RingTipToPinkyTip) < t.tips_together_max
}

fn point(f: &FeatureVector, t: &Thresholds) -> bool {
    f.get(P::ThumbTipToIndexTip) > t.point_spread_min
        && f.get(P::MiddleTipToMiddleBase) < t.point_curl_max
        && f.get(P::RingTipToRingBase) < t.point_curl_max
        && f.get(P::PinkyTipToPinkyBase) < t.point_curl_max
}

fn flat_hand(f: &FeatureVector, t: &Thresholds) -> bool {
    f.get(P::IndexTipToIndexBase) > t.flat_extension_min
        && f.get(P::MiddleTipToMiddleBase) > t.flat_extension_min
        && f.get(P::RingTipToRingBase) > t.flat_extension_min
        && f.get(P::PinkyTipToPinkyBase) > t.flat_extension_min
        && f.get(P::IndexTipToMiddleTip) < t.tips_together_max
        && f.get(P::MiddleTipToRingTip) < t.tips_together_max
        && f.get(P::RingTipToPinkyTip) < t.tips_together_max
}

fn cup(f: &FeatureVector, t: &Thresholds) -> bool {
    [
        P::IndexTipToIndexBase,
        P::MiddleTipToMiddleBase,
        P::RingTipToRingBase,
        P::PinkyTipToPinkyBase,
    ]
    .iter()
    .all(|&pair| {
        let d = f.get(pair);
        d > t.cup_min && d < t.cup_max
    })
}

fn pinch_ring(f: &FeatureVector, t: &Thresholds) -> bool {
    f.get(P::ThumbTipToIndexTip) < t.pinch_max || f.get(P::ThumbTipToMiddleTip) < t.pinch_max
}

// ════════════════════════════════════════════════════════════════════════════
// Classifier
// ════════════════════════════════════════════════════════════════════════════

/// Walks the rule table top-to-bottom; first match wins.  There is no
/// error path: a vector matching nothing is simply `None`.
#[derive(Clone, Debug)]
pub struct Classifier {
    thresholds: Thresholds,
}

impl Classifier {
    pub fn new(thresholds: Thresholds) -> Self {
        Classifier { thresholds }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn classify(&self, features: &FeatureVector) -> Option<SignLabel> {
        rule_table()
            .iter()
            .find(|rule| rule.matches(features, &self.thresholds))
            .map(|rule| rule.label)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier::new(Thresholds::default())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
