//! Tunable distance thresholds for every rule.

use serde::{Deserialize, Serialize};

/// Distance thresholds, in the same pixel units the feature extractor
/// produces.  Defaults are the hand-tuned values the rule table was
/// calibrated against; they are configuration, not code, so experiments
/// can replace them without touching the predicates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Fist ("A"): thumb tip may be at most this far from the index
    /// knuckle.
    pub fist_thumb_max: f32,
    /// Fist ("A") and flat hand ("B"): adjacent fingertips count as
    /// "together" below this gap.
    pub tips_together_max: f32,
    /// Point ("L"): thumb tip and index tip must be at least this far
    /// apart.
    pub point_spread_min: f32,
    /// Point ("L"): middle/ring/pinky count as curled below this
    /// tip-to-knuckle distance.
    pub point_curl_max: f32,
    /// Flat hand ("B"): every finger's tip-to-knuckle distance must
    /// exceed this.
    pub flat_extension_min: f32,
    /// Curve ("C"): tip-to-knuckle distances must fall strictly inside
    /// `(cup_min, cup_max)`.
    pub cup_min: f32,
    pub cup_max: f32,
    /// Ring ("O"): thumb tip touching index or middle tip below this.
    pub pinch_max: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            fist_thumb_max:     50.0,
            tips_together_max:  40.0,
            point_spread_min:   100.0,
            point_curl_max:     70.0,
            flat_extension_min: 100.0,
            cup_min:            40.0,
            cup_max:            90.0,
            pinch_max:          30.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_bands_ordered() {
        let t = Thresholds::default();
        assert!(t.cup_min < t.cup_max);
        assert!(t.pinch_max < t.fist_thumb_max);
    }

    #[test]
    fn toml_round_trip() {
        let t = Thresholds { pinch_max: 25.0, ..Thresholds::default() };
        let text = toml::to_string(&t).unwrap();
        let back: Thresholds = toml::from_str(&text).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let back: Thresholds = toml::from_str("cup_max = 95.0").unwrap();
        assert_eq!(back.cup_max, 95.0);
        assert_eq!(back.pinch_max, Thresholds::default().pinch_max);
    }
}
