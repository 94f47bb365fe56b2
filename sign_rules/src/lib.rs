//! # sign_rules
//!
//! Deterministic, rule-based recognition of fingerspelled letters from a
//! hand's distance features.  No training, no model files: each letter is
//! a conjunction of threshold predicates over the named distances in
//! [`hand_stream::FeatureVector`], evaluated in a fixed order.
//!
//! ## Letter → shape mapping
//!
//! | Letter | Shape | Key conditions |
//! |---|---|---|
//! | A | closed fist, thumb at index knuckle | thumb↔index-knuckle short, fingertips together |
//! | L | index up, thumb out | thumb↔index-tip long, other fingers curled |
//! | B | flat hand, fingers together | all four fingers extended, fingertips together |
//! | C | curved hand | all four finger extensions inside a middle band |
//! | O | pinched ring | thumb tip touching index or middle tip |
//!
//! Evaluation is strictly top-to-bottom and the **first** matching rule
//! wins; once a rule fires, later rules are never consulted.  The order
//! above is observable behavior and part of the crate's contract.
//!
//! Every threshold lives in [`Thresholds`] (serde-derived, with the tuned
//! defaults), so an experiment can swap constants through configuration
//! instead of editing predicates.

pub mod label;
pub mod rules;
pub mod thresholds;

pub use label::SignLabel;
pub use rules::{rule_table, Classifier, Rule};
pub use thresholds::Thresholds;
