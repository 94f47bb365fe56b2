//! The closed alphabet of recognizable letters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A recognized fingerspelled letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignLabel {
    A,
    B,
    C,
    L,
    O,
}

/// Every label, in rule-table order.
pub const ALL_LABELS: [SignLabel; 5] = [
    SignLabel::A,
    SignLabel::L,
    SignLabel::B,
    SignLabel::C,
    SignLabel::O,
];

impl SignLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignLabel::A => "A",
            SignLabel::B => "B",
            SignLabel::C => "C",
            SignLabel::L => "L",
            SignLabel::O => "O",
        }
    }
}

impl fmt::Display for SignLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
