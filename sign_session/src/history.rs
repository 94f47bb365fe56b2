//! Bounded, newest-first record of recognized letters.

use std::collections::VecDeque;

use sign_rules::SignLabel;
use time::OffsetDateTime;

/// Maximum entries retained; the oldest falls off beyond this.
pub const HISTORY_CAP: usize = 10;

/// One recognized letter and when it was recognized.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    pub label: SignLabel,
    pub timestamp: OffsetDateTime,
}

/// Ordered newest-first, capped at [`HISTORY_CAP`].
///
/// Insertion suppresses *adjacent* duplicates only: a letter equal to the
/// current newest entry is skipped, but the same letter may appear again
/// later once something else has been recorded in between.
#[derive(Debug, Default)]
pub struct HistoryLedger {
    entries: VecDeque<HistoryEntry>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        HistoryLedger::default()
    }

    /// Append under the suppression rule.  Returns whether an entry was
    /// actually added.
    pub fn record(&mut self, label: SignLabel, timestamp: OffsetDateTime) -> bool {
        if self.entries.front().is_some_and(|newest| newest.label == label) {
            return false;
        }
        self.entries.push_front(HistoryEntry { label, timestamp });
        self.entries.truncate(HISTORY_CAP);
        true
    }

    /// Snapshot, newest first.
    pub fn list(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn newest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
