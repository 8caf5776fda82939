//! Monotonic number sequences for document numbering.

use serde::{Deserialize, Serialize};

use kontor_shared::types::SequenceId;

/// A named, strictly increasing number sequence.
///
/// The formatted number is `prefix + current_number + suffix`. The counter
/// only ever moves forward; there is no decrement or reset. Exclusion across
/// concurrent callers is the sequencer service's responsibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sequence {
    /// Unique identifier.
    pub id: SequenceId,
    /// Sequence code (e.g., "transaction").
    pub code: String,
    /// Last issued number.
    pub current_number: i64,
    /// Prefix applied to formatted numbers.
    pub prefix: String,
    /// Suffix applied to formatted numbers.
    pub suffix: String,
}

impl Sequence {
    /// Creates a new sequence starting at `initial`.
    ///
    /// The first issued number will be `initial + 1`.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        initial: i64,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            id: SequenceId::new(),
            code: code.into(),
            current_number: initial,
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Advances the counter and returns the new value.
    pub fn advance(&mut self) -> i64 {
        self.current_number += 1;
        self.current_number
    }

    /// Formats an arbitrary counter value with this sequence's affixes.
    #[must_use]
    pub fn formatted(&self, number: i64) -> String {
        format!("{}{}{}", self.prefix, number, self.suffix)
    }

    /// Advances the counter and returns the formatted number.
    pub fn next_formatted(&mut self) -> String {
        let number = self.advance();
        self.formatted(number)
    }
}
