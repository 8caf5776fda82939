//! Atomic document number issuing.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tracing::{debug, info};

use kontor_core::ledger::LedgerError;
use kontor_core::sequence::Sequence;

use crate::keyed_lock::KeyedLock;

/// Issues unique, monotonically increasing, formatted numbers per named
/// sequence.
pub trait Sequencer: Send + Sync {
    /// Registers a new counter.
    ///
    /// # Errors
    ///
    /// Returns `SequenceExists` if the code is already registered.
    fn create_sequence(
        &self,
        code: &str,
        initial: i64,
        prefix: &str,
        suffix: &str,
    ) -> Result<(), LedgerError>;

    /// Advances the counter for `code` and returns the formatted number.
    ///
    /// Under N concurrent callers for the same code, all N calls observe
    /// distinct, contiguous counter values with no gaps or duplicates.
    ///
    /// # Errors
    ///
    /// Returns `SequenceNotFound` for an unregistered code.
    fn next_number(&self, code: &str) -> Result<String, LedgerError>;

    /// Returns the current counter value without advancing it.
    ///
    /// # Errors
    ///
    /// Returns `SequenceNotFound` for an unregistered code.
    fn peek(&self, code: &str) -> Result<i64, LedgerError>;
}

/// In-memory sequencer.
///
/// Each counter is advanced under its own per-code lock, so concurrent
/// callers of different sequences only contend on the brief registry
/// lookup. Counters are never decremented or reset.
#[derive(Debug, Default)]
pub struct MemorySequencer {
    sequences: RwLock<HashMap<String, Sequence>>,
    locks: KeyedLock,
}

impl MemorySequencer {
    /// Creates a sequencer with no registered sequences.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Sequencer for MemorySequencer {
    fn create_sequence(
        &self,
        code: &str,
        initial: i64,
        prefix: &str,
        suffix: &str,
    ) -> Result<(), LedgerError> {
        let mut sequences = self
            .sequences
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if sequences.contains_key(code) {
            return Err(LedgerError::SequenceExists(code.to_string()));
        }

        info!(code, initial, "sequence created");
        sequences.insert(code.to_string(), Sequence::new(code, initial, prefix, suffix));
        Ok(())
    }

    fn next_number(&self, code: &str) -> Result<String, LedgerError> {
        self.locks.with(code, || {
            let mut sequences = self
                .sequences
                .write()
                .unwrap_or_else(PoisonError::into_inner);

            let sequence = sequences
                .get_mut(code)
                .ok_or_else(|| LedgerError::SequenceNotFound(code.to_string()))?;

            let number = sequence.next_formatted();
            debug!(code, %number, "sequence number issued");
            Ok(number)
        })
    }

    fn peek(&self, code: &str) -> Result<i64, LedgerError> {
        let sequences = self.sequences.read().unwrap_or_else(PoisonError::into_inner);
        sequences
            .get(code)
            .map(|s| s.current_number)
            .ok_or_else(|| LedgerError::SequenceNotFound(code.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unregistered_code_fails() {
        let sequencer = MemorySequencer::new();
        assert!(matches!(
            sequencer.next_number("missing"),
            Err(LedgerError::SequenceNotFound(_))
        ));
        assert!(matches!(
            sequencer.peek("missing"),
            Err(LedgerError::SequenceNotFound(_))
        ));
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let sequencer = MemorySequencer::new();
        sequencer.create_sequence("transaction", 0, "TXN-", "").unwrap();
        assert!(matches!(
            sequencer.create_sequence("transaction", 10, "T-", ""),
            Err(LedgerError::SequenceExists(_))
        ));
    }

    #[test]
    fn test_numbers_are_formatted_and_increasing() {
        let sequencer = MemorySequencer::new();
        sequencer.create_sequence("transaction", 100, "TXN-", "").unwrap();

        assert_eq!(sequencer.next_number("transaction").unwrap(), "TXN-101");
        assert_eq!(sequencer.next_number("transaction").unwrap(), "TXN-102");
        assert_eq!(sequencer.peek("transaction").unwrap(), 102);
    }

    #[test]
    fn test_codes_are_independent() {
        let sequencer = MemorySequencer::new();
        sequencer.create_sequence("transaction", 0, "TXN-", "").unwrap();
        sequencer.create_sequence("ledger_entry", 0, "LED-", "").unwrap();

        assert_eq!(sequencer.next_number("transaction").unwrap(), "TXN-1");
        assert_eq!(sequencer.next_number("ledger_entry").unwrap(), "LED-1");
        assert_eq!(sequencer.next_number("transaction").unwrap(), "TXN-2");
    }

    #[test]
    fn test_peek_does_not_advance() {
        let sequencer = MemorySequencer::new();
        sequencer.create_sequence("transaction", 5, "", "").unwrap();

        assert_eq!(sequencer.peek("transaction").unwrap(), 5);
        assert_eq!(sequencer.peek("transaction").unwrap(), 5);
        assert_eq!(sequencer.next_number("transaction").unwrap(), "6");
    }
}
