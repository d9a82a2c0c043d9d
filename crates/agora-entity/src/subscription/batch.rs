//! Batch unsubscribe outcome.

use serde::{Deserialize, Serialize};

use agora_core::types::id::ThreadId;

/// Outcome of a batch unsubscribe.
///
/// Removal is attempted per thread id; ids that had no subscription and
/// ids whose removal hit a store error are reported separately so the
/// caller can tell the batch was only partially processed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchRemoval {
    /// Number of subscriptions actually removed.
    pub removed: u64,
    /// Ids for which no subscription existed.
    pub missing: Vec<ThreadId>,
    /// Ids whose removal failed at the store level.
    pub failed: Vec<ThreadId>,
}

impl BatchRemoval {
    /// Whether every requested id was removed.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.failed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_when_nothing_missing_or_failed() {
        let outcome = BatchRemoval {
            removed: 3,
            ..Default::default()
        };
        assert!(outcome.is_complete());
    }

    #[test]
    fn test_incomplete_when_an_id_was_missing() {
        let outcome = BatchRemoval {
            removed: 2,
            missing: vec![ThreadId::new()],
            failed: Vec::new(),
        };
        assert!(!outcome.is_complete());
    }
}
