//! # Bulk subscription report.

use std::fmt;

use crate::observers::{Candidate, Observer};

/// Result of [`Subject::add`](crate::Subject::add).
///
/// Both lists keep the input order of the candidates they came from.
pub struct SubscriptionOutcome<S> {
    /// Candidates accepted into the registry, resolved.
    pub added: Vec<Observer<S>>,
    /// Candidates rejected for lacking a callable `update`.
    pub failed: Vec<Candidate<S>>,
}

impl<S> SubscriptionOutcome<S> {
    /// True if every candidate was accepted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Splits into `(added, failed)`.
    pub fn into_parts(self) -> (Vec<Observer<S>>, Vec<Candidate<S>>) {
        (self.added, self.failed)
    }
}

impl<S> Default for SubscriptionOutcome<S> {
    fn default() -> Self {
        Self {
            added: Vec::new(),
            failed: Vec::new(),
        }
    }
}

impl<S> fmt::Debug for SubscriptionOutcome<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionOutcome")
            .field("added", &self.added)
            .field("failed", &self.failed)
            .finish()
    }
}
