//! # Subject configuration.
//!
//! Provides [`SubjectConfig`], the settings a [`Subject`](crate::Subject) carries for
//! its whole life, and [`FailureSelection`], the tie-break used by
//! [`Subject::notify_async`](crate::Subject::notify_async) when several observers fail
//! in the same round.
//!
//! Config is used in two ways:
//! 1. **Subject creation**: `Subject::builder(config)`
//! 2. **Dispatch**: read by the asynchronous dispatcher when it reduces per-task results

use std::borrow::Cow;

/// Which captured failure an asynchronous round reports.
///
/// Every handler of the round has finished before the selection is made, so the
/// choice never affects which observers run; only which error the caller sees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailureSelection {
    /// Failure of the observer with the lowest registration index (default).
    ///
    /// Deterministic regardless of handler timing.
    #[default]
    FirstScheduled,
    /// Failure that reached its terminal state first.
    ///
    /// Deterministic for a given interleaving; ties on the same poll resolve in
    /// registration order.
    FirstCompleted,
}

/// Configuration of a single subject.
///
/// ## Field semantics
/// - `name`: label attached to tracing events emitted for this subject
/// - `failure_selection`: which failure an async round returns
#[derive(Clone, Debug)]
pub struct SubjectConfig {
    /// Label used in tracing fields.
    pub name: Cow<'static, str>,

    /// Tie-break for asynchronous rounds with more than one failure.
    pub failure_selection: FailureSelection,
}

impl SubjectConfig {
    /// Returns a config with the given label and default policies.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Default for SubjectConfig {
    /// Default configuration:
    ///
    /// - `name = "subject"`
    /// - `failure_selection = FailureSelection::FirstScheduled`
    fn default() -> Self {
        Self {
            name: Cow::Borrowed("subject"),
            failure_selection: FailureSelection::default(),
        }
    }
}
