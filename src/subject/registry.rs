//! # Subject: subscription registry and synchronous dispatch.
//!
//! [`Subject`] owns an ordered list of resolved observers and a state payload.
//!
//! ## Lifecycle
//! ```text
//! Subject::new() ──► attach/add ──► set_state ──► notify / notify_async
//!                       ▲                                │
//!                       └──────── detach, repeat ◄───────┘
//! ```
//!
//! ## Rules
//! - Registration order is delivery order for [`Subject::notify`].
//! - Duplicates are allowed; `detach` removes the first match only.
//! - A rejected candidate never changes the registry.
//! - Observers read the state current at notify time.
//! - `notify`/`notify_async` borrow the subject immutably, so the registry
//!   cannot change while a round is in flight.

use std::fmt;

use super::builder::SubjectBuilder;
use super::outcome::SubscriptionOutcome;
use crate::config::SubjectConfig;
use crate::error::SubscriptionError;
use crate::observers::{Candidate, Observer, ObserverKey, UPDATE};

/// Owner of observer registrations and a state payload.
pub struct Subject<S> {
    pub(super) observers: Vec<Observer<S>>,
    state: S,
    pub(super) cfg: SubjectConfig,
}

impl<S: fmt::Debug> fmt::Debug for Subject<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subject")
            .field("name", &self.cfg.name)
            .field("observers", &self.observers)
            .field("state", &self.state)
            .finish()
    }
}

impl<S: Default> Default for Subject<S> {
    fn default() -> Self {
        Self::with_state(S::default())
    }
}

impl<S> Subject<S> {
    /// Creates an empty subject with `S::default()` state.
    pub fn new() -> Self
    where
        S: Default,
    {
        Self::default()
    }

    /// Creates an empty subject holding `state`.
    pub fn with_state(state: S) -> Self {
        Self::from_parts(SubjectConfig::default(), state, Vec::new())
    }

    /// Returns a builder for a configured subject.
    pub fn builder(cfg: SubjectConfig) -> SubjectBuilder<S> {
        SubjectBuilder::new(cfg)
    }

    pub(super) fn from_parts(cfg: SubjectConfig, state: S, observers: Vec<Observer<S>>) -> Self {
        Self {
            observers,
            state,
            cfg,
        }
    }

    /// Subscribes one observer; fails fast on an incompatible candidate.
    ///
    /// # Errors
    /// [`SubscriptionError::IncompatibleObserver`] if the candidate has no callable
    /// `update`. The registry is left untouched.
    pub fn attach(&mut self, candidate: Candidate<S>) -> Result<(), SubscriptionError> {
        match candidate.into_observer() {
            Ok(observer) => {
                tracing::debug!(
                    subject = %self.cfg.name,
                    observer = observer.name(),
                    "observer attached"
                );
                self.observers.push(observer);
                Ok(())
            }
            Err(rejected) => {
                tracing::debug!(
                    subject = %self.cfg.name,
                    observer = rejected.name(),
                    "observer rejected"
                );
                Err(SubscriptionError::IncompatibleObserver {
                    observer: rejected.name().to_owned(),
                    capability: UPDATE,
                })
            }
        }
    }

    /// Unsubscribes the first observer whose identity is `key`.
    ///
    /// # Errors
    /// [`SubscriptionError::NotFound`] if no subscribed observer has that key.
    pub fn detach(&mut self, key: ObserverKey) -> Result<Observer<S>, SubscriptionError> {
        let index = self
            .observers
            .iter()
            .position(|o| o.key() == key)
            .ok_or(SubscriptionError::NotFound { key })?;
        let observer = self.observers.remove(index);
        tracing::debug!(
            subject = %self.cfg.name,
            observer = observer.name(),
            "observer detached"
        );
        Ok(observer)
    }

    /// Subscribes many observers, skipping incompatible ones.
    ///
    /// Accepted candidates are appended in input order; rejected ones are
    /// returned in [`SubscriptionOutcome::failed`]. Never fails.
    pub fn add<I>(&mut self, candidates: I) -> SubscriptionOutcome<S>
    where
        I: IntoIterator<Item = Candidate<S>>,
    {
        let mut outcome = SubscriptionOutcome::default();
        for candidate in candidates {
            match candidate.into_observer() {
                Ok(observer) => {
                    tracing::debug!(
                        subject = %self.cfg.name,
                        observer = observer.name(),
                        "observer attached"
                    );
                    self.observers.push(observer.clone());
                    outcome.added.push(observer);
                }
                Err(rejected) => {
                    tracing::debug!(
                        subject = %self.cfg.name,
                        observer = rejected.name(),
                        "observer rejected"
                    );
                    outcome.failed.push(rejected);
                }
            }
        }
        tracing::debug!(
            subject = %self.cfg.name,
            added = outcome.added.len(),
            failed = outcome.failed.len(),
            "observers added"
        );
        outcome
    }

    /// Current state payload.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Mutable access to the state payload.
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Replaces the state payload, returning the previous one.
    pub fn set_state(&mut self, state: S) -> S {
        std::mem::replace(&mut self.state, state)
    }

    /// Subscribed observers in delivery order.
    pub fn observers(&self) -> &[Observer<S>] {
        &self.observers
    }

    /// Number of subscriptions (duplicates counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// True if nothing is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// True if an observer with `key` is subscribed.
    #[must_use]
    pub fn contains(&self, key: ObserverKey) -> bool {
        self.observers.iter().any(|o| o.key() == key)
    }

    /// Configuration this subject was built with.
    pub fn config(&self) -> &SubjectConfig {
        &self.cfg
    }
}

impl<S: Send + Sync + 'static> Subject<S> {
    /// Notifies every observer in registration order, stopping at the first failure.
    ///
    /// Observers after the failing one are not invoked. The observer's error is
    /// returned unchanged; use `downcast_ref` to match on its original type.
    ///
    /// # Errors
    /// The first observer error, or [`DispatchError::AsyncOnly`](crate::DispatchError::AsyncOnly)
    /// when an observer can only be driven by [`notify_async`](Self::notify_async).
    pub fn notify(&self) -> anyhow::Result<()> {
        tracing::trace!(
            subject = %self.cfg.name,
            observers = self.observers.len(),
            "notify"
        );
        for (index, observer) in self.observers.iter().enumerate() {
            if let Err(err) = observer.call(self) {
                tracing::debug!(
                    subject = %self.cfg.name,
                    observer = observer.name(),
                    index,
                    skipped = self.observers.len() - index - 1,
                    "observer failed; round stopped"
                );
                return Err(err);
            }
        }
        Ok(())
    }
}
