//! Error types used by subjects, dispatchers and registries.
//!
//! This module defines the library-raised error enums:
//!
//! - [`SubscriptionError`]: errors raised while managing a subject's observers.
//! - [`DispatchError`]: errors raised by a dispatcher itself (never by an observer).
//! - [`RegistryError`]: errors raised by [`SubclassRegistry`](crate::SubclassRegistry).
//!
//! Errors returned by observers are **not** part of this module: they travel as
//! [`anyhow::Error`] and are handed back to the caller of `notify`/`notify_async`
//! unchanged, so the original type can be recovered with `downcast_ref`.
//!
//! Every enum provides helper methods (`as_label`, `as_message`) for logs.

use thiserror::Error;

use crate::observers::ObserverKey;

/// # Errors produced while managing subscriptions.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// Candidate lacks a callable capability required of every observer.
    #[error("attached observer {observer:?} does not have a callable '{capability}' method")]
    IncompatibleObserver {
        /// Name of the rejected candidate.
        observer: String,
        /// Name of the missing capability (always `update`).
        capability: &'static str,
    },

    /// Observer is not currently subscribed.
    #[error("observer {key:?} is not subscribed")]
    NotFound {
        /// Identity that was looked up.
        key: ObserverKey,
    },
}

impl SubscriptionError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use patternkit::{ObserverKey, SubscriptionError};
    ///
    /// struct Probe;
    /// let err = SubscriptionError::NotFound { key: ObserverKey::of_type::<Probe>() };
    /// assert_eq!(err.as_label(), "subscription_not_found");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            SubscriptionError::IncompatibleObserver { .. } => "subscription_incompatible",
            SubscriptionError::NotFound { .. } => "subscription_not_found",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            SubscriptionError::IncompatibleObserver {
                observer,
                capability,
            } => format!("incompatible: {observer} lacks callable '{capability}'"),
            SubscriptionError::NotFound { key } => format!("not found: {key:?}"),
        }
    }
}

/// # Errors raised by a dispatcher on its own behalf.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// A synchronous round reached an observer whose `update` is asynchronous only.
    #[error("observer {observer:?} only has an asynchronous 'update'; use notify_async")]
    AsyncOnly {
        /// Name of the observer that could not be driven.
        observer: String,
    },
}

impl DispatchError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            DispatchError::AsyncOnly { .. } => "dispatch_async_only",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            DispatchError::AsyncOnly { observer } => format!("async only: {observer}"),
        }
    }
}

/// # Errors produced by a [`SubclassRegistry`](crate::SubclassRegistry).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RegistryError {
    /// No constructor is registered under the requested identifier.
    #[error("bad subclass request; requested identifier {requested:?}, but known identifiers are {known:?}")]
    UnknownIdentifier {
        /// Requested identifier.
        requested: String,
        /// Identifiers known at lookup time (sorted).
        known: Vec<String>,
    },

    /// The registered constructor failed.
    #[error("failed to create instance registered as {identifier:?}: {source}")]
    Instantiation {
        /// Identifier whose constructor failed.
        identifier: String,
        /// Error returned by the constructor.
        #[source]
        source: anyhow::Error,
    },
}

impl RegistryError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use patternkit::RegistryError;
    ///
    /// let err = RegistryError::UnknownIdentifier { requested: "x".into(), known: vec![] };
    /// assert_eq!(err.as_label(), "registry_unknown_identifier");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RegistryError::UnknownIdentifier { .. } => "registry_unknown_identifier",
            RegistryError::Instantiation { .. } => "registry_instantiation",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RegistryError::UnknownIdentifier { requested, known } => {
                format!("unknown identifier {requested}; known=[{}]", known.join(", "))
            }
            RegistryError::Instantiation { identifier, source } => {
                format!("instantiation of {identifier} failed: {source}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incompatible_names_the_capability() {
        let err = SubscriptionError::IncompatibleObserver {
            observer: "typo".into(),
            capability: "update",
        };
        assert_eq!(
            err.to_string(),
            "attached observer \"typo\" does not have a callable 'update' method"
        );
        assert_eq!(err.as_label(), "subscription_incompatible");
    }

    #[test]
    fn instantiation_keeps_source() {
        let err = RegistryError::Instantiation {
            identifier: "child".into(),
            source: anyhow::anyhow!("bad args"),
        };
        assert!(err.to_string().contains("bad args"));
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("bad args"));
    }
}
