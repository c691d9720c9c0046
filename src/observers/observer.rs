//! # Observer traits: the shapes a subject can notify
//!
//! Three traits cover the ways a value can expose an `update` operation:
//!
//! - [`Observe`]: instance with a synchronous `update(&self, ..)`;
//! - [`ObserveAsync`]: instance with an asynchronous `update(&self, ..)`;
//! - [`ObserveStatic`]: type-level handle; `update` is an associated function
//!   with no receiver, so state lives at type level (statics, atomics).
//!
//! Closures and [`Record`](crate::Record)s are the remaining shapes; they do not
//! need a trait. Every shape is wrapped into a [`Candidate`](crate::Candidate) and
//! resolved once, at attach time, into a uniform [`Observer`](crate::Observer) handle.
//!
//! ```text
//!   Arc<impl Observe>       ──┐
//!   Arc<impl ObserveAsync>  ──┤
//!   impl ObserveStatic      ──┼──► Candidate ──attach/add──► Observer ──► Subject registry
//!   Fn(&Subject) closure    ──┤      (capability check)      (uniform)
//!   Arc<Record>             ──┘
//! ```
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use patternkit::{Candidate, Observe, Subject};
//!
//! #[derive(Default)]
//! struct Flag(AtomicBool);
//!
//! impl Observe<u32> for Flag {
//!     fn update(&self, subject: &Subject<u32>) -> anyhow::Result<()> {
//!         self.0.store(*subject.state() > 0, Ordering::SeqCst);
//!         Ok(())
//!     }
//!     fn name(&self) -> &'static str { "flag" }
//! }
//!
//! let flag = Arc::new(Flag::default());
//! let mut subject = Subject::with_state(1u32);
//! subject.attach(Candidate::instance(flag.clone())).unwrap();
//! subject.notify().unwrap();
//! assert!(flag.0.load(Ordering::SeqCst));
//! ```

use async_trait::async_trait;

use crate::subject::Subject;

/// Instance observer with a synchronous `update`.
///
/// ### Implementation requirements
/// - Return `Err` to fail the round; a synchronous round stops at the first error.
/// - Read the subject's current state through [`Subject::state`].
pub trait Observe<S>: Send + Sync + 'static {
    /// Handles one notification from `subject`.
    fn update(&self, subject: &Subject<S>) -> anyhow::Result<()>;

    /// Returns the observer name used in tracing fields and errors.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Instance observer with an asynchronous `update`.
///
/// Only [`Subject::notify_async`] can drive it; a synchronous round that reaches
/// one fails with [`DispatchError::AsyncOnly`](crate::DispatchError::AsyncOnly).
///
/// Suspension points inside `update` (timers, I/O) let the other observers of the
/// round make progress on the same task.
#[async_trait]
pub trait ObserveAsync<S>: Send + Sync + 'static {
    /// Handles one notification from `subject`.
    async fn update(&self, subject: &Subject<S>) -> anyhow::Result<()>;

    /// Returns the observer name used in tracing fields and errors.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Type-level observer: `update` is an associated function.
///
/// The type itself is the observer, so attaching it twice registers the same
/// identity twice (see [`ObserverKey::of_type`](crate::ObserverKey::of_type)).
pub trait ObserveStatic<S>: 'static {
    /// Handles one notification from `subject`.
    fn update(subject: &Subject<S>) -> anyhow::Result<()>;

    /// Returns the observer name used in tracing fields and errors.
    fn name() -> &'static str {
        std::any::type_name::<Self>()
    }
}
