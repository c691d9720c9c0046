//! # patternkit
//!
//! **patternkit** is a small library of generic design-pattern helpers for Rust.
//!
//! Its core is an in-process publish/subscribe primitive: a [`Subject`] holds
//! a state payload and an ordered list of observers, and notifies them either
//! sequentially ([`Subject::notify`]) or concurrently on the calling task
//! ([`Subject::notify_async`]). Around it sit a few lookup/delegation helpers:
//! [`ObjectPool`], [`Proxy`], [`Singletons`] and [`SubclassRegistry`].
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   Arc<impl Observe>   impl ObserveStatic   Fn(&Subject)   Arc<Record>
//!          │                   │                  │              │
//!          ▼                   ▼                  ▼              ▼
//!     ┌──────────────────────────────────────────────────────────────┐
//!     │ Candidate (capability check: callable `update`?)             │
//!     └──────┬───────────────────────────────────────────┬───────────┘
//!            │ compatible                                │ incompatible
//!            ▼                                           ▼
//!     ┌──────────────────────────────┐        attach → SubscriptionError
//!     │ Subject<S>                   │        add    → SubscriptionOutcome.failed
//!     │  - observers: Vec<Observer>  │
//!     │  - state: S                  │
//!     │  - cfg: SubjectConfig        │
//!     └──────┬───────────────┬───────┘
//!            ▼               ▼
//!        notify()      notify_async()
//!      (fail-fast)    (all run, one Err)
//! ```
//!
//! ### Notification round
//! ```text
//! notify():
//!   for observer in registration order
//!     ├─ Ok  ──► next
//!     └─ Err ──► return Err unchanged (later observers not called)
//!
//! notify_async():
//!   start every observer's update on the current task
//!   wait until all are Ok/Err
//!   ├─ no Err  ──► Ok(())
//!   └─ any Err ──► one Err, chosen by FailureSelection (default: lowest index)
//! ```
//!
//! ## Features
//! | Area              | Description                                                   | Key types / traits                              |
//! |-------------------|---------------------------------------------------------------|-------------------------------------------------|
//! | **Observers**     | Shapes that can be notified, capability check.                | [`Observe`], [`ObserveAsync`], [`ObserveStatic`], [`Candidate`], [`Record`] |
//! | **Subjects**      | Registry, sync and async dispatch, bulk report.               | [`Subject`], [`SubscriptionOutcome`]            |
//! | **Configuration** | Per-subject label and async failure tie-break.                | [`SubjectConfig`], [`FailureSelection`]         |
//! | **Errors**        | Typed errors for subscriptions, dispatch and registries.      | [`SubscriptionError`], [`DispatchError`], [`RegistryError`] |
//! | **Patterns**      | Object pool, proxy, singleton container, subclass registry.   | [`ObjectPool`], [`Proxy`], [`Singletons`], [`SubclassRegistry`] |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] observer _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use patternkit::{Candidate, Subject};
//!
//! let called = Arc::new(AtomicBool::new(false));
//! let flag = Arc::clone(&called);
//!
//! let mut subject = Subject::with_state(String::new());
//! subject
//!     .attach(Candidate::from_fn("printer", move |s: &Subject<String>| {
//!         flag.store(s.state() == "event-object-A", Ordering::SeqCst);
//!         Ok(())
//!     }))
//!     .unwrap();
//!
//! subject.set_state("event-object-A".to_string());
//! subject.notify().unwrap();
//! assert!(called.load(Ordering::SeqCst));
//! ```
mod config;
mod error;
mod observers;
mod patterns;
mod subject;

// ---- Public re-exports ----

pub use config::{FailureSelection, SubjectConfig};
pub use error::{DispatchError, RegistryError, SubscriptionError};
pub use observers::{
    is_observer, Candidate, Member, Observe, ObserveAsync, ObserveStatic, Observer, ObserverKey,
    Record, UpdateFn, UPDATE,
};
pub use patterns::{Intercept, ObjectPool, Proxy, Singletons, SubclassRegistry};
pub use subject::{Subject, SubjectBuilder, SubscriptionOutcome};

// Optional: expose a simple built-in logger observer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use observers::LogWriter;
