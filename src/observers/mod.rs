//! # Observers: the values a subject notifies
//!
//! This module provides the observer traits, the [`Candidate`] wrapper with its
//! capability check, structural [`Record`]s and the resolved [`Observer`] handle.
//!
//! ## Shapes
//! - **Instances** implementing [`Observe`] or [`ObserveAsync`]
//! - **Type-level handles** implementing [`ObserveStatic`]
//! - **Closures** `Fn(&Subject<S>) -> anyhow::Result<()>`
//! - **Records** carrying an `update` method among arbitrary members
//!
//! Optional: [`LogWriter`] (feature `logging`) prints the subject's state.

mod candidate;
#[cfg(feature = "logging")]
mod log;
mod observer;
mod record;

pub use candidate::{is_observer, Candidate, Observer, ObserverKey, UpdateFn, UPDATE};
#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use observer::{Observe, ObserveAsync, ObserveStatic};
pub use record::{Member, Record};
