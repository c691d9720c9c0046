//! # Subjects: registries that notify observers.
//!
//! This module provides [`Subject`], its [`SubjectBuilder`] and the
//! [`SubscriptionOutcome`] returned by bulk subscription.
//!
//! ## Delivery policies
//! ```text
//! notify()          sequential, registration order, stops at first Err
//!                   [ok] ──► [ok] ──► [Err] ──x  [not called]
//!
//! notify_async()    concurrent on one task, every handler finishes
//!                   [ok]  [Err]  [ok]  ──► all done ──► one Err returned
//! ```

mod builder;
mod dispatch;
mod outcome;
mod registry;

pub use builder::SubjectBuilder;
pub use outcome::SubscriptionOutcome;
pub use registry::Subject;
