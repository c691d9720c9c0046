//! # LogWriter: simple state printer
//!
//! A minimal observer that prints the subject it is notified by to stdout.
//! Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! [notify] subject="orders" observers=3 state=Some("event-object-A")
//! ```

use std::fmt;

use crate::observers::Observe;
use crate::subject::Subject;

/// State writer observer.
///
/// Enabled via the `logging` feature.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl<S> Observe<S> for LogWriter
where
    S: fmt::Debug + Send + Sync + 'static,
{
    fn update(&self, subject: &Subject<S>) -> anyhow::Result<()> {
        println!(
            "[notify] subject={:?} observers={} state={:?}",
            subject.config().name,
            subject.len(),
            subject.state()
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
