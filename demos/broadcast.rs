//! # Example: Broadcast
//!
//! Broadcasts one state change to a logger, a closure, a record and an async
//! observer, first sequentially and then concurrently.
//!
//! Run with: `cargo run --example broadcast --features logging`

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use patternkit::{Candidate, LogWriter, ObserveAsync, Record, Subject, SubjectConfig};

/// Observer that waits before acknowledging.
struct SlowAck {
    delay: Duration,
}

#[async_trait]
impl ObserveAsync<Option<&'static str>> for SlowAck {
    async fn update(&self, subject: &Subject<Option<&'static str>>) -> anyhow::Result<()> {
        tokio::time::sleep(self.delay).await;
        println!("[slow-ack] {:?} after {:?}", subject.state(), self.delay);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "slow-ack"
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let mut subject: Subject<Option<&'static str>> =
        Subject::builder(SubjectConfig::named("orders")).build();

    let audit = Record::new("audit")
        .with_field("channel", "ops")
        .with_method("update", |s: &Subject<Option<&'static str>>| {
            println!("[audit] saw {:?}", s.state());
            Ok(())
        });
    // No `update` member: rejected.
    let mute = Record::new("mute").with_field("channel", "none");

    let outcome = subject.add(vec![
        Candidate::instance(Arc::new(LogWriter::new())),
        Candidate::from_fn("printer", |s: &Subject<Option<&'static str>>| {
            println!("[printer] {:?}", s.state());
            Ok(())
        }),
        Candidate::record(Arc::new(audit)),
        Candidate::record(Arc::new(mute)),
    ]);
    for rejected in &outcome.failed {
        println!("[demo] rejected {}", rejected.name());
    }

    subject.set_state(Some("event-object-A"));
    subject.notify()?;

    subject.attach(Candidate::instance_async(Arc::new(SlowAck {
        delay: Duration::from_millis(50),
    })))?;
    subject.set_state(Some("event-object-B"));
    subject.notify_async().await?;

    Ok(())
}
