//! Demo traffic generator for the in-memory broker.

use super::{AdminClient, BrokerError, CancellationToken, ClientFactory, StreamClient};
use crate::schemas::OutboundRecord;
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedPlan {
    pub stream: String,
    /// Messages published up front.
    pub count: u64,
    /// When set, keep publishing this many messages per second (in one burst
    /// per second) until cancelled.
    pub rate_per_sec: Option<u64>,
}

/// Build the `i`-th demo message for `stream`.
pub fn seed_message(stream: &str, i: u64) -> OutboundRecord {
    let value = serde_json::json!({
        "id": i,
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        "message": format!(
            "This is test message number {i} with some additional data to make it more \
             realistic. Lorem ipsum dolor sit amet, consectetur adipiscing elit."
        ),
    });
    OutboundRecord {
        stream: stream.to_string(),
        partition: None,
        key: Some(format!("key-{i}").into_bytes()),
        value: value.to_string().into_bytes(),
        headers: Vec::new(),
    }
}

/// Create the plan's stream (if needed) and publish into it.
///
/// Returns the number of messages published.
pub fn seed_stream(
    admin: &dyn AdminClient,
    clients: &dyn ClientFactory,
    plan: &SeedPlan,
    cancel: &CancellationToken,
) -> Result<u64, BrokerError> {
    match admin.create_stream(&plan.stream) {
        Ok(()) | Err(BrokerError::AlreadyExists(_)) => {}
        Err(err) => return Err(err),
    }

    let client = clients.connect()?;
    let mut next = 0u64;
    publish_range(client.as_ref(), &plan.stream, &mut next, plan.count, cancel)?;
    tracing::info!(stream = %plan.stream, published = next, "seeded stream");

    let Some(rate) = plan.rate_per_sec.filter(|r| *r > 0) else {
        return Ok(next);
    };
    while !cancel.wait_timeout(Duration::from_secs(1)) {
        let target = next + rate;
        publish_range(client.as_ref(), &plan.stream, &mut next, target, cancel)?;
    }
    Ok(next)
}

fn publish_range(
    client: &dyn StreamClient,
    stream: &str,
    next: &mut u64,
    end: u64,
    cancel: &CancellationToken,
) -> Result<(), BrokerError> {
    while *next < end {
        if cancel.is_cancelled() {
            break;
        }
        client.publish(seed_message(stream, *next))?;
        *next += 1;
    }
    Ok(())
}

/// Run [`seed_stream`] on a background thread.
pub fn spawn_seeder(
    admin: Arc<dyn AdminClient>,
    clients: Arc<dyn ClientFactory>,
    plan: SeedPlan,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    thread::spawn(move || {
        if let Err(err) = seed_stream(admin.as_ref(), clients.as_ref(), &plan, &cancel) {
            tracing::error!(stream = %plan.stream, error = %err, "seeding failed");
        }
    })
}
