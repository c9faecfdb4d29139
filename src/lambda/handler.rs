use lambda_runtime::{Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::core::models::Metric;
use crate::handler::{DeliveryOutcome, Handler};

/// Metrics delivered to the forwarder in one invocation.
///
/// Structured metrics and Graphite plaintext lines may be mixed. Blank lines are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct MetricBatch {
    #[serde(default)]
    pub metrics: Vec<Metric>,
    #[serde(default)]
    pub lines: Vec<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub received: usize,
    pub sent: usize,
    /// Dropped because no queue was resolved.
    pub dropped: usize,
    pub failed: usize,
    /// Lines that could not be parsed.
    pub skipped: usize,
}

impl BatchSummary {
    fn record(&mut self, outcome: &DeliveryOutcome) {
        match outcome {
            DeliveryOutcome::Sent => self.sent += 1,
            DeliveryOutcome::NoQueue => self.dropped += 1,
            DeliveryOutcome::Failed(_) => self.failed += 1,
        }
    }
}

/// Hand every metric of the batch to `handler`, one at a time.
pub async fn process_batch<H: Handler + ?Sized>(handler: &H, batch: MetricBatch) -> BatchSummary {
    let lines: Vec<&String> = batch.lines.iter().filter(|l| !l.trim().is_empty()).collect();
    let mut summary = BatchSummary {
        received: batch.metrics.len() + lines.len(),
        ..BatchSummary::default()
    };

    for metric in &batch.metrics {
        let outcome = handler.process(metric).await;
        summary.record(&outcome);
    }

    for line in lines {
        match Metric::parse(line) {
            Ok(metric) => {
                let outcome = handler.process(&metric).await;
                summary.record(&outcome);
            }
            Err(e) => {
                warn!("Skipping metric line: {}", e);
                summary.skipped += 1;
            }
        }
    }

    handler.flush().await;
    summary
}

/// Lambda handler for the forwarder entrypoint. Parses the batch and forwards each metric.
pub async fn function_handler<H: Handler + ?Sized>(
    handler: &H,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    let batch: MetricBatch = serde_json::from_value(event.payload).map_err(|e| {
        Error::from(format!("Failed to parse event payload into MetricBatch: {}", e))
    })?;

    let summary = process_batch(handler, batch).await;
    info!(
        received = summary.received,
        sent = summary.sent,
        dropped = summary.dropped,
        failed = summary.failed,
        skipped = summary.skipped,
        "Forwarded metric batch via {}",
        handler.name()
    );

    Ok(serde_json::to_value(&summary)?)
}
