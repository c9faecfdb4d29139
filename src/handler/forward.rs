use tracing::{debug, warn};

use crate::core::models::{MetricSample, OutboundMessage};
use crate::errors::HandlerError;
use crate::queue::{QueueHandle, QueueService};

/// What happened to a single metric handed to [`forward`].
#[derive(Debug)]
pub enum DeliveryOutcome {
    /// Written to the queue.
    Sent,
    /// No queue was resolved; the metric was dropped without a network call.
    NoQueue,
    /// The write (or the encoding before it) failed; the metric was dropped.
    Failed(HandlerError),
}

impl DeliveryOutcome {
    #[must_use]
    pub fn is_sent(&self) -> bool {
        matches!(self, DeliveryOutcome::Sent)
    }
}

/// Send one metric to the resolved queue.
///
/// Makes at most one write attempt and never returns an error: failures are
/// logged as warnings and the metric is discarded. The handle is left as is.
pub async fn forward<S, M>(
    service: &S,
    queue: Option<&QueueHandle>,
    sample: &M,
) -> DeliveryOutcome
where
    S: QueueService + ?Sized,
    M: MetricSample + ?Sized,
{
    let Some(queue) = queue else {
        return DeliveryOutcome::NoQueue;
    };

    let message = OutboundMessage::from_sample(sample);
    let body = match message.to_body() {
        Ok(body) => body,
        Err(e) => {
            warn!("Unable to log message: {}", e);
            return DeliveryOutcome::Failed(e);
        }
    };

    match service.send_message(queue.url(), body).await {
        Ok(()) => {
            debug!(metric = %message.metric, queue = queue.name(), "Sent metric to SQS");
            DeliveryOutcome::Sent
        }
        Err(e) => {
            warn!("Unable to log message: {}", e);
            DeliveryOutcome::Failed(e)
        }
    }
}
