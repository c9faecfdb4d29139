use async_trait::async_trait;
use tracing::info;

use super::forward::{DeliveryOutcome, forward};
use crate::core::config::SqsHandlerConfig;
use crate::core::models::MetricSample;
use crate::errors::HandlerError;
use crate::queue::{QueueHandle, QueueService, SqsQueueService, resolve};

/// Output adapter interface the collection agent drives.
#[async_trait]
pub trait Handler: Send + Sync {
    fn name(&self) -> &'static str;

    /// Deliver one metric. Never fails; the outcome is informational.
    async fn process(&self, metric: &dyn MetricSample) -> DeliveryOutcome;

    /// Push out anything buffered. Handlers that write through need not override this.
    async fn flush(&self) {}
}

/// Sends every metric to an SQS queue located once at construction.
pub struct SqsHandler<S = SqsQueueService> {
    config: SqsHandlerConfig,
    service: S,
    queue: Option<QueueHandle>,
}

impl SqsHandler<SqsQueueService> {
    /// Connect to SQS with the configured credentials and locate the queue.
    ///
    /// # Errors
    ///
    /// Returns an error if the queue listing fails. A queue that simply does
    /// not exist is not an error: the handler then drops every metric.
    pub async fn new(config: SqsHandlerConfig) -> Result<Self, HandlerError> {
        let service = SqsQueueService::connect(&config).await;
        Self::with_service(config, service).await
    }
}

impl<S: QueueService> SqsHandler<S> {
    /// # Errors
    ///
    /// Returns an error if the queue listing fails.
    pub async fn with_service(config: SqsHandlerConfig, service: S) -> Result<Self, HandlerError> {
        let queue = resolve(&service, &config.queue_name).await?;
        info!(
            queue = %config.queue_name,
            resolved = queue.is_some(),
            "SQS handler ready"
        );
        Ok(Self {
            config,
            service,
            queue,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SqsHandlerConfig {
        &self.config
    }

    /// The resolved queue, or `None` when running in no-op mode.
    #[must_use]
    pub fn queue(&self) -> Option<&QueueHandle> {
        self.queue.as_ref()
    }

    #[must_use]
    pub fn service(&self) -> &S {
        &self.service
    }
}

#[async_trait]
impl<S: QueueService> Handler for SqsHandler<S> {
    fn name(&self) -> &'static str {
        "SQSHandler"
    }

    async fn process(&self, metric: &dyn MetricSample) -> DeliveryOutcome {
        forward(&self.service, self.queue.as_ref(), metric).await
    }
}
