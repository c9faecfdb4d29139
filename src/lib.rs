/// metric-sqs - An output handler that forwards collected metrics to an Amazon SQS queue.
///
/// The handler is built once per agent (or Lambda execution environment):
/// 1. Construction connects to SQS with static credentials and locates the
///    queue whose name matches the configured one exactly
/// 2. Every metric is then encoded as a JSON message and written to that queue
///    with a single attempt; failures are logged and the metric is dropped
///
/// When no queue with the configured name exists the handler still starts, logs
/// a warning, and silently drops every metric it is given.
///
/// # Example
///
/// ```no_run
/// use metric_sqs::core::config::SqsHandlerConfig;
/// use metric_sqs::core::models::Metric;
/// use metric_sqs::{Handler, SqsHandler};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     metric_sqs::setup_logging();
///
///     let config = SqsHandlerConfig {
///         region: "us-east-1".to_string(),
///         access_key: "dummy_access_key".to_string(),
///         secret_key: "dummy_secret_key".to_string(),
///         queue_name: "metrics-queue".to_string(),
///     };
///     let handler = SqsHandler::new(config).await?;
///
///     let metric = Metric::new("servers.a.cpu.load", 0.75, 1000)
///         .with_precision(2)
///         .with_host("a")
///         .with_ttl(60);
///     handler.process(&metric).await;
///
///     Ok(())
/// }
/// ```
// Module declarations
pub mod core;
pub mod errors;
pub mod handler;
pub mod lambda;
pub mod queue;

#[cfg(test)]
mod test_utils;

pub use errors::HandlerError;
pub use handler::{DeliveryOutcome, Handler, SqsHandler};

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. Calling it again once a global subscriber is
/// installed has no effect.
///
/// # Example
///
/// ```
/// metric_sqs::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
