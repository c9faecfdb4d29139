// Lambda bootstrap for the metric forwarder

use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use metric_sqs::SqsHandler;
use metric_sqs::core::config::SqsHandlerConfig;
use metric_sqs::lambda::function_handler;
use serde_json::Value;
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    metric_sqs::setup_logging();

    // Resolve the queue once per execution environment, not per invocation
    let config = SqsHandlerConfig::from_env();
    let handler = SqsHandler::new(config).await.map_err(|e| {
        error!("Failed to start SQS handler: {}", e);
        e
    })?;

    let handler = &handler;
    run(service_fn(move |event: LambdaEvent<Value>| async move {
        function_handler(handler, event).await
    }))
    .await
}
