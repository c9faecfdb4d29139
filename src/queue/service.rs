use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, ConfigLoader};
use aws_sdk_sqs::Client as SqsClient;
use aws_sdk_sqs::config::{Credentials, Region};
use aws_sdk_sqs::error::DisplayErrorContext;
use tracing::{debug, info};

use crate::core::config::SqsHandlerConfig;
use crate::errors::HandlerError;

/// Largest page `ListQueues` accepts.
const LIST_PAGE_SIZE: i32 = 1000;

/// The two queue operations the handler relies on.
#[async_trait]
pub trait QueueService: Send + Sync {
    /// URLs of every queue whose name starts with `prefix`.
    async fn list_queues(&self, prefix: &str) -> Result<Vec<String>, HandlerError>;

    /// Write one raw message body to the queue at `queue_url`.
    async fn send_message(&self, queue_url: &str, body: String) -> Result<(), HandlerError>;
}

/// `QueueService` backed by Amazon SQS.
#[derive(Debug, Clone)]
pub struct SqsQueueService {
    client: SqsClient,
}

impl SqsQueueService {
    #[must_use]
    pub fn new(client: SqsClient) -> Self {
        Self { client }
    }

    /// Build an SQS client for the configured region using the configured
    /// static credentials. Nothing is sent over the network here.
    ///
    /// SDK retries are disabled: every request is made exactly once.
    pub async fn connect(config: &SqsHandlerConfig) -> Self {
        let shared_config = Self::loader(config).load().await;

        info!(region = %config.region, "Created SQS client");
        Self::new(SqsClient::new(&shared_config))
    }

    /// Like [`SqsQueueService::connect`], against an SQS-compatible endpoint
    /// such as ElasticMQ or LocalStack.
    pub async fn connect_to_endpoint(config: &SqsHandlerConfig, endpoint_url: &str) -> Self {
        let shared_config = Self::loader(config)
            .endpoint_url(endpoint_url)
            .load()
            .await;

        info!(region = %config.region, endpoint_url, "Created SQS client");
        Self::new(SqsClient::new(&shared_config))
    }

    fn loader(config: &SqsHandlerConfig) -> ConfigLoader {
        let credentials = Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            "metric-sqs",
        );
        aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .retry_config(RetryConfig::disabled())
    }
}

#[async_trait]
impl QueueService for SqsQueueService {
    async fn list_queues(&self, prefix: &str) -> Result<Vec<String>, HandlerError> {
        let mut queue_urls = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let resp = self
                .client
                .list_queues()
                .set_queue_name_prefix((!prefix.is_empty()).then(|| prefix.to_string()))
                // SQS only pages (returns NextToken) when MaxResults is set
                .max_results(LIST_PAGE_SIZE)
                .set_next_token(next_token.take())
                .send()
                .await?;

            queue_urls.extend(resp.queue_urls.unwrap_or_default());
            match resp.next_token {
                Some(token) if !token.is_empty() => next_token = Some(token),
                _ => break,
            }
        }

        debug!(prefix, count = queue_urls.len(), "Listed SQS queues");
        Ok(queue_urls)
    }

    async fn send_message(&self, queue_url: &str, body: String) -> Result<(), HandlerError> {
        self.client
            .send_message()
            .queue_url(queue_url)
            .message_body(body)
            .send()
            .await
            .map_err(|e| {
                HandlerError::AwsError(format!(
                    "Failed to send message to SQS: {}",
                    DisplayErrorContext(&e)
                ))
            })?;
        Ok(())
    }
}
