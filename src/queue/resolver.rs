use tracing::{info, warn};
use url::Url;

use super::service::QueueService;
use crate::errors::HandlerError;

/// A queue located by exact name. Fixed for the lifetime of the handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueHandle {
    name: String,
    url: String,
}

impl QueueHandle {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Extract the queue name from an SQS queue URL (its last path segment).
#[must_use]
pub fn queue_name_from_url(queue_url: &str) -> String {
    match Url::parse(queue_url) {
        Ok(url) => url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .unwrap_or_default()
            .to_string(),
        Err(_) => queue_url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}

/// Find the queue named exactly `queue_name` among the queues sharing it as a prefix.
///
/// A missing queue is not an error: it is logged once and `None` is returned,
/// leaving the handler in no-op delivery mode.
///
/// # Errors
///
/// Returns an error if the queues cannot be listed (bad credentials, unknown
/// region, network failure).
pub async fn resolve<S: QueueService + ?Sized>(
    service: &S,
    queue_name: &str,
) -> Result<Option<QueueHandle>, HandlerError> {
    let queue_urls = service.list_queues(queue_name).await?;

    let handle = queue_urls
        .into_iter()
        .find(|url| queue_name_from_url(url) == queue_name)
        .map(|url| QueueHandle::new(queue_name, url));

    match &handle {
        Some(found) => info!(queue = found.name(), url = found.url(), "Resolved SQS queue"),
        None => warn!("Queue: {} not found", queue_name),
    }

    Ok(handle)
}
