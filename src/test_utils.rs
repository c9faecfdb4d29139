use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing_subscriber::fmt::MakeWriter;

use crate::errors::HandlerError;
use crate::queue::{QueueService, queue_name_from_url};

/// In-memory `QueueService` recording every call.
#[derive(Default)]
pub struct RecordingQueueService {
    queue_urls: Vec<String>,
    list_error: Option<String>,
    failing_sends: Mutex<usize>,
    listed: Mutex<Vec<String>>,
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingQueueService {
    pub fn with_queues<I, T>(queue_urls: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            queue_urls: queue_urls.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn failing_list(message: &str) -> Self {
        Self {
            list_error: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Make the next `count` sends fail.
    pub fn fail_next_sends(&self, count: usize) {
        *self.failing_sends.lock().unwrap() = count;
    }

    pub fn listed_prefixes(&self) -> Vec<String> {
        self.listed.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn send_attempts(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl QueueService for RecordingQueueService {
    async fn list_queues(&self, prefix: &str) -> Result<Vec<String>, HandlerError> {
        self.listed.lock().unwrap().push(prefix.to_string());
        if let Some(message) = &self.list_error {
            return Err(HandlerError::AwsError(message.clone()));
        }
        Ok(self
            .queue_urls
            .iter()
            .filter(|url| queue_name_from_url(url).starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn send_message(&self, queue_url: &str, body: String) -> Result<(), HandlerError> {
        self.sent.lock().unwrap().push((queue_url.to_string(), body));
        let mut failing = self.failing_sends.lock().unwrap();
        if *failing > 0 {
            *failing -= 1;
            return Err(HandlerError::AwsError(
                "Failed to send message to SQS: service unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

/// Shared in-memory sink for `tracing` output in tests.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Install a plain-text subscriber writing to this capture for the current thread.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Number of WARN lines containing `needle`.
    pub fn warnings_containing(&self, needle: &str) -> usize {
        self.contents()
            .lines()
            .filter(|line| line.contains("WARN") && line.contains(needle))
            .count()
    }
}

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
