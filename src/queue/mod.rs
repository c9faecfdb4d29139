//! Queue lookup and the SQS client seam

pub mod resolver;
pub mod service;

pub use resolver::{QueueHandle, queue_name_from_url, resolve};
pub use service::{QueueService, SqsQueueService};
