//! Metric delivery to the resolved queue

pub mod forward;
pub mod sqs_handler;

pub use forward::{DeliveryOutcome, forward};
pub use sqs_handler::{Handler, SqsHandler};
