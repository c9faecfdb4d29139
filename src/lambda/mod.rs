//! Lambda front-end feeding metric batches to the SQS handler

pub mod handler;

// Re-export the main handler for convenience
pub use handler::{BatchSummary, MetricBatch, function_handler, process_batch};
