use aws_sdk_sqs::error::{DisplayErrorContext, SdkError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Failed to interact with AWS services: {0}")]
    AwsError(String),

    #[error("Failed to serialize metric: {0}")]
    SerializationError(String),

    #[error("Failed to parse metric: {0}")]
    ParseError(String),
}

impl From<serde_json::Error> for HandlerError {
    fn from(error: serde_json::Error) -> Self {
        HandlerError::SerializationError(error.to_string())
    }
}

// Generic implementation for AWS SDK errors
impl<E, R> From<SdkError<E, R>> for HandlerError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    fn from(error: SdkError<E, R>) -> Self {
        HandlerError::AwsError(DisplayErrorContext(&error).to_string())
    }
}
