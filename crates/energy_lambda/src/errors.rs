use energy_core::{ReadingError, SummaryError};
use thiserror::Error;

use crate::config::ConfigError;
use crate::events::EventError;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid trigger event: {0}")]
    Event(#[from] EventError),
    #[error("failed to read s3://{bucket}/{key}: {message}")]
    Read {
        bucket: String,
        key: String,
        message: String,
    },
    #[error("s3://{bucket}/{key} is not UTF-8 text")]
    NotUtf8 { bucket: String, key: String },
    #[error(transparent)]
    Parse(#[from] ReadingError),
    #[error("failed to encode readings as JSON: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write s3://{bucket}/{key}: {message}")]
    Write {
        bucket: String,
        key: String,
        message: String,
    },
}

impl TransformError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "configuration",
            Self::Event(_) => "event",
            Self::Read { .. } => "read",
            Self::NotUtf8 { .. } | Self::Parse(_) => "parse",
            Self::Encode(_) => "encode",
            Self::Write { .. } => "write",
        }
    }
}

#[derive(Debug, Error)]
pub enum CalculateError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid trigger event: {0}")]
    Event(#[from] EventError),
    #[error("failed to read s3://{bucket}/{key}: {message}")]
    Read {
        bucket: String,
        key: String,
        message: String,
    },
    #[error("s3://{bucket}/{key} does not hold a readings array: {source}")]
    Parse {
        bucket: String,
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    EmptyBatch(#[from] SummaryError),
    #[error("failed to encode summary as JSON: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to persist summary to {table_name}: {message}")]
    Persistence { table_name: String, message: String },
    #[error("summary persisted but notification failed: {0}")]
    Notification(String),
}

impl CalculateError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "configuration",
            Self::Event(EventError::MalformedReadings(_)) | Self::Parse { .. } => "parse",
            Self::Event(_) => "event",
            Self::Read { .. } => "read",
            Self::EmptyBatch(_) => "empty_batch",
            Self::Encode(_) => "encode",
            Self::Persistence { .. } => "persistence",
            Self::Notification(_) => "notification",
        }
    }
}
