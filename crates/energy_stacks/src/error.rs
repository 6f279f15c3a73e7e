use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SynthError {
    #[error("Environment must be one of ['test', 'prod'], got: {0}")]
    InvalidEnvironment(String),
    #[error("invalid admin email address '{value}': {reason}")]
    InvalidEmail { value: String, reason: &'static str },
    #[error("an admin email address is required to synthesize {app}")]
    MissingAdminEmail { app: &'static str },
    #[error("stack {stack} already declares logical id {logical_id}")]
    DuplicateLogicalId { stack: String, logical_id: String },
    #[error("stack {stack} has no resource {logical_id}")]
    UnknownResource { stack: String, logical_id: String },
    #[error("bucket {logical_id} needs an explicit name to deliver event notifications")]
    UnnamedNotificationSource { logical_id: String },
    #[error("failed to serialize template: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
