use thiserror::Error;

use common::error::Error as NiceLogError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to load configuration: {0}")]
    ConfigLoadError(String),

    #[error("{0}")]
    Usage(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid simulator input range [{min}, {max}): bounds must be positive, finite and increasing.")]
    InvalidRange { min: f64, max: f64 },

    #[error("Channel sender failed: Receiver has been dropped.")]
    ChannelSendFailed,

    #[error("Task failed to complete: {0}")]
    TaskJoinError(#[from] tokio::task::JoinError),

    #[error("Estimation error: {0}")]
    EstimationError(#[from] NiceLogError),
}
