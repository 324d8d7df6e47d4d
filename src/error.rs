use std::io;
use thiserror::Error;

/// Custom error type for the dashboard core
#[derive(Error, Debug)]
pub enum DashError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Metric collection failed: {0}")]
    MetricCollection(String),

    #[error("Process listing error: {0}")]
    ProcessListing(String),
}

/// Result type alias for the dashboard core
pub type Result<T> = std::result::Result<T, DashError>;

impl DashError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        DashError::Config(msg.into())
    }

    pub fn metric_collection<S: Into<String>>(msg: S) -> Self {
        DashError::MetricCollection(msg.into())
    }

    pub fn process_listing<S: Into<String>>(msg: S) -> Self {
        DashError::ProcessListing(msg.into())
    }
}
