use thiserror::Error;

/// A failure reported by a single progress fetch.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Request to '{endpoint}' failed: {message}")]
    Request { endpoint: String, message: String },

    #[error("Request to '{endpoint}' returned status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("No data available for '{endpoint}'")]
    NotFound { endpoint: String },

    #[error("Failed to decode progress data: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The whole aggregation failed; no partial model is produced.
#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("unable to build transcript: {0}")]
    Source(#[from] SourceError),
}
