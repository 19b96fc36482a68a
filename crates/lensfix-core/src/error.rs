use thiserror::Error;

/// Core error type shared across lensfix crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A chart document does not match the chart configuration contract.
    #[error("invalid chart configuration: {0}")]
    InvalidChart(String),
    /// The generated JSON Schema could not be compiled.
    #[error("schema error: {0}")]
    Schema(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results returned by lensfix crates.
pub type Result<T> = std::result::Result<T, Error>;
