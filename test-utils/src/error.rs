use thiserror::Error;

/// Errors that can occur while preparing a test environment.
#[derive(Error, Debug)]
pub enum TestError {
    /// Failed to create the scratch directory or write a seed document.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Failed to serialize a seed document.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
