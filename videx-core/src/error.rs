use thiserror::Error;

#[derive(Error, Debug)]
pub enum VidexError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Upload failed: {0}")]
    Upload(String),
}
