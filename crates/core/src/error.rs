use fathom_api::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FathomError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("Manifest error: {0}")]
    Manifest(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<FathomError> for ApiError {
    fn from(err: FathomError) -> Self {
        match err {
            FathomError::InvalidArgument(msg) => ApiError::InvalidArgument(msg),
            FathomError::NotFound(msg) => ApiError::NotFound(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, FathomError>;
