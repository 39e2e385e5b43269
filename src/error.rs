use std::io;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("upstream request failed: {0}")]
    Upstream(String),
    #[error("upstream responded with {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("malformed upstream response: {0}")]
    Decode(String),
    #[error("failed to serialize snapshot: {0}")]
    Serialize(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
