use std::sync::Arc;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ZapgenError {
    #[error("I/O Error: {0}")]
    Io(#[from] Arc<std::io::Error>),

    #[error("HTTP Request Error: {0}")]
    Http(#[from] Arc<reqwest::Error>),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] Arc<serde_json::Error>),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("API Error: {0}")]
    Api(String),

    #[error("Resource Not Found: {0}")]
    NotFound(String),

    #[error("IoError: {0}")]
    IoError(String),

    #[error("HttpError: {0}")]
    HttpError(String),

    #[error("Generic Error: {0}")]
    Generic(String),
}

impl From<std::io::Error> for ZapgenError {
    fn from(err: std::io::Error) -> Self {
        ZapgenError::Io(Arc::new(err))
    }
}

impl From<reqwest::Error> for ZapgenError {
    fn from(err: reqwest::Error) -> Self {
        ZapgenError::Http(Arc::new(err))
    }
}

impl From<serde_json::Error> for ZapgenError {
    fn from(err: serde_json::Error) -> Self {
        ZapgenError::Json(Arc::new(err))
    }
}

pub type Result<T> = std::result::Result<T, ZapgenError>;
