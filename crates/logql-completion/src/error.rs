//! Error types for label sources

use logql_http::HttpError;
use thiserror::Error;

/// Why a label fetch produced no data
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Http(#[from] HttpError),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("endpoint reported status '{0}'")]
    Status(String),

    #[error("no data source configured")]
    NotConfigured,
}

pub type Result<T> = std::result::Result<T, SourceError>;
