use std::path::PathBuf;

use thiserror::Error;

use crate::version::error::ResolveError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Package not found: {0}")]
    NotFound(String),

    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to read response body from {url}: {source}")]
    ResponseRead {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to decode metadata for {package}: {source}")]
    Decode {
        package: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to create temporary file: {0}")]
    TempStorage(#[source] std::io::Error),

    #[error("Failed to copy artifact from {url}: {source}")]
    StreamCopy {
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to save artifact to {path:?}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
