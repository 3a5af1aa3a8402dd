use std::sync::Arc;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ReqsError {
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

    #[error("Cache Error: {0}")]
    Cache(String),

    #[error("Resource Not Found: {0}")]
    NotFound(String),

    #[error("Validation Error: {0}")]
    ValidationError(String),

    #[error("Invalid declaration: {0}")]
    InvalidDeclaration(String),

    /// Carries the rendered cycle, e.g. `a -> b -> a`.
    #[error("Dependency cycle detected: {0}")]
    CycleDetected(String),

    /// Carries the identifier of the target that could not be ordered.
    #[error("Unresolved dependency: '{0}' could not be ordered")]
    UnresolvedDependency(String),

    #[error("Failed to execute command: {0}")]
    CommandExecError(String),

    #[error("Generic Error: {0}")]
    Generic(String),
}

impl From<std::io::Error> for ReqsError {
    fn from(err: std::io::Error) -> Self {
        ReqsError::Io(Arc::new(err))
    }
}

impl From<reqwest::Error> for ReqsError {
    fn from(err: reqwest::Error) -> Self {
        ReqsError::Http(Arc::new(err))
    }
}

impl From<serde_json::Error> for ReqsError {
    fn from(err: serde_json::Error) -> Self {
        ReqsError::Json(Arc::new(err))
    }
}

pub type Result<T> = std::result::Result<T, ReqsError>;
