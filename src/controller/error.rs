//! Error types for M3DBCluster resource generation

use thiserror::Error;

/// Errors returned by the resource generators and spec validation
#[allow(clippy::enum_variant_names)]
#[derive(Error, Debug)]
pub enum Error {
    /// The input is structurally invalid on its own (e.g. an empty cluster name)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A name referenced by one input is missing from another
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// A sub-step failed; `context` says which one and for what
    #[error("{context}: {source}")]
    UpstreamError {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap this error with context describing the failing step
    pub fn context(self, context: impl Into<String>) -> Self {
        Error::UpstreamError {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Check if this error indicates a referenced resource was not found
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound(_) => true,
            Error::UpstreamError { source, .. } => source.is_not_found(),
            Error::ValidationError(_) => false,
        }
    }

    /// Check if retrying with the same cluster could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            // The cluster has to change first
            Error::ValidationError(_) => false,
            // The referenced group might be added by a later spec update
            Error::NotFound(_) => true,
            Error::UpstreamError { source, .. } => source.is_retryable(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
