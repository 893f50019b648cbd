//! Unified error types for slidesmith.
//!
//! Every failure a run can hit (presentation service, file service, local
//! validation, configuration) is folded into one error type so the pipeline
//! can log it with context and stop.
use thiserror::Error;

/// Main error type for slidesmith operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Credentials were missing, expired or rejected by the service
    #[error("Authentication failed: {0}")]
    AuthFailure(String),

    /// The service refused a batch (malformed or conflicting operation)
    #[error("Batch rejected: {0}")]
    BatchRejected(String),

    /// Document, object or labeled element does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The caller lacks the right to perform the call
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Network failure or unexpected service response
    #[error("Transport failure: {0}")]
    TransportFailure(String),

    /// An edit operation failed local validation before submission
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A stateful flow was driven out of order
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The exact same batch was already submitted against the document
    #[error("Batch already applied to document {document_id} (fingerprint {fingerprint})")]
    DuplicateBatch {
        document_id: String,
        fingerprint: String,
    },

    /// Run configuration is missing a field or holds an invalid value
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the service may have applied the call despite the error.
    ///
    /// Only transport failures are ambiguous: the request may have reached
    /// the service even though no response came back.
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Error::TransportFailure(_))
    }
}

/// Result type for slidesmith operations.
pub type Result<T> = std::result::Result<T, Error>;
