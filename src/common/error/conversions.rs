//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from
//! third-party error types to the unified Error type.

use super::types::Error;

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Error::from_status(status.as_u16(), err.to_string());
        }
        Error::TransportFailure(err.to_string())
    }
}

impl Error {
    /// Map an HTTP status code returned by the Slides or Drive API onto the
    /// error taxonomy.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => Error::AuthFailure(message),
            403 => Error::PermissionDenied(message),
            404 => Error::NotFound(message),
            400 | 409 | 412 | 422 => Error::BatchRejected(message),
            _ => Error::TransportFailure(format!("HTTP {}: {}", status, message)),
        }
    }
}
