//! Error shared by every franchise backend port.

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while calling the franchise backend.
    pub enum BackendApiError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "franchise backend transport failed: {message}",
        /// The request exceeded the configured timeout.
        Timeout { message: String } =>
            "franchise backend timeout: {message}",
        /// The backend answered with an error status or `success: false`.
        Rejected { status: u16, code: Option<String>, message: String } =>
            "franchise backend rejected request with status {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "franchise backend response decode failed: {message}",
    }
}

impl BackendApiError {
    /// The backend's `errorCode`, if it sent one.
    pub fn backend_code(&self) -> Option<&str> {
        match self {
            Self::Rejected { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// The HTTP status of a rejected request.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The backend's own message, when it sent a non-blank one.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }
}
