//! Error types for the resource client template.
//!
//! # Design
//! Absence is not an error: operations that may legitimately find nothing
//! return `Option` or an empty `Vec`. Everything here aborts the current
//! operation. `Http` carries statuses the template did not expect and that it
//! does not translate into absence; `InvariantViolation` and `Precondition`
//! are raised by the template itself, never by the remote service.

use thiserror::Error;

/// Errors returned by `ClientTemplate` operations and their collaborators.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The request never produced an HTTP response (connection refused, DNS,
    /// I/O failure while reading the body).
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a status the operation does not tolerate.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// A postcondition on the server's answer failed: unexpected success
    /// status, missing `Location` header, or an ambiguous single-result query.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// The caller's arguments were rejected before any request was sent.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// The operation is not supported by the remote API.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    /// The request payload could not be encoded.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be decoded into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// Client configuration could not be loaded.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl TemplateError {
    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            TemplateError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// `true` for failures raised by the template's own checks rather than by
    /// the transport or the remote service.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            TemplateError::InvariantViolation(_) | TemplateError::Precondition(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, TemplateError>;
