//! Errors raised by host objects (the equivalent of a thrown `TypeError`).

use crate::url_model::UrlError;

/// Failure reported by a host object or a host function.
///
/// Forwarding layers propagate these unchanged; they never add validation of
/// their own on top of what the real object rejects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// Generic type error (illegal invocation, invalid URL, bad argument).
    #[error("TypeError: {0}")]
    Type(String),
    /// Write to a non-writable property.
    #[error("TypeError: Cannot assign to read only property '{property}'")]
    ReadOnly { property: String },
    /// A property expected to hold a function held something else.
    #[error("TypeError: {property} is not a function")]
    NotCallable { property: String },
}

impl From<UrlError> for HostError {
    fn from(e: UrlError) -> Self {
        HostError::Type(format!("Failed to construct 'URL': {e}"))
    }
}
