//! Errors raised by domain parsing.

use thiserror::Error;

/// A value that does not belong to one of the closed domain vocabularies.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Rejected input, carrying the exact message shown to clients
    #[error("{0}")]
    Validation(String),

    /// Value outside a vocabulary that has no dedicated client message
    #[error("Unknown {kind} '{value}'")]
    Unknown { kind: &'static str, value: String },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    pub fn unknown(kind: &'static str, value: impl Into<String>) -> Self {
        DomainError::Unknown {
            kind,
            value: value.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
