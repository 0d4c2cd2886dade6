//! Error types for lume-core

use thiserror::Error;

/// Errors that stop statement generation before a projector runs.
///
/// Validation and dispatch failures are always surfaced to the caller
/// immediately as an HTTP-style 400 with a terse, actionable message; they
/// are never retried and no statement is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatementError {
    #[error("{msg}")]
    Validation { code: u16, msg: String },
}

impl StatementError {
    /// A 400-class validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        StatementError::Validation {
            code: 400,
            msg: msg.into(),
        }
    }

    /// The HTTP-style error code
    pub fn code(&self) -> u16 {
        match self {
            StatementError::Validation { code, .. } => *code,
        }
    }
}

/// Errors from delivering a generated statement to a remote store.
///
/// Delivery failures never replace the generated statement: they are paired
/// with it in the outcome so the caller can decide whether to re-attempt
/// delivery. There is no automatic retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// The store answered with a non-success status
    #[error("record store rejected statement ({code}): {msg}")]
    Rejected { code: u16, msg: String },

    /// The store could not be reached (connect failure, timeout, ...)
    #[error("record store unreachable: {0}")]
    Transport(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_carries_400() {
        let err = StatementError::validation("\"id\" is required");
        assert_eq!(err.code(), 400);
        assert_eq!(err.to_string(), "\"id\" is required");
    }

    #[test]
    fn delivery_rejected_displays_code_and_body() {
        let err = DeliveryError::Rejected {
            code: 401,
            msg: "bad credentials".to_string(),
        };
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("bad credentials"));
    }

    #[test]
    fn delivery_transport_displays_reason() {
        let err = DeliveryError::Transport("connection refused".to_string());
        assert!(err.to_string().contains("unreachable"));
    }
}
