//! Error types for wagebook.

use thiserror::Error;

use crate::session::Screen;

/// Top-level result type for wagebook operations.
pub type Result<T> = std::result::Result<T, WagebookError>;

/// Top-level error type for wagebook.
#[derive(Debug, Error)]
pub enum WagebookError {
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    #[error("date error: {0}")]
    Date(#[from] DateKeyError),

    #[error("unknown currency '{0}': expected one of TWD, USD, JPY, EUR")]
    UnknownCurrency(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised by the session state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("cannot {action} while on the {screen} screen")]
    InvalidTransition { action: &'static str, screen: Screen },
}

/// Errors related to ISO date keys.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateKeyError {
    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid month '{0}': expected YYYY-MM")]
    InvalidMonth(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_display_human_readable_messages() {
        let err = SessionError::InvalidTransition {
            action: "save",
            screen: Screen::Calendar,
        };
        let msg = err.to_string();
        assert!(msg.contains("save"));
        assert!(msg.contains("calendar"));

        let err = DateKeyError::InvalidDate("2024-13-01".to_string());
        assert!(err.to_string().contains("YYYY-MM-DD"));

        let err = WagebookError::UnknownCurrency("GBP".to_string());
        assert!(err.to_string().contains("GBP"));
    }
}
