//! Structured error types for notification-sender
//!
//! Uses thiserror for ergonomic error definitions with automatic Display
//! and Error trait implementations.

use thiserror::Error;

/// Errors reported by a notification delivery service
///
/// Both variants display only their description, so the console line
/// reads `Error: <description>`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// The notification service refused the request (e.g. permission denied)
    #[error("{0}")]
    Rejected(String),

    /// The worker that talks to the notification service did not finish
    #[error("{0}")]
    Interrupted(String),
}

/// Convenience Result type using DeliveryError
pub type Result<T> = std::result::Result<T, DeliveryError>;

impl From<notify_rust::error::Error> for DeliveryError {
    fn from(e: notify_rust::error::Error) -> Self {
        DeliveryError::Rejected(e.to_string())
    }
}

impl From<tokio::task::JoinError> for DeliveryError {
    fn from(e: tokio::task::JoinError) -> Self {
        DeliveryError::Interrupted(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_bare_description() {
        let err = DeliveryError::Rejected("permission denied".to_string());
        assert_eq!(err.to_string(), "permission denied");

        let err = DeliveryError::Interrupted("task cancelled".to_string());
        assert_eq!(err.to_string(), "task cancelled");
    }
}
