//! Error taxonomy shared by the gateway, the auth manager, and feature clients.
//! Messages are user-facing; they must never contain credential material.

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    /// The backend rejected the credential; the session has already been cleared.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Access denied: {0}")]
    AccessDenied(String),
    #[error("{0}")]
    Validation(String),
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Scanner error: {0}")]
    Scanner(String),
}

impl AppError {
    /// Message suitable for a notification line, without the category prefix
    /// for errors that already carry a server-supplied explanation.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Http { message, .. } | Self::Unauthorized(message) | Self::Validation(message) => {
                message.clone()
            }
            other => other.to_string(),
        }
    }

    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Unauthorized(_) => Some(401),
            _ => None,
        }
    }
}
