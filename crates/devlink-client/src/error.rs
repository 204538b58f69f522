//! Client error types

use thiserror::Error;

/// Client-side errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connection refused, timeout, TLS)
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error envelope
    #[error("{message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// No session is loaded; the caller must log in first
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Session file could not be read or written
    #[error("Session storage error: {0}")]
    Session(#[from] std::io::Error),

    /// The server returned a body the client could not decode
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ClientError {
    /// The message shown to the user: the server-provided one when present,
    /// else a generic fallback
    pub fn display_message(&self) -> String {
        match self {
            Self::Api { message, .. } if !message.is_empty() => message.clone(),
            Self::NotAuthenticated => "Please log in to continue".to_string(),
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_uses_server_message() {
        let err = ClientError::Api {
            status: 409,
            code: "DUPLICATE_SKILL".to_string(),
            message: "Skill already exists: React".to_string(),
        };
        assert_eq!(err.display_message(), "Skill already exists: React");
    }

    #[test]
    fn test_empty_server_message_falls_back() {
        let err = ClientError::Api {
            status: 500,
            code: "INTERNAL_ERROR".to_string(),
            message: String::new(),
        };
        assert_eq!(err.display_message(), "Something went wrong. Please try again.");
    }
}
