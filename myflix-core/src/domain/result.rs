//! Result and error types for the core library

use thiserror::Error;

/// Message shown to the user when the API call itself went wrong.
const GENERIC_FAILURE: &str = "Something bad happened; please try again later.";

/// Core library error type
///
/// Every API failure lands in exactly one of the first three variants, so
/// callers can branch on authorization failures (e.g. force a logout)
/// separately from generic ones.
#[derive(Error, Debug)]
pub enum Error {
    /// No response was received (DNS, connect, TLS, timeout)
    #[error("Unable to reach the movie API: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status
    #[error("Movie API error: HTTP {status}: {body}")]
    Application { status: u16, body: String },

    /// The server rejected the bearer token (401/403)
    #[error("Not authorized (HTTP {status}): {body}")]
    Unauthorized { status: u16, body: String },

    /// An operation needed the logged-in user but the session is empty
    #[error("Not logged in. Run 'mfx login' first.")]
    NotLoggedIn,

    /// A 2xx body did not match the expected schema
    #[error("Unexpected response from the movie API: {0}")]
    Decode(String),

    /// A lookup resolved locally found nothing
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build the error for a non-2xx response
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            401 | 403 => Self::Unauthorized { status, body },
            _ => Self::Application { status, body },
        }
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// HTTP status of the failed response, if there was one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Application { status, .. } | Self::Unauthorized { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short notification text for end users
    ///
    /// Application errors whose body is a short plain message (e.g.
    /// "No such movie") show that message; everything else collapses into
    /// a generic line. Full detail stays in `Display` and the logs.
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthorized { .. } => {
                "Your session has expired. Please log in again.".to_string()
            }
            Self::NotLoggedIn | Self::NotFound(_) => self.to_string(),
            Self::Application { body, .. } => {
                let trimmed = body.trim();
                let structured = trimmed.starts_with(&['{', '[', '<'][..]);
                if !trimmed.is_empty() && trimmed.len() <= 120 && !structured {
                    trimmed.to_string()
                } else {
                    GENERIC_FAILURE.to_string()
                }
            }
            Self::Config(msg) => format!("Configuration error: {}", msg),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
