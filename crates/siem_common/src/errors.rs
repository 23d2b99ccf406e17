//! Error taxonomy for manager API calls.
//!
//! Every failure is surfaced exactly once to the caller; nothing here
//! retries. Auth rejections are distinct from generic HTTP failures so
//! the route guard can force a logout.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected credentials, or a bearer token the manager refused.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Transport-level failure: timeout, DNS, connection refused.
    #[error("Network error: {0}")]
    Network(String),

    /// Non-auth rejection from the manager.
    #[error("Server error (HTTP {status}): {message}")]
    Http { status: u16, message: String },

    /// Response body did not match the endpoint schema.
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// True for failures that must drop the session.
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_auth_errors_force_logout() {
        assert!(ApiError::Auth("bad token".into()).is_auth());
        assert!(!ApiError::Network("connection refused".into()).is_auth());
        assert!(!ApiError::Http {
            status: 500,
            message: "boom".into()
        }
        .is_auth());
        assert!(!ApiError::Decode("missing field".into()).is_auth());
    }
}
