//! Exit codes for siemctl failure modes.

use siem_common::ApiError;

/// Exit code for success
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for general errors
pub const EXIT_GENERAL_ERROR: i32 = 1;

/// Exit code when authentication is required or was rejected
pub const EXIT_AUTH_REQUIRED: i32 = 64;

/// Exit code when the manager returns an invalid payload
pub const EXIT_INVALID_RESPONSE: i32 = 65;

/// Exit code when the manager is unreachable
pub const EXIT_SERVER_UNAVAILABLE: i32 = 70;

/// Map an API failure to its exit code.
pub fn exit_code_for(error: &ApiError) -> i32 {
    match error {
        ApiError::Auth(_) => EXIT_AUTH_REQUIRED,
        ApiError::Network(_) => EXIT_SERVER_UNAVAILABLE,
        ApiError::Decode(_) => EXIT_INVALID_RESPONSE,
        ApiError::Http { .. } => EXIT_GENERAL_ERROR,
    }
}
