//! Error types for the platform-access crate.
//!
//! Errors are designed for layered context using rootcause: calls into the
//! hosted backend return `Report<BackendError>`.

use std::fmt;

/// Errors from calls to the hosted backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The backend configuration is unusable.
    InvalidConfig { reason: String },
    /// The request never produced a response.
    RequestFailed { endpoint: String, reason: String },
    /// The backend answered with an error code.
    Rejected { code: String },
    /// The response body did not have the expected shape.
    InvalidResponse { reason: String },
    /// The session token did not resolve to any account.
    UnknownAccount,
}

impl BackendError {
    /// Message safe to show to the person signing in.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Rejected { code } => match code.as_str() {
                "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
                    "Incorrect email or password"
                }
                "EMAIL_EXISTS" => "An account with this email already exists",
                "USER_DISABLED" => "This account has been disabled",
                code if code.starts_with("WEAK_PASSWORD") => "Password is too weak",
                code if code.starts_with("TOO_MANY_ATTEMPTS_TRY_LATER") => {
                    "Too many attempts, try again later"
                }
                _ => "Authentication failed",
            },
            Self::UnknownAccount => "Account not found",
            Self::InvalidConfig { .. } | Self::RequestFailed { .. } | Self::InvalidResponse { .. } => {
                "Authentication service unavailable"
            }
        }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { reason } => {
                write!(f, "invalid backend configuration: {reason}")
            }
            Self::RequestFailed { endpoint, reason } => {
                write!(f, "request to '{endpoint}' failed: {reason}")
            }
            Self::Rejected { code } => {
                write!(f, "backend rejected request: {code}")
            }
            Self::InvalidResponse { reason } => {
                write!(f, "invalid backend response: {reason}")
            }
            Self::UnknownAccount => {
                write!(f, "session token does not match any account")
            }
        }
    }
}

impl std::error::Error for BackendError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failed_display() {
        let err = BackendError::RequestFailed {
            endpoint: "accounts:lookup".to_string(),
            reason: "connection reset".to_string(),
        };
        assert!(err.to_string().contains("accounts:lookup"));
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn rejected_codes_map_to_user_messages() {
        let wrong_password = BackendError::Rejected {
            code: "INVALID_PASSWORD".to_string(),
        };
        assert_eq!(wrong_password.user_message(), "Incorrect email or password");

        let weak = BackendError::Rejected {
            code: "WEAK_PASSWORD : Password should be at least 6 characters".to_string(),
        };
        assert_eq!(weak.user_message(), "Password is too weak");

        let other = BackendError::Rejected {
            code: "OPERATION_NOT_ALLOWED".to_string(),
        };
        assert_eq!(other.user_message(), "Authentication failed");
    }

    #[test]
    fn transport_errors_hide_details() {
        let err = BackendError::InvalidResponse {
            reason: "missing idToken".to_string(),
        };
        assert_eq!(err.user_message(), "Authentication service unavailable");
    }
}
