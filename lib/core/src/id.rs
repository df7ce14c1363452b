//! Strongly-typed identifiers.
//!
//! User ids are issued by the hosted authentication provider as opaque
//! strings; this crate never generates them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Longest uid the authentication provider issues.
const MAX_UID_LEN: usize = 128;

/// Error returned when parsing an ID from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse.
    pub id_type: &'static str,
    /// The reason for the parse failure.
    pub reason: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {}: {}", self.id_type, self.reason)
    }
}

impl std::error::Error for ParseIdError {}

/// Unique identifier of a signed-in user, as issued by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Returns the uid as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let reason = if s.is_empty() {
            Some("uid is empty".to_string())
        } else if s.len() > MAX_UID_LEN {
            Some(format!("uid is longer than {MAX_UID_LEN} bytes"))
        } else if s.chars().any(char::is_whitespace) {
            Some("uid contains whitespace".to_string())
        } else {
            None
        };

        match reason {
            Some(reason) => Err(ParseIdError {
                id_type: "UserId",
                reason,
            }),
            None => Ok(Self(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_parses_provider_uid() {
        let id: UserId = "Xk3bPq9sTfM2".parse().expect("valid uid");
        assert_eq!(id.as_str(), "Xk3bPq9sTfM2");
        assert_eq!(id.to_string(), "Xk3bPq9sTfM2");
    }

    #[test]
    fn user_id_rejects_empty() {
        let err = "".parse::<UserId>().unwrap_err();
        assert_eq!(err.id_type, "UserId");
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn user_id_rejects_whitespace_and_overlong() {
        assert!("a b".parse::<UserId>().is_err());
        assert!("x".repeat(MAX_UID_LEN + 1).parse::<UserId>().is_err());
        assert!("x".repeat(MAX_UID_LEN).parse::<UserId>().is_ok());
    }

    #[test]
    fn user_id_serializes_transparently() {
        let id: UserId = "uid_42".parse().expect("valid uid");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"uid_42\"");
        let back: UserId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }
}
