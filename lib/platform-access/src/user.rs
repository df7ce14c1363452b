//! Signed-in user identity.
//!
//! An `Identity` is the opaque view of a signed-in user that the hosted
//! authentication provider hands back. Navigation only cares whether one
//! exists; pages may show the email or display name.

use bankdash_core::UserId;
use serde::{Deserialize, Serialize};

/// The currently signed-in user as reported by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Provider-issued uid.
    uid: UserId,
    /// Email address, if the account has one.
    email: Option<String>,
    /// Display name, if the account has one.
    display_name: Option<String>,
}

impl Identity {
    /// Creates an identity with only a uid.
    #[must_use]
    pub fn new(uid: UserId) -> Self {
        Self {
            uid,
            email: None,
            display_name: None,
        }
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = email;
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, name: Option<String>) -> Self {
        self.display_name = name;
        self
    }

    /// Returns the provider-issued uid.
    #[must_use]
    pub fn uid(&self) -> &UserId {
        &self.uid
    }

    /// Returns the email address, if available.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the display name, if available.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Name to greet the user with: display name, then email, then "User".
    #[must_use]
    pub fn greeting_name(&self) -> &str {
        self.display_name()
            .or_else(|| self.email())
            .unwrap_or("User")
    }
}
