//! Persisted user record.
//!
//! One entry of the record collection. The serialized field names
//! (`email`, `businessName`, `password`, `isLoggedIn`) are the storage
//! format and must not change.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::email::Email;

/// A registered portal user.
///
/// `password_digest` holds a salted one-way digest, never the plaintext.
/// Implements `Debug` manually to redact the digest.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Unique key of the record, compared exactly.
    pub email: Email,
    /// Display name shown in the dashboard header.
    pub business_name: String,
    /// Salted password digest.
    #[serde(rename = "password")]
    pub password_digest: String,
    /// Whether this user currently holds a signed-in session.
    pub is_logged_in: bool,
}

impl UserRecord {
    /// Build a freshly registered record.
    ///
    /// New records start signed in: registering logs the user in.
    #[must_use]
    pub const fn registered(email: Email, business_name: String, password_digest: String) -> Self {
        Self {
            email,
            business_name,
            password_digest,
            is_logged_in: true,
        }
    }
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("email", &self.email)
            .field("business_name", &self.business_name)
            .field("password_digest", &"[REDACTED]")
            .field("is_logged_in", &self.is_logged_in)
            .finish()
    }
}
