//! Session domain model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The authenticated identity of the current user.
///
/// A `Session` only ever exists after a successful sign-in, sign-up or
/// restore; absence of a session is modelled as `Option<Session>::None`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque user identifier issued by the API
    pub user_id: String,
    /// Opaque bearer credential sent as `Authorization: Bearer <token>`
    pub token: String,
}

impl Session {
    pub fn new(user_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            token: token.into(),
        }
    }

    /// True when both the user id and the token are present.
    pub fn is_authenticated(&self) -> bool {
        !self.user_id.is_empty() && !self.token.is_empty()
    }
}

// Keeps the bearer token out of logs and panic messages.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Email/password pair submitted to the sign-in and sign-up endpoints.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful response body of `/auth/signin` and `/auth/signup`.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AuthGrant {
    pub access_token: String,
    #[serde(deserialize_with = "crate::serde_ids::opaque_id")]
    pub user_id: String,
}

impl AuthGrant {
    pub fn into_session(self) -> Session {
        Session::new(self.user_id, self.access_token)
    }
}

impl fmt::Debug for AuthGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthGrant")
            .field("user_id", &self.user_id)
            .field("access_token", &"<redacted>")
            .finish()
    }
}
