//! Authentication API trait.

use super::model::{AuthGrant, Credentials};
use crate::error::Result;
use async_trait::async_trait;

/// The remote authentication endpoints.
///
/// Implementations make exactly one request per call and never retry; the
/// caller decides whether to try again.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /auth/signin`.
    ///
    /// # Returns
    ///
    /// - `Ok(AuthGrant)`: The API accepted the credentials
    /// - `Err(_)`: Non-success status or transport failure
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthGrant>;

    /// `POST /auth/signup`. Same contract as [`AuthApi::sign_in`].
    async fn sign_up(&self, credentials: &Credentials) -> Result<AuthGrant>;
}
