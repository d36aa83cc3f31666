//! Session store: the authenticated identity and its persistence.

use jobdesk_core::session::{
    ACCESS_TOKEN_KEY, AuthApi, AuthGrant, Credentials, KeyValueStore, Session, USER_ID_KEY,
};
use jobdesk_core::{JobdeskError, Result};
use std::sync::Arc;

/// Minimum password length accepted by sign-up.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Checks the sign-up password precondition.
///
/// The store itself never calls this; front ends run it before
/// [`SessionStore::sign_up`].
pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(JobdeskError::validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

/// Checks that an email was entered at all.
pub fn validate_email(email: &str) -> Result<()> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(JobdeskError::validation("A valid email address is required"));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum AuthFlow {
    SignIn,
    SignUp,
}

impl AuthFlow {
    fn label(self) -> &'static str {
        match self {
            AuthFlow::SignIn => "Sign in",
            AuthFlow::SignUp => "Sign up",
        }
    }
}

/// Holds the current [`Session`] and keeps it in step with persistent storage.
///
/// `restoring` is true from construction until the first [`restore`]
/// completes.
///
/// In memory and on disk the session is all-or-nothing: both keys are
/// written (or cleared) together, and a half-finished write is rolled back.
///
/// [`restore`]: SessionStore::restore
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    auth_api: Arc<dyn AuthApi>,
    session: Option<Session>,
    restoring: bool,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStore>, auth_api: Arc<dyn AuthApi>) -> Self {
        Self {
            storage,
            auth_api,
            session: None,
            restoring: true,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_restoring(&self) -> bool {
        self.restoring
    }

    /// Loads the persisted session, if both keys are present.
    ///
    /// Never fails: unreadable storage is logged and treated as signed out.
    /// Calling it again re-reads storage.
    pub fn restore(&mut self) -> Option<&Session> {
        self.session = self.load_persisted();
        self.restoring = false;

        match &self.session {
            Some(session) => tracing::info!(user_id = %session.user_id, "Restored session"),
            None => tracing::debug!("No persisted session"),
        }
        self.session.as_ref()
    }

    /// Signs in with one request to the auth endpoint.
    ///
    /// # Returns
    ///
    /// - `Ok(Session)`: memory and storage both hold the new session
    /// - `Err(Authentication)`: rejected credentials or unreachable API
    /// - `Err(Storage)`: the API accepted, but persisting failed (rolled back)
    ///
    /// On an API error the previous session, if any, is left untouched. On a
    /// storage error it is kept only if storage still holds it.
    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<Session> {
        self.authenticate(AuthFlow::SignIn, Credentials::new(email, password))
            .await
    }

    /// Signs up with one request to the registration endpoint.
    ///
    /// Same contract as [`SessionStore::sign_in`]. The password length
    /// precondition is the caller's job (see [`validate_password`]).
    pub async fn sign_up(&mut self, email: &str, password: &str) -> Result<Session> {
        self.authenticate(AuthFlow::SignUp, Credentials::new(email, password))
            .await
    }

    /// Clears the session from memory and storage. Cannot fail.
    pub fn sign_out(&mut self) {
        for key in [ACCESS_TOKEN_KEY, USER_ID_KEY] {
            if let Err(e) = self.storage.remove(key) {
                tracing::warn!(key, "Failed to clear persisted credential: {}", e);
            }
        }
        if let Some(previous) = self.session.take() {
            tracing::info!(user_id = %previous.user_id, "Signed out");
        }
    }

    async fn authenticate(&mut self, flow: AuthFlow, credentials: Credentials) -> Result<Session> {
        let response = match flow {
            AuthFlow::SignIn => self.auth_api.sign_in(&credentials).await,
            AuthFlow::SignUp => self.auth_api.sign_up(&credentials).await,
        };

        let grant: AuthGrant = response.map_err(|e| {
            tracing::warn!("{} failed: {}", flow.label(), e);
            if e.is_remote() {
                JobdeskError::authentication(format!("{} failed: {}", flow.label(), e))
            } else {
                e
            }
        })?;

        let session = grant.into_session();
        if !session.is_authenticated() {
            return Err(JobdeskError::authentication(format!(
                "{} failed: response is missing the token or user id",
                flow.label()
            )));
        }

        self.persist(&session)?;
        self.session = Some(session.clone());
        tracing::info!(user_id = %session.user_id, "{} succeeded", flow.label());
        Ok(session)
    }

    /// Writes both keys as one logical transaction.
    ///
    /// On failure the in-memory session is re-read from storage, so memory
    /// never claims a session that storage does not hold. The user id is
    /// written last, so a half-finished write leaves no complete pair behind.
    fn persist(&mut self, session: &Session) -> Result<()> {
        let entries = [
            (ACCESS_TOKEN_KEY, session.token.as_str()),
            (USER_ID_KEY, session.user_id.as_str()),
        ];

        if let Err(e) = self.storage.set_many(&entries) {
            let persisted = self.load_persisted();
            if persisted != self.session {
                tracing::warn!("Persisted session no longer matches memory, dropping it");
                self.session = persisted;
            }
            return Err(JobdeskError::storage(format!(
                "Failed to persist session: {}",
                e
            )));
        }

        Ok(())
    }

    fn load_persisted(&self) -> Option<Session> {
        let token = self.read_key(ACCESS_TOKEN_KEY);
        let user_id = self.read_key(USER_ID_KEY);

        match (user_id, token) {
            (Some(user_id), Some(token)) => Some(Session::new(user_id, token)),
            (user_id, token) => {
                if user_id.is_some() != token.is_some() {
                    tracing::warn!("Ignoring incomplete persisted session");
                }
                None
            }
        }
    }

    fn read_key(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                tracing::warn!(key, "Failed to read persisted credential: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FlakyStore, MockAuthApi};
    use jobdesk_core::session::MemoryKeyValueStore;

    fn stored(store: &dyn KeyValueStore) -> (Option<String>, Option<String>) {
        (
            store.get(ACCESS_TOKEN_KEY).unwrap(),
            store.get(USER_ID_KEY).unwrap(),
        )
    }

    #[test]
    fn test_restore_with_both_keys() {
        let storage = Arc::new(MemoryKeyValueStore::with_entries([
            (ACCESS_TOKEN_KEY, "tok"),
            (USER_ID_KEY, "u-1"),
        ]));
        let mut store = SessionStore::new(storage, Arc::new(MockAuthApi::accepting("x", "y")));
        assert!(store.is_restoring());

        let restored = store.restore().cloned();
        assert_eq!(restored, Some(Session::new("u-1", "tok")));
        assert!(!store.is_restoring());
    }

    #[test]
    fn test_restore_with_one_key_yields_no_session() {
        for key in [ACCESS_TOKEN_KEY, USER_ID_KEY] {
            let storage = Arc::new(MemoryKeyValueStore::with_entries([(key, "value")]));
            let mut store =
                SessionStore::new(storage, Arc::new(MockAuthApi::accepting("x", "y")));

            assert!(store.restore().is_none());
            assert!(!store.is_restoring());
        }
    }

    #[test]
    fn test_restore_treats_empty_values_as_absent() {
        let storage = Arc::new(MemoryKeyValueStore::with_entries([
            (ACCESS_TOKEN_KEY, ""),
            (USER_ID_KEY, "u-1"),
        ]));
        let mut store = SessionStore::new(storage, Arc::new(MockAuthApi::accepting("x", "y")));
        assert!(store.restore().is_none());
    }

    #[test]
    fn test_restore_survives_unreadable_storage() {
        let storage = Arc::new(FlakyStore::failing_reads());
        let mut store = SessionStore::new(storage, Arc::new(MockAuthApi::accepting("x", "y")));

        assert!(store.restore().is_none());
        assert!(!store.is_restoring());
    }

    #[test]
    fn test_restore_is_idempotent() {
        let storage = Arc::new(MemoryKeyValueStore::with_entries([
            (ACCESS_TOKEN_KEY, "tok"),
            (USER_ID_KEY, "u-1"),
        ]));
        let mut store = SessionStore::new(storage, Arc::new(MockAuthApi::accepting("x", "y")));
        let first = store.restore().cloned();
        let second = store.restore().cloned();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_sign_in_success_persists_both_keys() {
        let storage = Arc::new(MemoryKeyValueStore::new());
        let api = Arc::new(MockAuthApi::accepting("tok-9", "u-9"));
        let mut store = SessionStore::new(storage.clone(), api.clone());
        store.restore();

        let session = store.sign_in("a@example.com", "password1").await.unwrap();

        assert_eq!(session, Session::new("u-9", "tok-9"));
        assert_eq!(store.session(), Some(&session));
        assert_eq!(
            stored(storage.as_ref()),
            (Some("tok-9".to_string()), Some("u-9".to_string()))
        );
        assert_eq!(api.sign_in_calls(), 1);
    }

    #[tokio::test]
    async fn test_sign_in_failure_leaves_state_unchanged() {
        let storage = Arc::new(MemoryKeyValueStore::new());
        let api = Arc::new(MockAuthApi::rejecting(401));
        let mut store = SessionStore::new(storage.clone(), api.clone());
        store.restore();

        let err = store.sign_in("a@example.com", "wrong").await.unwrap_err();

        assert!(err.is_authentication());
        assert!(store.session().is_none());
        assert!(storage.is_empty());
        // Exactly one attempt, no retry.
        assert_eq!(api.sign_in_calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_sign_in_keeps_previous_session() {
        let storage = Arc::new(MemoryKeyValueStore::with_entries([
            (ACCESS_TOKEN_KEY, "old-tok"),
            (USER_ID_KEY, "old-user"),
        ]));
        let mut store = SessionStore::new(storage.clone(), Arc::new(MockAuthApi::unreachable()));
        store.restore();

        let err = store.sign_in("a@example.com", "password1").await.unwrap_err();

        assert!(err.is_authentication());
        assert_eq!(store.session(), Some(&Session::new("old-user", "old-tok")));
        assert_eq!(
            stored(storage.as_ref()),
            (Some("old-tok".to_string()), Some("old-user".to_string()))
        );
    }

    #[tokio::test]
    async fn test_sign_up_uses_registration_endpoint() {
        let storage = Arc::new(MemoryKeyValueStore::new());
        let api = Arc::new(MockAuthApi::accepting("tok-new", "u-new"));
        let mut store = SessionStore::new(storage.clone(), api.clone());

        let session = store.sign_up("new@example.com", "longpassword").await.unwrap();

        assert_eq!(session.user_id, "u-new");
        assert_eq!(api.sign_up_calls(), 1);
        assert_eq!(api.sign_in_calls(), 0);
        assert_eq!(
            stored(storage.as_ref()),
            (Some("tok-new".to_string()), Some("u-new".to_string()))
        );
    }

    #[tokio::test]
    async fn test_second_write_failure_rolls_back_first() {
        let storage = Arc::new(FlakyStore::failing_sets_to(USER_ID_KEY));
        let mut store = SessionStore::new(
            storage.clone(),
            Arc::new(MockAuthApi::accepting("tok", "u-1")),
        );
        store.restore();

        let err = store.sign_in("a@example.com", "password1").await.unwrap_err();

        assert!(err.is_storage());
        assert!(store.session().is_none());
        assert_eq!(storage.inner().get(ACCESS_TOKEN_KEY).unwrap(), None);
        assert_eq!(storage.inner().get(USER_ID_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_untouchable_storage_keeps_previous_session() {
        let storage = Arc::new(FlakyStore::failing_writes_to(USER_ID_KEY));
        storage.inner().set(ACCESS_TOKEN_KEY, "old-tok").unwrap();
        storage.inner().set(USER_ID_KEY, "old-user").unwrap();

        let mut store = SessionStore::new(
            storage.clone(),
            Arc::new(MockAuthApi::accepting("new-tok", "new-user")),
        );
        store.restore();

        assert!(store.sign_in("a@example.com", "password1").await.is_err());
        assert_eq!(store.session(), Some(&Session::new("old-user", "old-tok")));
        assert_eq!(
            stored(storage.inner()),
            (Some("old-tok".to_string()), Some("old-user".to_string()))
        );
    }

    #[tokio::test]
    async fn test_failed_rollback_never_mixes_old_and_new_credentials() {
        for writes in 0..4 {
            let storage = Arc::new(FlakyStore::allowing_writes(writes));
            storage.inner().set(ACCESS_TOKEN_KEY, "old-tok").unwrap();
            storage.inner().set(USER_ID_KEY, "old-user").unwrap();

            let mut store = SessionStore::new(
                storage.clone(),
                Arc::new(MockAuthApi::accepting("new-tok", "new-user")),
            );
            store.restore();

            let result = store.sign_in("a@example.com", "password1").await;
            let in_memory = store.session().cloned();

            // Whatever survived on disk is what memory reports...
            assert_eq!(store.restore().cloned(), in_memory, "writes = {writes}");
            // ...and it is never a mix of the two sessions.
            match in_memory {
                None => assert!(result.is_err()),
                Some(session) => assert!(
                    session == Session::new("old-user", "old-tok")
                        || session == Session::new("new-user", "new-tok"),
                    "writes = {writes}: {session:?}"
                ),
            }
        }
    }

    #[tokio::test]
    async fn test_sign_out_clears_memory_and_storage() {
        let storage = Arc::new(MemoryKeyValueStore::new());
        let mut store = SessionStore::new(
            storage.clone(),
            Arc::new(MockAuthApi::accepting("tok", "u-1")),
        );
        store.sign_in("a@example.com", "password1").await.unwrap();

        store.sign_out();

        assert!(store.session().is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_sign_out_is_idempotent() {
        let storage = Arc::new(MemoryKeyValueStore::new());
        let mut store = SessionStore::new(
            storage.clone(),
            Arc::new(MockAuthApi::accepting("tok", "u-1")),
        );
        store.restore();

        store.sign_out();
        store.sign_out();

        assert!(store.session().is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_sign_out_clears_memory_even_if_storage_fails() {
        let storage = Arc::new(FlakyStore::failing_writes_to(ACCESS_TOKEN_KEY));
        storage.inner().set(ACCESS_TOKEN_KEY, "tok").unwrap();
        storage.inner().set(USER_ID_KEY, "u-1").unwrap();
        let mut store = SessionStore::new(
            storage.clone(),
            Arc::new(MockAuthApi::accepting("tok", "u-1")),
        );
        store.restore();

        store.sign_out();

        assert!(store.session().is_none());
        assert_eq!(storage.inner().get(USER_ID_KEY).unwrap(), None);
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("1234567").unwrap_err().is_validation());
        assert!(validate_password("12345678").is_ok());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("").is_err());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("a@example.com").is_ok());
    }
}
