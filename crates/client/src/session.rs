//! The session holder: process-wide identity with an explicit lifecycle.
//!
//! Owned by the application root and passed to whatever needs it - there
//! is no ambient global. Lifecycle: construct, [`Session::init`] once on
//! startup, then [`Session::login`] / [`Session::logout`]; dropping the
//! session is teardown.
//!
//! Only an opaque user id is persisted across restarts, via an
//! [`IdentityStore`]. Rehydration re-fetches the full record: a
//! definitive NotFound clears the stale id, while a transient transport
//! failure leaves the id in place so the next startup can retry - the
//! two failure classes are deliberately not conflated.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tokio::sync::watch;

use voltbay_core::{RecordId, Resource, User};

use crate::api::StoreClient;
use crate::error::ClientError;

/// The identity state machine.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    /// No identity; the default and the result of logout.
    #[default]
    Unauthenticated,
    /// Startup rehydration in flight.
    Initializing,
    /// A known user. The record is the latest fetched copy, not live.
    Authenticated(Box<User>),
}

impl SessionState {
    /// The authenticated user, if any.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// Persistence for the opaque user id (one storage key).
pub trait IdentityStore: Send + Sync {
    /// Read the persisted id, if any.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Storage` if the backing store is unreadable.
    fn load(&self) -> Result<Option<RecordId>, ClientError>;

    /// Persist the id.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Storage` if the write fails.
    fn save(&self, id: &RecordId) -> Result<(), ClientError>;

    /// Remove the persisted id. Clearing an empty store is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Storage` if the removal fails.
    fn clear(&self) -> Result<(), ClientError>;
}

/// File-backed identity store: one id string in one file.
pub struct FileIdentityStore {
    path: PathBuf,
}

impl FileIdentityStore {
    /// Store the id at the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IdentityStore for FileIdentityStore {
    fn load(&self) -> Result<Option<RecordId>, ClientError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(RecordId::from(trimmed)))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ClientError::Storage(e)),
        }
    }

    fn save(&self, id: &RecordId) -> Result<(), ClientError> {
        std::fs::write(&self.path, id.as_str())?;
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Storage(e)),
        }
    }
}

/// In-memory identity store for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryIdentityStore {
    id: Mutex<Option<RecordId>>,
}

impl MemoryIdentityStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with an id (simulates a previous session).
    #[must_use]
    pub fn with_id(id: RecordId) -> Self {
        Self {
            id: Mutex::new(Some(id)),
        }
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn load(&self) -> Result<Option<RecordId>, ClientError> {
        Ok(self.id.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn save(&self, id: &RecordId) -> Result<(), ClientError> {
        *self.id.lock().unwrap_or_else(PoisonError::into_inner) = Some(id.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        *self.id.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// The session holder.
///
/// Every transition is published on a watch channel; cart and wishlist
/// consumers subscribe and re-key their queries when the identity
/// changes.
pub struct Session {
    client: StoreClient,
    identity: Box<dyn IdentityStore>,
    state: watch::Sender<SessionState>,
}

impl Session {
    /// Create a session in the `Unauthenticated` state.
    #[must_use]
    pub fn new(client: StoreClient, identity: Box<dyn IdentityStore>) -> Self {
        Self {
            client,
            identity,
            state: watch::Sender::new(SessionState::Unauthenticated),
        }
    }

    /// Rehydrate identity on startup.
    ///
    /// No persisted id ends `Unauthenticated`. A persisted id is
    /// validated by re-fetching the user record: success authenticates;
    /// NotFound clears the stale id; a transport failure ends
    /// `Unauthenticated` but keeps the id for the next attempt.
    ///
    /// `Initializing` is never a resting state: every outcome, including
    /// an identity-store failure, ends in `Unauthenticated` or
    /// `Authenticated` before this returns.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Storage` if the identity store fails.
    pub async fn init(&self) -> Result<SessionState, ClientError> {
        self.state.send_replace(SessionState::Initializing);

        let result = self.rehydrate().await;
        if result.is_err() {
            self.transition(SessionState::Unauthenticated);
        }
        result
    }

    async fn rehydrate(&self) -> Result<SessionState, ClientError> {
        let Some(id) = self.identity.load()? else {
            return Ok(self.transition(SessionState::Unauthenticated));
        };

        match self.client.fetch_by_id::<User>(Resource::Users, id.as_str()).await {
            Ok(user) => Ok(self.transition(SessionState::Authenticated(Box::new(user)))),
            Err(e) if e.is_not_found() => {
                tracing::info!(%id, "persisted user no longer exists, clearing identity");
                self.identity.clear()?;
                Ok(self.transition(SessionState::Unauthenticated))
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, "rehydration failed, keeping persisted id");
                Ok(self.transition(SessionState::Unauthenticated))
            }
        }
    }

    /// Authenticate and persist the user's id.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Unauthorized` for bad credentials,
    /// `ClientError::Storage` if persisting the id fails.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ClientError> {
        let user = self.client.login(email, password).await?;
        self.identity.save(&user.id)?;
        self.transition(SessionState::Authenticated(Box::new(user.clone())));
        Ok(user)
    }

    /// Drop the identity and clear the persisted id.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Storage` if clearing the id fails.
    pub fn logout(&self) -> Result<(), ClientError> {
        self.identity.clear()?;
        self.transition(SessionState::Unauthenticated);
        Ok(())
    }

    /// Replace the in-memory user record after a profile update.
    ///
    /// The persisted id is untouched; it is immutable post-login.
    pub fn update_user(&self, user: User) {
        self.transition(SessionState::Authenticated(Box::new(user)));
    }

    /// Re-fetch the current user's record.
    ///
    /// Logs the session out only on a definitive NotFound; transport
    /// failures propagate and leave the session untouched.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` on transport failure.
    pub async fn refresh(&self) -> Result<Option<User>, ClientError> {
        let Some(id) = self.current_user().map(|u| u.id) else {
            return Ok(None);
        };

        match self.client.fetch_by_id::<User>(Resource::Users, id.as_str()).await {
            Ok(user) => {
                self.update_user(user.clone());
                Ok(Some(user))
            }
            Err(e) if e.is_not_found() => {
                self.logout()?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// The current state (a clone of the latest snapshot).
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// The authenticated user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user().cloned()
    }

    /// Is a user logged in?
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().user().is_some()
    }

    /// Observe transitions. Receivers see every state change, including
    /// the `Initializing` hop during startup.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    fn transition(&self, next: SessionState) -> SessionState {
        self.state.send_replace(next);
        self.state.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    fn session_with(identity: Box<dyn IdentityStore>) -> Session {
        Session::new(StoreClient::new(&ClientConfig::default()), identity)
    }

    #[test]
    fn test_starts_unauthenticated() {
        let session = session_with(Box::new(MemoryIdentityStore::new()));
        assert!(!session.is_authenticated());
        assert!(session.current_user().is_none());
    }

    #[test]
    fn test_logout_clears_persisted_id() {
        let session = session_with(Box::new(MemoryIdentityStore::with_id(RecordId::new("u1"))));
        session.logout().expect("logout");
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_watch_observes_transitions() {
        let session = session_with(Box::new(MemoryIdentityStore::new()));
        let mut receiver = session.watch();

        session.update_user(sample_user());
        assert!(receiver.has_changed().expect("sender alive"));
        assert!(receiver.borrow_and_update().user().is_some());

        session.logout().expect("logout");
        assert!(receiver.has_changed().expect("sender alive"));
        assert!(receiver.borrow_and_update().user().is_none());
    }

    struct BrokenIdentityStore;

    impl IdentityStore for BrokenIdentityStore {
        fn load(&self) -> Result<Option<RecordId>, ClientError> {
            Err(ClientError::Storage(std::io::Error::other("disk gone")))
        }

        fn save(&self, _id: &RecordId) -> Result<(), ClientError> {
            Err(ClientError::Storage(std::io::Error::other("disk gone")))
        }

        fn clear(&self) -> Result<(), ClientError> {
            Err(ClientError::Storage(std::io::Error::other("disk gone")))
        }
    }

    #[tokio::test]
    async fn test_init_storage_failure_does_not_strand_initializing() {
        let session = session_with(Box::new(BrokenIdentityStore));
        let mut receiver = session.watch();

        let err = session.init().await.expect_err("load failure propagates");
        assert!(matches!(err, ClientError::Storage(_)), "got {err:?}");

        // Watchers must see a terminal state, not a hung Initializing.
        assert!(matches!(session.state(), SessionState::Unauthenticated));
        assert!(matches!(
            *receiver.borrow_and_update(),
            SessionState::Unauthenticated
        ));
    }

    #[test]
    fn test_file_identity_store_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileIdentityStore::new(dir.path().join("identity"));

        assert!(store.load().expect("load").is_none());

        store.save(&RecordId::new("u42")).expect("save");
        assert_eq!(store.load().expect("load"), Some(RecordId::new("u42")));

        store.clear().expect("clear");
        assert!(store.load().expect("load").is_none());
        // Clearing twice is a no-op, not an error.
        store.clear().expect("clear again");
    }

    fn sample_user() -> User {
        User {
            id: RecordId::new("u1"),
            email: voltbay_core::Email::parse("a@b.com").expect("valid email"),
            password: None,
            first_name: "A".to_owned(),
            last_name: "B".to_owned(),
            phone: String::new(),
            avatar: String::new(),
            is_verified: false,
            created_at: chrono::Utc::now(),
        }
    }
}
