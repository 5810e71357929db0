//! Process-wide session: the bearer credential, the cached user, and the
//! `loading` flag that gates the first render. `SessionStore` is cheap to clone
//! and every clone observes the same state. Only the auth manager and the
//! gateway's 401 policy mutate it.

pub mod storage;

use crate::{errors::AppError, features::users::User};
use secrecy::{ExposeSecret, SecretString};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::warn;

pub use storage::{FileStorage, MemoryStorage, PersistedSession, SessionStorage};

#[derive(Default)]
struct SessionState {
    credential: Option<SecretString>,
    user: Option<User>,
    loading: bool,
}

#[derive(Clone)]
pub struct SessionStore {
    state: Arc<RwLock<SessionState>>,
    storage: Arc<dyn SessionStorage>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read();
        f.debug_struct("SessionStore")
            .field("credential", &state.credential.as_ref().map(|_| "***"))
            .field("user", &state.user)
            .field("loading", &state.loading)
            .finish()
    }
}

impl SessionStore {
    /// Creates an empty session backed by `storage`. The store starts in the
    /// loading state until `finish_loading` is called.
    #[must_use]
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            state: Arc::new(RwLock::new(SessionState {
                loading: true,
                ..SessionState::default()
            })),
            storage,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn credential(&self) -> Option<SecretString> {
        self.read().credential.clone()
    }

    #[must_use]
    pub fn has_credential(&self) -> bool {
        self.read().credential.is_some()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.read().user.clone()
    }

    /// A session is authenticated once both the credential and the user are known.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        let state = self.read();
        state.credential.is_some() && state.user.is_some()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.read().loading
    }

    pub(crate) fn finish_loading(&self) {
        self.write().loading = false;
    }

    /// Reads the persisted credential without touching in-memory state.
    pub(crate) fn persisted(&self) -> Option<PersistedSession> {
        match self.storage.load() {
            Ok(session) => session.filter(|s| !s.token.trim().is_empty()),
            Err(err) => {
                warn!("Discarding unreadable session: {err}");
                None
            }
        }
    }

    /// Attaches a credential to outgoing calls before the user is resolved.
    pub(crate) fn attach_credential(&self, token: SecretString) {
        let mut state = self.write();
        state.credential = Some(token);
        state.user = None;
    }

    /// Stores an authenticated session in memory and in client-local storage.
    pub(crate) fn establish(&self, token: SecretString, user: User) -> Result<(), AppError> {
        let persisted = PersistedSession {
            token: token.expose_secret().to_string(),
            user: Some(user.clone()),
        };
        {
            let mut state = self.write();
            state.credential = Some(token);
            state.user = Some(user);
        }
        self.storage.save(&persisted)
    }

    /// Wipes the credential and user from memory and storage. Storage failures
    /// are logged; the in-memory session is always cleared.
    pub(crate) fn clear(&self) {
        {
            let mut state = self.write();
            state.credential = None;
            state.user = None;
        }
        if let Err(err) = self.storage.clear() {
            warn!("Failed to clear persisted session: {err}");
        }
    }
}
