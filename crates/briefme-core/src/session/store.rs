//! Persisted session store.
//!
//! Holds the authenticated identity in memory and mirrors every mutation into
//! [`ClientStorage`] so that it survives restarts.

use std::sync::Arc;

use tokio::sync::Mutex;

use super::model::{Session, User, UserPatch};
use super::navigation::{DEFAULT_LOGIN_PATH, DEFAULT_PUBLIC_PATHS, Navigator};
use crate::error::{BriefMeError, Result};
use crate::storage::{ClientStorage, SESSION_KEY, TOKEN_KEY, read_token};

/// Store for "who is logged in".
///
/// This is the only component that mutates the [`Session`]. All mutations
/// are serialized through one lock, which is held while the new state is
/// written out.
///
/// # Example
///
/// ```ignore
/// use briefme_core::session::SessionStore;
///
/// let store = SessionStore::load(storage).await?;
/// store.login(user, Some(token)).await?;
/// assert!(store.is_authenticated().await);
/// ```
pub struct SessionStore {
    storage: Arc<dyn ClientStorage>,
    session: Mutex<Session>,
    login_path: String,
    public_paths: Vec<String>,
}

impl SessionStore {
    /// Restores the session from storage, or starts empty.
    ///
    /// A persisted blob that violates the session invariant is loaded with
    /// the authenticated flag dropped.
    pub async fn load(storage: Arc<dyn ClientStorage>) -> Result<Self> {
        let session = match storage.get_item(SESSION_KEY).await? {
            Some(raw) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => session.normalized(),
                Err(e) => {
                    tracing::warn!("[SessionStore] Discarding unreadable session blob: {}", e);
                    Session::default()
                }
            },
            None => Session::default(),
        };

        Ok(Self {
            storage,
            session: Mutex::new(session),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            public_paths: DEFAULT_PUBLIC_PATHS.iter().map(|p| p.to_string()).collect(),
        })
    }

    /// Overrides the login path and the allow-listed public paths.
    pub fn with_routes(mut self, login_path: impl Into<String>, public_paths: Vec<String>) -> Self {
        self.login_path = login_path.into();
        self.public_paths = public_paths;
        self
    }

    pub async fn snapshot(&self) -> Session {
        self.session.lock().await.clone()
    }

    pub async fn user(&self) -> Option<User> {
        self.session.lock().await.user.clone()
    }

    pub async fn token(&self) -> Option<String> {
        self.session.lock().await.token.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.lock().await.is_authenticated
    }

    /// Token as persisted under the flat key.
    pub async fn persisted_token(&self) -> Result<Option<String>> {
        read_token(self.storage.as_ref()).await
    }

    /// Starts an authenticated session.
    ///
    /// A given token replaces the current one and is mirrored into the flat
    /// `token` key. Without one, the token already held is kept; logging in
    /// with no token at all is rejected.
    pub async fn login(&self, user: User, token: Option<String>) -> Result<()> {
        let mut session = self.session.lock().await;

        let token = token.filter(|t| !t.is_empty()).or_else(|| session.token.clone());
        let Some(token) = token else {
            return Err(BriefMeError::invalid_session(
                "login requires a bearer token",
            ));
        };

        let next = Session {
            user: Some(user),
            token: Some(token.clone()),
            is_authenticated: true,
        };

        self.persist_with_token(&session, &next, token).await?;
        *session = next;

        tracing::info!("[SessionStore] Logged in");
        Ok(())
    }

    /// Re-validates an existing session without re-authenticating.
    ///
    /// Sets the user and the authenticated flag to the externally determined
    /// `status`. The token is left untouched. Marking a session authenticated
    /// without a user or without a held token is rejected.
    pub async fn verify(&self, user: Option<User>, status: bool) -> Result<()> {
        let mut session = self.session.lock().await;

        if status && user.is_none() {
            return Err(BriefMeError::invalid_session(
                "cannot mark a session authenticated without a user",
            ));
        }
        if status && session.token.is_none() {
            return Err(BriefMeError::invalid_session(
                "cannot mark a session authenticated without a token",
            ));
        }

        let next = Session {
            user,
            token: session.token.clone(),
            is_authenticated: status,
        };

        self.persist(&next).await?;
        *session = next;

        tracing::debug!("[SessionStore] Session verified: {}", status);
        Ok(())
    }

    /// Shallow-merges `patch` into the current user.
    ///
    /// With no current user the patch becomes the user record as is.
    pub async fn set_user(&self, patch: UserPatch) -> Result<()> {
        let mut session = self.session.lock().await;

        let mut next = session.clone();
        match next.user.as_mut() {
            Some(user) => user.apply(patch),
            None => next.user = Some(User::from_patch(patch)),
        }

        self.persist(&next).await?;
        *session = next;
        Ok(())
    }

    /// Stores a token delivered out of band (e.g. by a login callback).
    ///
    /// The session stays unauthenticated until `login` or `verify` runs.
    pub async fn accept_callback_token(&self, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(BriefMeError::invalid_session("callback token is empty"));
        }

        let mut session = self.session.lock().await;
        let next = Session {
            token: Some(token.clone()),
            ..session.clone()
        };

        self.persist_with_token(&session, &next, token).await?;
        *session = next;
        Ok(())
    }

    /// Ends the session.
    ///
    /// Clears every persisted key, including ones other stores own.
    pub async fn logout(&self) -> Result<()> {
        let mut session = self.session.lock().await;

        self.storage.clear().await?;
        *session = Session::default();

        tracing::info!("[SessionStore] Logged out, client storage cleared");
        Ok(())
    }

    /// Escape hatch for code that cannot call `logout`.
    ///
    /// Removes only the flat token key, then navigates to the login path
    /// unless the current path is public. Returns whether navigation happened.
    pub async fn goto_login(&self, navigator: &dyn Navigator) -> Result<bool> {
        self.storage.remove_item(TOKEN_KEY).await?;

        let current = navigator.current_path();
        if self.is_public_path(&current) {
            tracing::debug!("[SessionStore] Staying on public path {}", current);
            return Ok(false);
        }

        tracing::info!("[SessionStore] Redirecting {} to {}", current, self.login_path);
        navigator.navigate(&self.login_path);
        Ok(true)
    }

    fn is_public_path(&self, path: &str) -> bool {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let trimmed = match path.trim_end_matches('/') {
            "" => "/",
            other => other,
        };
        self.public_paths.iter().any(|p| p == trimmed)
    }

    async fn persist(&self, session: &Session) -> Result<()> {
        let raw = serde_json::to_string(session)?;
        self.storage.set_item(SESSION_KEY, raw).await
    }

    /// Writes the session blob, then the flat token key.
    ///
    /// If the token write fails the previous blob is put back, so the two keys
    /// never disagree.
    async fn persist_with_token(&self, previous: &Session, next: &Session, token: String) -> Result<()> {
        self.persist(next).await?;

        if let Err(e) = self.storage.set_item(TOKEN_KEY, token).await {
            if let Err(restore) = self.persist(previous).await {
                tracing::error!(
                    "[SessionStore] Failed to restore session blob after token write error: {}",
                    restore
                );
            }
            return Err(e);
        }
        Ok(())
    }
}
