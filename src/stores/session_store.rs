use crate::core::error::AuthError;
use crate::models::user::{AuthenticatedSession, Identity};
use crate::stores::credential_directory::CredentialDirectory;
use crate::stores::local_storage::KeyValueStorage;
use crate::stores::subscription::Subscription;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Storage key of the persisted session slot
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Minimum password length accepted by registration
pub const MIN_PASSWORD_LEN: usize = 6;

/// Holds the logged-in identity, if any, and keeps the persisted slot in step with it.
///
/// Every mutation writes the slot first and publishes second, so a storage
/// failure never leaves memory and storage disagreeing.
pub struct SessionStore {
    directory: CredentialDirectory,
    storage: Arc<dyn KeyValueStorage>,
    current: watch::Sender<Option<AuthenticatedSession>>,
    write_lock: Mutex<()>,
}

impl SessionStore {
    /// Build the store and rehydrate the session from storage
    pub fn new(directory: CredentialDirectory, storage: Arc<dyn KeyValueStorage>) -> Self {
        let restored = restore_session(storage.as_ref());
        let (current, _) = watch::channel(restored);

        Self {
            directory,
            storage,
            current,
            write_lock: Mutex::new(()),
        }
    }

    pub fn login(&self, username: &str, secret: &str) -> Result<AuthenticatedSession, AuthError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let Some(identity) = self.directory.find_by_credentials(username, secret) else {
            warn!(username = %username, "Login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        let session = self.start_session(&identity)?;
        info!(user_id = session.id, username = %session.username, "User logged in");
        Ok(session)
    }

    /// Register a new identity and log in as it
    pub fn register(
        &self,
        username: &str,
        secret: &str,
        secret_confirmation: &str,
    ) -> Result<AuthenticatedSession, AuthError> {
        if secret != secret_confirmation {
            return Err(AuthError::PasswordMismatch);
        }

        if secret.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::PasswordTooShort);
        }

        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        if self.directory.exists_by_username(username) {
            warn!(username = %username, "Registration rejected, username taken");
            return Err(AuthError::UsernameTaken);
        }

        let identity = self.directory.add(username, secret)?;
        let session = match self.start_session(&identity) {
            Ok(session) => session,
            Err(e) => {
                self.directory.remove(&identity.username);
                warn!(username = %identity.username, error = %e, "Registration rolled back");
                return Err(e);
            }
        };

        info!(user_id = session.id, username = %session.username, "User registered");
        Ok(session)
    }

    /// Clear the session and the persisted slot. A no-op when nobody is logged in.
    pub fn logout(&self) -> Result<(), AuthError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        self.storage
            .remove_item(CURRENT_USER_KEY)
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        if let Some(previous) = self.current.send_replace(None) {
            info!(user_id = previous.id, username = %previous.username, "User logged out");
        } else {
            debug!("Logout requested while anonymous");
        }
        Ok(())
    }

    pub fn current_session(&self) -> Option<AuthenticatedSession> {
        self.current.borrow().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.borrow().is_some()
    }

    /// Follow the current session: the present value first, then every change
    pub fn subscribe(&self) -> Subscription<Option<AuthenticatedSession>> {
        Subscription::new(self.current.subscribe())
    }

    fn start_session(&self, identity: &Identity) -> Result<AuthenticatedSession, AuthError> {
        let session = identity.to_session();
        let encoded =
            serde_json::to_string(&session).map_err(|e| AuthError::Storage(e.to_string()))?;

        self.storage
            .set_item(CURRENT_USER_KEY, &encoded)
            .map_err(|e| AuthError::Storage(e.to_string()))?;
        self.current.send_replace(Some(session.clone()));

        Ok(session)
    }
}

/// Read the persisted slot. Anything unreadable means nobody is logged in.
fn restore_session(storage: &dyn KeyValueStorage) -> Option<AuthenticatedSession> {
    let raw = match storage.get_item(CURRENT_USER_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(error = %e, "Failed to read persisted session, starting anonymous");
            return None;
        }
    };

    match serde_json::from_str::<AuthenticatedSession>(&raw) {
        Ok(session) => {
            info!(user_id = session.id, username = %session.username, "Session restored");
            Some(session)
        }
        Err(e) => {
            warn!(error = %e, "Persisted session is malformed, starting anonymous");
            None
        }
    }
}
