use crate::core::error::AuthError;
use crate::models::user::Identity;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::{Arc, Mutex};

/// Id given to the first identity of an empty directory
pub const FIRST_IDENTITY_ID: u32 = 1;

/// In-memory directory of registered identities, keyed by username
pub struct CredentialDirectory {
    identities: DashMap<String, Arc<Identity>>,
    /// Serializes id assignment so two registrations never share an id
    add_lock: Mutex<()>,
}

impl CredentialDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self {
            identities: DashMap::new(),
            add_lock: Mutex::new(()),
        }
    }

    /// Create a directory holding the two built-in accounts
    pub fn seeded() -> Self {
        let directory = Self::new();
        for identity in [
            Identity::new(1, "admin", "admin123"),
            Identity::new(2, "user", "user123"),
        ] {
            directory
                .identities
                .insert(identity.username.clone(), Arc::new(identity));
        }
        directory
    }

    /// Exact match on both username and secret
    pub fn find_by_credentials(&self, username: &str, secret: &str) -> Option<Arc<Identity>> {
        self.identities
            .get(username)
            .filter(|entry| entry.value().secret == secret)
            .map(|entry| Arc::clone(entry.value()))
    }

    pub fn exists_by_username(&self, username: &str) -> bool {
        self.identities.contains_key(username)
    }

    /// Append a new identity with the next free id
    pub fn add(&self, username: &str, secret: &str) -> Result<Arc<Identity>, AuthError> {
        let _guard = self.add_lock.lock().unwrap_or_else(|e| e.into_inner());

        let id = self.next_id();
        match self.identities.entry(username.to_string()) {
            Entry::Occupied(_) => Err(AuthError::UsernameTaken),
            Entry::Vacant(slot) => {
                let identity = Arc::new(Identity::new(id, username, secret));
                slot.insert(Arc::clone(&identity));
                Ok(identity)
            }
        }
    }

    /// Drop an identity. Used to undo an `add` whose session could not be started.
    pub fn remove(&self, username: &str) -> Option<Arc<Identity>> {
        let _guard = self.add_lock.lock().unwrap_or_else(|e| e.into_inner());
        self.identities.remove(username).map(|(_, identity)| identity)
    }

    fn next_id(&self) -> u32 {
        self.identities
            .iter()
            .map(|entry| entry.value().id)
            .max()
            .map_or(FIRST_IDENTITY_ID, |max| max + 1)
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}
