use serde::{Deserialize, Serialize};

/// A registered username/secret pair held by the credential directory
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub id: u32,
    /// Unique, compared case-sensitively
    pub username: String,
    /// Stored and compared as a plain value
    pub secret: String,
}

impl Identity {
    pub fn new(id: u32, username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            secret: secret.into(),
        }
    }

    /// The public projection of this identity, without the secret
    pub fn to_session(&self) -> AuthenticatedSession {
        AuthenticatedSession {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// The identity currently considered logged in.
///
/// This is also the exact JSON shape kept in the persisted session slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedSession {
    pub id: u32,
    pub username: String,
}
