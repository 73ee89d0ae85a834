use crate::models::user::AuthenticatedSession;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub success: bool,
    pub user: Option<AuthenticatedSession>,
}

impl SessionResponse {
    pub fn of(user: Option<AuthenticatedSession>) -> Self {
        Self {
            success: true,
            user,
        }
    }
}

/// Body of the list page's "add" box
#[derive(Debug, Deserialize)]
pub struct AddHeroRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessagesResponse {
    pub messages: Vec<String>,
}
