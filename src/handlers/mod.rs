pub mod auth;
pub mod fallback;
pub mod health;
pub mod heroes;
pub mod messages;
pub mod mock_api;
