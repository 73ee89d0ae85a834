pub mod api;
pub mod hero;
pub mod user;
