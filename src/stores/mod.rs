pub mod credential_directory;
pub mod hero_store;
pub mod local_storage;
pub mod message_log;
pub mod session_store;
pub mod subscription;
