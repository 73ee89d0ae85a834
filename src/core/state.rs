// Application state (AppState)

use crate::backend::http::HttpHeroBackend;
use crate::backend::memory::InMemoryHeroBackend;
use crate::backend::HeroBackend;
use crate::core::config::{BackendKind, Config};
use crate::stores::credential_directory::CredentialDirectory;
use crate::stores::hero_store::HeroStore;
use crate::stores::local_storage::{FileStorage, KeyValueStorage, MemoryStorage};
use crate::stores::message_log::MessageLog;
use crate::stores::session_store::SessionStore;
use crate::views::hero_list::HeroListView;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Shared application state
///
/// Every store is constructed here once and handed to the request handlers;
/// nothing lives in module-level globals.
#[derive(Clone)]
pub struct AppState {
    /// Logged-in identity and its persisted slot
    pub session: Arc<SessionStore>,

    /// CRUD façade used by the detail page and the dashboard
    pub heroes: Arc<HeroStore>,

    /// The hero list page, refreshed after every write
    pub hero_list: Arc<HeroListView>,

    /// Status messages shown under every page
    pub messages: Arc<MessageLog>,

    /// The mock collection served at `/api/heroes`
    pub mock_backend: Arc<InMemoryHeroBackend>,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let config = Arc::new(config);

        let storage: Arc<dyn KeyValueStorage> = match &config.session.storage_path {
            Some(path) => {
                info!(path = %path.display(), "Using file-backed session storage");
                Arc::new(FileStorage::open(path.clone()).context("Failed to open session storage")?)
            }
            None => Arc::new(MemoryStorage::new()),
        };
        let session = Arc::new(SessionStore::new(CredentialDirectory::seeded(), storage));

        let mock_backend = Arc::new(InMemoryHeroBackend::seeded(Duration::from_millis(
            config.backend.delay_ms,
        )));

        let backend: Arc<dyn HeroBackend> = match config.backend.kind {
            BackendKind::Memory => mock_backend.clone(),
            BackendKind::Http => {
                // validate() guarantees the URL for this kind
                let base_url = config.backend.base_url.as_deref().unwrap_or_default();
                let client = HttpHeroBackend::new(
                    base_url,
                    Duration::from_secs(config.backend.timeout_secs),
                )
                .context("Failed to create hero API client")?;
                info!(endpoint = %client.endpoint(), "Using remote hero backend");
                Arc::new(client)
            }
        };

        let messages = Arc::new(MessageLog::new());
        let heroes = Arc::new(HeroStore::new(backend, messages.clone()));
        let hero_list = Arc::new(HeroListView::new(heroes.clone()));

        Ok(Self {
            session,
            heroes,
            hero_list,
            messages,
            mock_backend,
            config,
        })
    }
}
