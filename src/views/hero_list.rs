use crate::core::error::HeroError;
use crate::models::hero::{HeroRecord, NewHero};
use crate::stores::hero_store::HeroStore;
use crate::stores::subscription::Subscription;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Outcome of [`HeroListView::add`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Added {
    pub created: HeroRecord,
    /// The list fetched right after the create
    pub heroes: Vec<HeroRecord>,
}

/// The hero list page.
///
/// Keeps the displayed list consistent by re-fetching it after every add or
/// delete. When loads overlap, only the most recently started one publishes.
pub struct HeroListView {
    store: Arc<HeroStore>,
    heroes: watch::Sender<Vec<HeroRecord>>,
    generation: AtomicU64,
}

impl HeroListView {
    pub fn new(store: Arc<HeroStore>) -> Self {
        let (heroes, _) = watch::channel(Vec::new());
        Self {
            store,
            heroes,
            generation: AtomicU64::new(0),
        }
    }

    /// Fetch the list and publish it.
    ///
    /// Always returns what this call fetched, even when a newer load has
    /// started in the meantime and the result is not published.
    pub async fn load(&self) -> Vec<HeroRecord> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let heroes = self.store.list().await;

        // The generation is re-read under the channel's write lock so a newer
        // load cannot publish between the check and the replace.
        let published = self.heroes.send_if_modified(|current| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *current = heroes.clone();
            true
        });
        if !published {
            debug!(generation, "Superseded hero list load discarded");
        }
        heroes
    }

    /// Add a hero carrying only a name and return it with the refreshed list.
    /// Blank names are ignored.
    pub async fn add(&self, name: &str) -> Result<Option<Added>, HeroError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        let created = self.store.create(NewHero::named(name)).await?;
        let heroes = self.load().await;
        Ok(Some(Added { created, heroes }))
    }

    /// Delete a hero and return the refreshed list
    pub async fn delete(&self, id: u32) -> Result<Vec<HeroRecord>, HeroError> {
        self.store.delete(id).await?;
        Ok(self.load().await)
    }

    /// The list as last published
    pub fn heroes(&self) -> Vec<HeroRecord> {
        self.heroes.borrow().clone()
    }

    pub fn subscribe(&self) -> Subscription<Vec<HeroRecord>> {
        Subscription::new(self.heroes.subscribe())
    }
}
