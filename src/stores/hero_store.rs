use crate::backend::HeroBackend;
use crate::core::error::{BackendError, HeroError};
use crate::models::hero::{HeroRecord, NewHero};
use crate::stores::message_log::MessageLog;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// CRUD façade over the hero backend.
///
/// Nothing is cached: every read goes to the backend, and callers that display a
/// collection re-issue [`HeroStore::list`] after a write. Transport failures are
/// caught here and reported to the message log.
pub struct HeroStore {
    backend: Arc<dyn HeroBackend>,
    messages: Arc<MessageLog>,
}

impl HeroStore {
    pub fn new(backend: Arc<dyn HeroBackend>, messages: Arc<MessageLog>) -> Self {
        Self { backend, messages }
    }

    pub fn messages(&self) -> &Arc<MessageLog> {
        &self.messages
    }

    /// Every hero in backend order; empty when the backend cannot be reached
    pub async fn list(&self) -> Vec<HeroRecord> {
        match self.backend.list().await {
            Ok(heroes) => {
                debug!(count = heroes.len(), "Fetched heroes");
                self.log("fetched heroes");
                heroes
            }
            Err(e) => {
                self.report_failure("getHeroes", &e);
                Vec::new()
            }
        }
    }

    pub async fn get(&self, id: u32) -> Result<HeroRecord, HeroError> {
        match self.backend.get(id).await {
            Ok(hero) => {
                self.log(format!("fetched hero id={}", id));
                Ok(hero)
            }
            Err(e) => Err(self.fail(&format!("getHero id={}", id), e)),
        }
    }

    pub async fn create(&self, hero: NewHero) -> Result<HeroRecord, HeroError> {
        match self.backend.create(hero).await {
            Ok(created) => {
                info!(hero_id = created.id, name = %created.name, "Hero created");
                self.log(format!("added hero w/ id={}", created.id));
                Ok(created)
            }
            Err(e) => Err(self.fail("addHero", e)),
        }
    }

    /// Replace the hero with the same id
    pub async fn update(&self, hero: HeroRecord) -> Result<HeroRecord, HeroError> {
        let id = hero.id;
        match self.backend.update(hero).await {
            Ok(updated) => {
                info!(hero_id = id, "Hero updated");
                self.log(format!("updated hero id={}", id));
                Ok(updated)
            }
            Err(e) => Err(self.fail("updateHero", e)),
        }
    }

    pub async fn delete(&self, id: u32) -> Result<(), HeroError> {
        match self.backend.delete(id).await {
            Ok(()) => {
                info!(hero_id = id, "Hero deleted");
                self.log(format!("deleted hero id={}", id));
                Ok(())
            }
            Err(e) => Err(self.fail("deleteHero", e)),
        }
    }

    fn log(&self, message: impl AsRef<str>) {
        self.messages.add(format!("HeroService: {}", message.as_ref()));
    }

    fn report_failure(&self, operation: &str, err: &BackendError) {
        warn!(operation = operation, error = %err, "Hero backend call failed");
        self.log(format!("{} failed: {}", operation, err));
    }

    fn fail(&self, operation: &str, err: BackendError) -> HeroError {
        self.report_failure(operation, &err);
        err.into()
    }
}
