use crate::backend::{next_hero_id, HeroBackend};
use crate::core::error::BackendError;
use crate::models::hero::{HeroRecord, NewHero, Origin};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

/// In-process simulation of the hero REST resource
pub struct InMemoryHeroBackend {
    heroes: DashMap<u32, HeroRecord>,
    /// Serializes id assignment on create
    create_lock: Mutex<()>,
    /// Simulated network latency applied to every call
    delay: Duration,
}

impl InMemoryHeroBackend {
    /// Create an empty collection
    pub fn new(delay: Duration) -> Self {
        Self {
            heroes: DashMap::new(),
            create_lock: Mutex::new(()),
            delay,
        }
    }

    /// Create a collection holding the nine starter heroes (ids 12-20)
    pub fn seeded(delay: Duration) -> Self {
        let backend = Self::new(delay);
        for hero in seed_heroes() {
            backend.heroes.insert(hero.id, hero);
        }
        backend
    }

    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl HeroBackend for InMemoryHeroBackend {
    async fn list(&self) -> Result<Vec<HeroRecord>, BackendError> {
        self.simulate_latency().await;
        let mut heroes: Vec<HeroRecord> =
            self.heroes.iter().map(|entry| entry.value().clone()).collect();
        heroes.sort_by_key(|hero| hero.id);
        Ok(heroes)
    }

    async fn get(&self, id: u32) -> Result<HeroRecord, BackendError> {
        self.simulate_latency().await;
        self.heroes
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(BackendError::NotFound(id))
    }

    async fn create(&self, hero: NewHero) -> Result<HeroRecord, BackendError> {
        self.simulate_latency().await;
        let _guard = self.create_lock.lock().unwrap_or_else(|e| e.into_inner());

        let id = next_hero_id(self.heroes.iter().map(|entry| *entry.key()));
        let record = hero.with_id(id);
        self.heroes.insert(id, record.clone());

        debug!(hero_id = id, "Mock backend stored hero");
        Ok(record)
    }

    async fn update(&self, hero: HeroRecord) -> Result<HeroRecord, BackendError> {
        self.simulate_latency().await;
        let Some(mut entry) = self.heroes.get_mut(&hero.id) else {
            return Err(BackendError::NotFound(hero.id));
        };
        *entry = hero.clone();
        Ok(hero)
    }

    async fn delete(&self, id: u32) -> Result<(), BackendError> {
        self.simulate_latency().await;
        self.heroes
            .remove(&id)
            .map(|_| ())
            .ok_or(BackendError::NotFound(id))
    }
}

fn seed_heroes() -> Vec<HeroRecord> {
    let seed = [
        (12, "Dr. Nice", "Healing", 5, Origin::Earth, true, "A kind doctor with healing abilities"),
        (13, "Bombasto", "Explosion", 7, Origin::Mars, true, "Creates powerful explosions"),
        (14, "Celeritas", "Speed", 8, Origin::Mercury, true, "The fastest hero alive"),
        (15, "Magneta", "Magnetism", 6, Origin::Earth, false, "Controls magnetic fields"),
        (16, "RubberMan", "Elasticity", 4, Origin::Earth, true, "Can stretch his body to any shape"),
        (17, "Dynama", "Energy", 7, Origin::Jupiter, true, "Manipulates energy forms"),
        (18, "Dr. IQ", "Intelligence", 9, Origin::Earth, true, "Super genius with vast knowledge"),
        (19, "Magma", "Fire", 6, Origin::Venus, false, "Controls fire and heat"),
        (20, "Tornado", "Wind", 5, Origin::Neptune, true, "Creates powerful wind storms"),
    ];

    seed.into_iter()
        .map(|(id, name, power, level, origin, is_active, description)| HeroRecord {
            id,
            name: name.to_string(),
            power: power.to_string(),
            level,
            origin: Some(origin),
            is_active,
            description: description.to_string(),
        })
        .collect()
}
