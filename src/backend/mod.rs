//! The hero collection collaborator.
//!
//! [`HeroBackend`] is the REST resource the hero store talks to. The in-memory
//! implementation simulates it inside the process; the HTTP one reaches any
//! service exposing the same collection endpoint.

pub mod http;
pub mod memory;

use crate::core::error::BackendError;
use crate::models::hero::{HeroRecord, NewHero};
use async_trait::async_trait;

/// Id given to the first hero of an empty collection
pub const FIRST_HERO_ID: u32 = 11;

#[async_trait]
pub trait HeroBackend: Send + Sync {
    /// Every hero, in collection order
    async fn list(&self) -> Result<Vec<HeroRecord>, BackendError>;

    async fn get(&self, id: u32) -> Result<HeroRecord, BackendError>;

    /// Store a new hero under a backend-assigned id
    async fn create(&self, hero: NewHero) -> Result<HeroRecord, BackendError>;

    /// Replace the hero with the same id
    async fn update(&self, hero: HeroRecord) -> Result<HeroRecord, BackendError>;

    async fn delete(&self, id: u32) -> Result<(), BackendError>;
}

/// `max(ids) + 1`, or [`FIRST_HERO_ID`] for an empty collection
pub fn next_hero_id(ids: impl IntoIterator<Item = u32>) -> u32 {
    ids.into_iter().max().map_or(FIRST_HERO_ID, |max| max + 1)
}
