use crate::backend::HeroBackend;
use crate::core::error::BackendError;
use crate::models::hero::{HeroRecord, NewHero};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use std::time::Duration;

/// Client for a remote hero collection at `<base_url>/api/heroes`
pub struct HttpHeroBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpHeroBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint: format!("{}/api/heroes", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn hero_url(&self, id: u32) -> String {
        format!("{}/{}", self.endpoint, id)
    }
}

/// Map a non-success status to a backend error, 404 meaning the hero is absent
fn check_status(response: Response, id: Option<u32>) -> Result<Response, BackendError> {
    let status = response.status();
    match (status, id) {
        (status, _) if status.is_success() => Ok(response),
        (StatusCode::NOT_FOUND, Some(id)) => Err(BackendError::NotFound(id)),
        (status, _) => Err(BackendError::Transport(format!(
            "Hero API returned error status: {}",
            status
        ))),
    }
}

fn transport(err: reqwest::Error) -> BackendError {
    BackendError::Transport(err.to_string())
}

#[async_trait]
impl HeroBackend for HttpHeroBackend {
    async fn list(&self) -> Result<Vec<HeroRecord>, BackendError> {
        let response = self.client.get(&self.endpoint).send().await.map_err(transport)?;
        check_status(response, None)?
            .json::<Vec<HeroRecord>>()
            .await
            .map_err(transport)
    }

    async fn get(&self, id: u32) -> Result<HeroRecord, BackendError> {
        let response = self.client.get(self.hero_url(id)).send().await.map_err(transport)?;
        check_status(response, Some(id))?
            .json::<HeroRecord>()
            .await
            .map_err(transport)
    }

    async fn create(&self, hero: NewHero) -> Result<HeroRecord, BackendError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&hero)
            .send()
            .await
            .map_err(transport)?;
        check_status(response, None)?
            .json::<HeroRecord>()
            .await
            .map_err(transport)
    }

    async fn update(&self, hero: HeroRecord) -> Result<HeroRecord, BackendError> {
        let response = self
            .client
            .put(self.hero_url(hero.id))
            .json(&hero)
            .send()
            .await
            .map_err(transport)?;
        check_status(response, Some(hero.id))?
            .json::<HeroRecord>()
            .await
            .map_err(transport)
    }

    async fn delete(&self, id: u32) -> Result<(), BackendError> {
        let response = self
            .client
            .delete(self.hero_url(id))
            .send()
            .await
            .map_err(transport)?;
        check_status(response, Some(id))?;
        Ok(())
    }
}
