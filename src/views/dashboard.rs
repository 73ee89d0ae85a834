use crate::models::hero::HeroRecord;
use crate::stores::hero_store::HeroStore;

/// Heroes shown on the dashboard: the 2nd through 5th of the backend's order
pub async fn top_heroes(store: &HeroStore) -> Vec<HeroRecord> {
    store.list().await.into_iter().skip(1).take(4).collect()
}
