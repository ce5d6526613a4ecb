use std::sync::Arc;

use crate::db::KeyValueStore;
use crate::entities::Place;

pub const PLACES_KEY: &str = "@places";

pub type DynStore = Arc<dyn KeyValueStore + Send + Sync>;

/// Keeps the whole place list under one fixed key. Failures never reach the caller.
#[derive(Clone)]
pub struct PlaceRepository {
    store: DynStore,
    key: String,
}

impl PlaceRepository {
    pub fn new(store: DynStore) -> Self {
        Self {
            store,
            key: PLACES_KEY.into(),
        }
    }

    #[tracing::instrument(skip(self, places), fields(key = %self.key, count = places.len()))]
    pub async fn save(&self, places: &[Place]) {
        let value = match serde_json::to_string(places) {
            Ok(value) => value,
            Err(err) => {
                tracing::error!("failed to encode places: {}", err);
                return;
            }
        };

        if let Err(err) = self.store.set(&self.key, &value).await {
            tracing::error!("failed to save places: {}", err);
        }
    }

    /// Absent and malformed values both come back as `None`.
    #[tracing::instrument(skip(self), fields(key = %self.key))]
    pub async fn load(&self) -> Option<Vec<Place>> {
        let value = match self.store.get(&self.key).await {
            Ok(Some(value)) => value,
            Ok(None) => {
                tracing::info!("no saved places");
                return None;
            }
            Err(err) => {
                tracing::error!("failed to read places: {}", err);
                return None;
            }
        };

        match serde_json::from_str(&value) {
            Ok(places) => Some(places),
            Err(err) => {
                tracing::warn!("discarding malformed places: {}", err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{PlaceRepository, PLACES_KEY};
    use crate::db::{KeyValueStore, SqliteStore};
    use crate::engine::testing::BrokenStore;
    use crate::entities::{Coordinates, Place, PlaceCandidate};

    async fn sqlite() -> Arc<SqliteStore> {
        Arc::new(SqliteStore::new("sqlite::memory:", 1).await.unwrap())
    }

    fn helsinki() -> Place {
        Place::new(
            42,
            Coordinates {
                lat: 60.1699,
                lon: 24.9384,
            },
            PlaceCandidate::new("Helsinki", "capital"),
        )
    }

    #[tokio::test]
    async fn saved_list_loads_back_unchanged() {
        let repository = PlaceRepository::new(sqlite().await);
        let oulu = Place::new(
            7,
            Coordinates { lat: 65.0, lon: 25.5 },
            PlaceCandidate::new("Oulu", ""),
        );
        let places = vec![helsinki(), oulu];

        repository.save(&places).await;

        assert_eq!(repository.load().await, Some(places));
    }

    #[tokio::test]
    async fn empty_list_round_trips() {
        let repository = PlaceRepository::new(sqlite().await);

        repository.save(&[]).await;

        assert_eq!(repository.load().await, Some(vec![]));
    }

    #[tokio::test]
    async fn absent_and_malformed_look_the_same() {
        let store = sqlite().await;
        let repository = PlaceRepository::new(store.clone());

        let absent = repository.load().await;

        store.set(PLACES_KEY, "{not json").await.unwrap();
        let malformed = repository.load().await;

        assert_eq!(absent, None);
        assert_eq!(malformed, None);
    }

    #[tokio::test]
    async fn wrong_shape_is_malformed() {
        let store = sqlite().await;
        let repository = PlaceRepository::new(store.clone());

        store
            .set(PLACES_KEY, r#"[{"id":1,"lat":"north","lon":2,"title":"x","description":""}]"#)
            .await
            .unwrap();

        assert_eq!(repository.load().await, None);
    }

    #[tokio::test]
    async fn save_overwrites_under_fixed_key() {
        let store = sqlite().await;
        let repository = PlaceRepository::new(store.clone());

        repository.save(&[helsinki()]).await;
        repository.save(&[]).await;

        assert_eq!(store.get(PLACES_KEY).await.unwrap(), Some("[]".into()));
    }

    #[tokio::test]
    async fn store_failures_are_swallowed() {
        let repository = PlaceRepository::new(Arc::new(BrokenStore));

        repository.save(&[helsinki()]).await;

        assert_eq!(repository.load().await, None);
    }
}
