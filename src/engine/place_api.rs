use super::Engine;

use async_trait::async_trait;

use crate::{
    api::PlaceAPI,
    entities::{MapView, Place, PlaceCandidate},
    error::Error,
};

#[async_trait]
impl PlaceAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn load_places(&self) -> Vec<Place> {
        let mut state = self.state.lock().await;

        if let Some(places) = self.repository.load().await {
            tracing::info!("loaded {} places", places.len());
            state.places = places;
        }

        state.places.clone()
    }

    async fn list_places(&self) -> Vec<Place> {
        self.state.lock().await.places.clone()
    }

    #[tracing::instrument(skip(self))]
    async fn add_place(&self, candidate: PlaceCandidate) -> Result<Place, Error> {
        let city = self
            .geocoder
            .find_city(&candidate.title)
            .await
            .map_err(|err| {
                tracing::warn!("could not resolve {:?}: {}", candidate.title, err);
                err
            })?;

        let place = Place::new(city.place_id, city.coordinates, candidate);

        // append and save under one lock so the stored list matches the last append
        let mut state = self.state.lock().await;
        state.places.push(place.clone());
        self.repository.save(&state.places).await;

        tracing::info!("added place {} ({} total)", place.id, state.places.len());

        Ok(place)
    }

    #[tracing::instrument(skip(self))]
    async fn persist_places(&self) {
        let state = self.state.lock().await;
        self.repository.save(&state.places).await;
    }

    async fn map_view(&self) -> MapView {
        MapView::new(&self.state.lock().await.places)
    }
}
