mod dialog_api;
mod place_api;

use tokio::sync::Mutex;

use crate::{
    api::{DynGeocoder, API},
    entities::{Dialog, Place},
    persistence::PlaceRepository,
};

#[derive(Debug, Default)]
struct State {
    places: Vec<Place>,
    dialog: Dialog,
}

/// Owns the place list and the creation dialog. All mutations go through here.
pub struct Engine {
    geocoder: DynGeocoder,
    repository: PlaceRepository,
    state: Mutex<State>,
}

impl Engine {
    pub fn new(geocoder: DynGeocoder, repository: PlaceRepository) -> Self {
        Self {
            geocoder,
            repository,
            state: Mutex::new(State::default()),
        }
    }
}

impl API for Engine {}
