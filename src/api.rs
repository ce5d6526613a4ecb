use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{Dialog, MapView, Place, PlaceCandidate};
use crate::error::Error;
use crate::external::nominatim::GeocodedCity;

#[async_trait]
pub trait Geocoder {
    async fn find_city(&self, city: &str) -> Result<GeocodedCity, Error>;
}

#[async_trait]
pub trait PlaceAPI {
    async fn load_places(&self) -> Vec<Place>;
    async fn list_places(&self) -> Vec<Place>;
    async fn add_place(&self, candidate: PlaceCandidate) -> Result<Place, Error>;
    async fn persist_places(&self);
    async fn map_view(&self) -> MapView;
}

#[async_trait]
pub trait DialogAPI {
    async fn dialog(&self) -> Dialog;
    async fn open_dialog(&self) -> Dialog;
    async fn cancel_dialog(&self) -> Result<Dialog, Error>;
    async fn submit_dialog(&self, candidate: PlaceCandidate) -> Result<Place, Error>;
}

pub trait API: PlaceAPI + DialogAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
pub type DynGeocoder = Arc<dyn Geocoder + Send + Sync>;
