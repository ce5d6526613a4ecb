use axum::extract::{Extension, Json};

use crate::api::DynAPI;
use crate::entities::{MapView, Place, PlaceCandidate};
use crate::error::Error;

pub async fn list(Extension(api): Extension<DynAPI>) -> Json<Vec<Place>> {
    api.list_places().await.into()
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(candidate): Json<PlaceCandidate>,
) -> Result<Json<Place>, Error> {
    let place = api.add_place(candidate).await?;

    Ok(place.into())
}

pub async fn map(Extension(api): Extension<DynAPI>) -> Json<MapView> {
    api.map_view().await.into()
}
