use axum::extract::{Extension, Json};

use crate::api::DynAPI;
use crate::entities::{Dialog, Place, PlaceCandidate};
use crate::error::Error;

pub async fn find(Extension(api): Extension<DynAPI>) -> Json<Dialog> {
    api.dialog().await.into()
}

pub async fn open(Extension(api): Extension<DynAPI>) -> Json<Dialog> {
    api.open_dialog().await.into()
}

pub async fn cancel(Extension(api): Extension<DynAPI>) -> Result<Json<Dialog>, Error> {
    let dialog = api.cancel_dialog().await?;

    Ok(dialog.into())
}

pub async fn submit(
    Extension(api): Extension<DynAPI>,
    Json(candidate): Json<PlaceCandidate>,
) -> Result<Json<Place>, Error> {
    let place = api.submit_dialog(candidate).await?;

    Ok(place.into())
}
