mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};

use crate::api::{DynAPI, API};
use crate::error::{unexpected_error, Error};
use crate::server::handlers::{dialog, places};

pub fn router(api: DynAPI) -> Router {
    Router::new()
        .route("/places", get(places::list).post(places::create))
        .route("/map", get(places::map))
        .route("/dialog", get(dialog::find))
        .route("/dialog/open", post(dialog::open))
        .route("/dialog/cancel", post(dialog::cancel))
        .route("/dialog/submit", post(dialog::submit))
        .layer(Extension(api))
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) -> Result<(), Error> {
    let app = router(Arc::new(api) as DynAPI);

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|err| {
            tracing::error!("server stopped: {}", err);
            unexpected_error()
        })
}
