use std::sync::Arc;

use myplaces::api::PlaceAPI;
use myplaces::config::Config;
use myplaces::db::SqliteStore;
use myplaces::engine::Engine;
use myplaces::error::Error;
use myplaces::external::nominatim::Nominatim;
use myplaces::persistence::PlaceRepository;
use myplaces::server::serve;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;

    let store = SqliteStore::new(&config.database_url, 5).await?;
    let geocoder = Nominatim::new(
        config.geocoder_base.as_str(),
        &config.user_agent,
        config.geocoder_timeout,
    )?;

    let engine = Engine::new(
        Arc::new(geocoder),
        PlaceRepository::new(Arc::new(store)),
    );

    engine.load_places().await;

    serve(engine, config.listen_addr).await
}
