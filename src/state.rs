use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    GenreService, HallService, MovieService, SeaOrmGenreService, SeaOrmHallService,
    SeaOrmMovieService, SeaOrmShowService, ShowService,
};

/// Services shared by the HTTP API and the CLI.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub genre_service: Arc<dyn GenreService>,

    pub movie_service: Arc<dyn MovieService>,

    pub hall_service: Arc<dyn HallService>,

    pub show_service: Arc<dyn ShowService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let genre_service: Arc<dyn GenreService> =
            Arc::new(SeaOrmGenreService::new(store.clone()));
        let movie_service: Arc<dyn MovieService> = Arc::new(SeaOrmMovieService::new(
            store.clone(),
            genre_service.clone(),
        ));
        let hall_service: Arc<dyn HallService> = Arc::new(SeaOrmHallService::new(store.clone()));
        let show_service: Arc<dyn ShowService> = Arc::new(SeaOrmShowService::new(
            store.clone(),
            movie_service.clone(),
            hall_service.clone(),
            config.scheduling.serialize_hall_bookings,
        ));

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            genre_service,
            movie_service,
            hall_service,
            show_service,
        })
    }
}
