use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::get,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::SharedState;

mod error;
mod genres;
mod halls;
mod movies;
mod observability;
mod shows;
mod system;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

use tokio::sync::RwLock;

use crate::services::{GenreService, HallService, MovieService, ShowService};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn genre_service(&self) -> &Arc<dyn GenreService> {
        &self.shared.genre_service
    }

    #[must_use]
    pub fn movie_service(&self) -> &Arc<dyn MovieService> {
        &self.shared.movie_service
    }

    #[must_use]
    pub fn hall_service(&self) -> &Arc<dyn HallService> {
        &self.shared.hall_service
    }

    #[must_use]
    pub fn show_service(&self) -> &Arc<dyn ShowService> {
        &self.shared.show_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub async fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().read().await.server.cors_allowed_origins.clone();

    let api_router = Router::new()
        .nest("/v1", v1_routes())
        .route("/system/health", get(system::health))
        .route("/system/status", get(system::get_status))
        .route("/metrics", get(observability::get_metrics))
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

fn v1_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/genres", get(genres::list_genres))
        .route("/movies", get(movies::list_movies).post(movies::create_movie))
        .route(
            "/movies/{id}",
            get(movies::get_movie)
                .put(movies::update_movie)
                .delete(movies::delete_movie),
        )
        .route("/movies/{id}/shows", get(movies::list_movie_shows))
        .route("/halls", get(halls::list_halls).post(halls::create_hall))
        .route(
            "/halls/{id}",
            get(halls::get_hall)
                .put(halls::update_hall)
                .delete(halls::delete_hall),
        )
        .route("/halls/{id}/shows", get(halls::list_hall_shows))
        .route("/shows", get(shows::list_shows).post(shows::create_show))
        .route(
            "/shows/{id}",
            get(shows::get_show)
                .put(shows::update_show)
                .delete(shows::delete_show),
        )
}
