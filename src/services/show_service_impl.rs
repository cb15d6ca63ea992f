use async_trait::async_trait;
use chrono::NaiveDateTime;
use sea_orm::DatabaseTransaction;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::constants::messages;
use crate::db::Store;
use crate::db::repositories::show::ShowRepository;
use crate::domain::{HallId, MovieId, ShowId};
use crate::models::{Hall, Show, ShowFilter};
use crate::scheduling::{HallLocks, TimeWindow, find_conflict};
use crate::services::hall_service::HallService;
use crate::services::movie_service::MovieService;
use crate::services::show_service::{ShowError, ShowService};
use crate::services::validation::{FieldErrors, parse_start_time};

pub struct SeaOrmShowService {
    store: Store,
    movies: Arc<dyn MovieService>,
    halls: Arc<dyn HallService>,
    locks: HallLocks,
}

impl SeaOrmShowService {
    #[must_use]
    pub fn new(
        store: Store,
        movies: Arc<dyn MovieService>,
        halls: Arc<dyn HallService>,
        serialize_hall_bookings: bool,
    ) -> Self {
        Self::with_locks(
            store,
            movies,
            halls,
            HallLocks::new(serialize_hall_bookings),
        )
    }

    /// Uses `locks` for hall serialization, shared with whoever else holds a clone.
    #[must_use]
    pub const fn with_locks(
        store: Store,
        movies: Arc<dyn MovieService>,
        halls: Arc<dyn HallService>,
        locks: HallLocks,
    ) -> Self {
        Self {
            store,
            movies,
            halls,
            locks,
        }
    }

    fn parse_start(start_time: &str) -> Result<NaiveDateTime, ShowError> {
        if start_time.trim().is_empty() {
            return Err(FieldErrors::single("startTime", messages::NOT_BLANK).into());
        }

        parse_start_time(start_time)
            .ok_or_else(|| FieldErrors::single("startTime", messages::INVALID_DATETIME).into())
    }

    /// Rejects `window` if it overlaps any show in `hall` other than `exclude`.
    async fn ensure_available(
        txn: &DatabaseTransaction,
        hall: &Hall,
        window: &TimeWindow,
        exclude: Option<ShowId>,
    ) -> Result<(), ShowError> {
        let bookings = ShowRepository::bookings_in_hall(txn, hall.id).await?;

        if let Some(conflict) = find_conflict(&bookings, window, exclude) {
            metrics::counter!("show_bookings_total", "outcome" => "conflict").increment(1);
            warn!(
                hall_id = hall.id,
                conflicting_show = %conflict.show_id,
                start = %window.start(),
                end = %window.end(),
                "Hall booking rejected"
            );
            return Err(ShowError::HallUnavailable {
                hall: hall.name.clone(),
                start: window.start(),
                end: window.end(),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl ShowService for SeaOrmShowService {
    async fn get_show(&self, id: ShowId) -> Result<Show, ShowError> {
        self.store
            .get_show(id.value())
            .await?
            .ok_or(ShowError::NotFound(id))
    }

    async fn list_shows(&self, filter: ShowFilter) -> Result<Vec<Show>, ShowError> {
        Ok(self.store.list_shows(&filter).await?)
    }

    async fn list_shows_for_hall(&self, hall: HallId) -> Result<Vec<Show>, ShowError> {
        self.halls.get_hall(hall).await?;
        Ok(self.store.list_shows_for_hall(hall.value()).await?)
    }

    async fn list_shows_for_movie(&self, movie: MovieId) -> Result<Vec<Show>, ShowError> {
        self.movies.get_movie(movie).await?;
        Ok(self.store.list_shows_for_movie(movie.value()).await?)
    }

    async fn create_show(
        &self,
        movie: MovieId,
        hall: HallId,
        start_time: &str,
    ) -> Result<Show, ShowError> {
        let movie = self.movies.get_movie(movie).await?;
        let hall = self.halls.get_hall(hall).await?;
        let start = Self::parse_start(start_time)?;
        let window = TimeWindow::from_duration(start, movie.duration_in_minutes);

        let _guard = self.locks.acquire(HallId::new(hall.id)).await;
        let txn = self.store.begin().await?;

        Self::ensure_available(&txn, &hall, &window, None).await?;
        let id = ShowRepository::insert(&txn, movie.id, hall.id, start).await?;
        txn.commit().await?;

        metrics::counter!("show_bookings_total", "outcome" => "created").increment(1);
        info!(
            show_id = id,
            movie_id = %movie.id,
            hall_id = hall.id,
            start = %start,
            "Show scheduled"
        );

        Ok(Show {
            id,
            movie,
            hall,
            start_time: start,
        })
    }

    async fn update_show(
        &self,
        id: ShowId,
        movie: MovieId,
        hall: HallId,
        start_time: &str,
    ) -> Result<Show, ShowError> {
        let existing = self.get_show(id).await?;
        let movie = self.movies.get_movie(movie).await?;
        let hall = self.halls.get_hall(hall).await?;
        let start = Self::parse_start(start_time)?;
        let window = TimeWindow::from_duration(start, movie.duration_in_minutes);

        let _guard = self.locks.acquire(HallId::new(hall.id)).await;
        let txn = self.store.begin().await?;

        Self::ensure_available(&txn, &hall, &window, Some(id)).await?;
        if !ShowRepository::reschedule(&txn, id.value(), movie.id, hall.id, start).await? {
            return Err(ShowError::NotFound(id));
        }
        txn.commit().await?;

        if existing.movie.id != movie.id {
            debug!(show_id = %id, from = %existing.movie.id, to = %movie.id, "Show movie changed");
        }
        if existing.hall.id != hall.id {
            debug!(show_id = %id, from = existing.hall.id, to = hall.id, "Show hall changed");
        }

        metrics::counter!("show_bookings_total", "outcome" => "updated").increment(1);
        info!(show_id = %id, hall_id = hall.id, start = %start, "Show rescheduled");

        Ok(Show {
            id: id.value(),
            movie,
            hall,
            start_time: start,
        })
    }

    async fn delete_show(&self, id: ShowId) -> Result<(), ShowError> {
        if !self.store.delete_show(id.value()).await? {
            return Err(ShowError::NotFound(id));
        }
        info!(show_id = %id, "Show deleted");
        Ok(())
    }
}
