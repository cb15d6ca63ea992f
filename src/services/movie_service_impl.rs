use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::db::{MovieRecord, Store};
use crate::domain::MovieId;
use crate::models::Movie;
use crate::services::genre_service::{GenreError, GenreService};
use crate::services::movie_service::{MovieError, MovieInput, MovieService};

pub struct SeaOrmMovieService {
    store: Store,
    genres: Arc<dyn GenreService>,
}

impl SeaOrmMovieService {
    #[must_use]
    pub fn new(store: Store, genres: Arc<dyn GenreService>) -> Self {
        Self { store, genres }
    }

    async fn to_record(&self, input: MovieInput) -> Result<MovieRecord, MovieError> {
        let release_date = input.validate()?;

        let genre = self
            .genres
            .get_genre_by_name(&input.genre)
            .await
            .map_err(|e| match e {
                GenreError::NotFound(name) => MovieError::GenreNotFound(name),
                GenreError::Database(msg) => MovieError::Database(msg),
                GenreError::Internal(msg) => MovieError::Internal(msg),
            })?;

        Ok(MovieRecord {
            title: input.title,
            description: input.description,
            duration_in_minutes: input.duration_in_minutes,
            release_date,
            genre_id: genre.id,
        })
    }
}

#[async_trait]
impl MovieService for SeaOrmMovieService {
    async fn list_movies(&self) -> Result<Vec<Movie>, MovieError> {
        Ok(self.store.list_movies().await?)
    }

    async fn get_movie(&self, id: MovieId) -> Result<Movie, MovieError> {
        self.store
            .get_movie(id.value())
            .await?
            .ok_or(MovieError::NotFound(id))
    }

    async fn create_movie(&self, input: MovieInput) -> Result<Movie, MovieError> {
        let record = self.to_record(input).await?;
        let id = MovieId::generate();

        let movie = self.store.create_movie(id.value(), record).await?;
        info!(movie_id = %id, title = %movie.title, "Movie created");

        Ok(movie)
    }

    async fn update_movie(&self, id: MovieId, input: MovieInput) -> Result<Movie, MovieError> {
        self.get_movie(id).await?;
        let record = self.to_record(input).await?;

        let movie = self
            .store
            .update_movie(id.value(), record)
            .await?
            .ok_or(MovieError::NotFound(id))?;
        info!(movie_id = %id, "Movie updated");

        Ok(movie)
    }

    async fn delete_movie(&self, id: MovieId) -> Result<(), MovieError> {
        self.get_movie(id).await?;

        let shows = self.store.count_shows_for_movie(id.value()).await?;
        if shows > 0 {
            return Err(MovieError::Conflict(format!(
                "Movie with id {id} is still scheduled in {shows} show(s)"
            )));
        }

        if !self.store.delete_movie(id.value()).await? {
            return Err(MovieError::NotFound(id));
        }
        info!(movie_id = %id, "Movie deleted");

        Ok(())
    }
}
