//! Movie catalogue management.

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use super::validation::FieldErrors;
use crate::domain::MovieId;
use crate::models::Movie;

/// Movie fields as submitted by a client. Missing fields default to empty
/// values and are reported by [`MovieInput::validate`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MovieInput {
    pub title: String,
    pub description: String,
    pub duration_in_minutes: i32,
    pub release_date: String,
    /// Genre name, matched exactly.
    pub genre: String,
}

impl MovieInput {
    /// Checks every field and returns the parsed release date.
    pub fn validate(&self) -> Result<NaiveDate, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require_text("title", &self.title);
        errors.require_text("description", &self.description);
        errors.require_positive("duration_in_minutes", self.duration_in_minutes);
        errors.require_text("genre", &self.genre);
        let release_date = errors.require_date("release_date", &self.release_date);

        match release_date {
            Some(date) if errors.is_empty() => Ok(date),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Error)]
pub enum MovieError {
    #[error("Movie with id {0} does not exist")]
    NotFound(MovieId),

    #[error("Genre \"{0}\" does not exist")]
    GenreNotFound(String),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for MovieError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for MovieError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<FieldErrors> for MovieError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

#[async_trait::async_trait]
pub trait MovieService: Send + Sync {
    /// All movies ordered by title.
    async fn list_movies(&self) -> Result<Vec<Movie>, MovieError>;

    async fn get_movie(&self, id: MovieId) -> Result<Movie, MovieError>;

    async fn create_movie(&self, input: MovieInput) -> Result<Movie, MovieError>;

    /// Replaces every field of an existing movie.
    async fn update_movie(&self, id: MovieId, input: MovieInput) -> Result<Movie, MovieError>;

    /// Fails with [`MovieError::Conflict`] while any show still uses the movie.
    async fn delete_movie(&self, id: MovieId) -> Result<(), MovieError>;
}
