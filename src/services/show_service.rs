//! Show scheduling.
//!
//! Creating or moving a show checks that its hall is free for the movie's
//! whole running time. The check and the write run inside one transaction,
//! and with hall serialization enabled no other booking of the same hall can
//! interleave within this process.

use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;

use super::hall_service::HallError;
use super::movie_service::MovieError;
use super::validation::FieldErrors;
use crate::constants::formats;
use crate::domain::{HallId, MovieId, ShowId};
use crate::models::{Show, ShowFilter};

/// Raw listing criteria as they arrive in a query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShowQuery {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl ShowQuery {
    /// Validates the criteria. Supplied values may not be blank and dates must be `YYYY-MM-DD`.
    pub fn into_filter(self) -> Result<ShowFilter, FieldErrors> {
        let mut errors = FieldErrors::new();

        if let Some(title) = &self.title {
            errors.require_text("title", title);
        }
        if let Some(genre) = &self.genre {
            errors.require_text("genre", genre);
        }
        let from = self
            .from
            .as_deref()
            .and_then(|v| errors.require_date("from", v));
        let to = self.to.as_deref().and_then(|v| errors.require_date("to", v));

        errors.into_result()?;

        Ok(ShowFilter {
            title: self.title,
            genre: self.genre,
            from,
            to,
        })
    }
}

#[derive(Debug, Error)]
pub enum ShowError {
    #[error("Show with id {0} does not exist")]
    NotFound(ShowId),

    #[error("Movie with id {0} does not exist")]
    MovieNotFound(MovieId),

    #[error("Hall with id {0} does not exist")]
    HallNotFound(HallId),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error(
        "Hall \"{hall}\" is not available from {} to {}",
        .start.format(formats::DATETIME),
        .end.format(formats::DATETIME)
    )]
    HallUnavailable {
        hall: String,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for ShowError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ShowError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<FieldErrors> for ShowError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<MovieError> for ShowError {
    fn from(err: MovieError) -> Self {
        match err {
            MovieError::NotFound(id) => Self::MovieNotFound(id),
            MovieError::Validation(errors) => Self::Validation(errors),
            MovieError::Database(msg) => Self::Database(msg),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<HallError> for ShowError {
    fn from(err: HallError) -> Self {
        match err {
            HallError::NotFound(id) => Self::HallNotFound(id),
            HallError::Validation(errors) => Self::Validation(errors),
            HallError::Database(msg) => Self::Database(msg),
            other => Self::Internal(other.to_string()),
        }
    }
}

#[async_trait::async_trait]
pub trait ShowService: Send + Sync {
    async fn get_show(&self, id: ShowId) -> Result<Show, ShowError>;

    /// Shows matching `filter`, ordered by start time ascending.
    async fn list_shows(&self, filter: ShowFilter) -> Result<Vec<Show>, ShowError>;

    async fn list_shows_for_hall(&self, hall: HallId) -> Result<Vec<Show>, ShowError>;

    async fn list_shows_for_movie(&self, movie: MovieId) -> Result<Vec<Show>, ShowError>;

    /// Books `movie` into `hall` at `start_time`.
    ///
    /// Lookups run in order movie, hall, start time, so the first failing
    /// step decides the error. Fails with [`ShowError::HallUnavailable`]
    /// when the running time overlaps another show in the hall.
    async fn create_show(
        &self,
        movie: MovieId,
        hall: HallId,
        start_time: &str,
    ) -> Result<Show, ShowError>;

    /// Moves an existing show. Its own previous slot never counts as a conflict.
    async fn update_show(
        &self,
        id: ShowId,
        movie: MovieId,
        hall: HallId,
        start_time: &str,
    ) -> Result<Show, ShowError>;

    async fn delete_show(&self, id: ShowId) -> Result<(), ShowError>;
}
