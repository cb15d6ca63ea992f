//! Read-only access to the fixed set of movie genres.

use thiserror::Error;

use crate::models::Genre;

#[derive(Debug, Error)]
pub enum GenreError {
    #[error("Genre \"{0}\" does not exist")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for GenreError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for GenreError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait GenreService: Send + Sync {
    /// All genres ordered by name.
    async fn list_genres(&self) -> Result<Vec<Genre>, GenreError>;

    /// Exact, case-sensitive lookup by name.
    async fn get_genre_by_name(&self, name: &str) -> Result<Genre, GenreError>;
}
