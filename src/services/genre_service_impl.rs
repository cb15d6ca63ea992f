use async_trait::async_trait;

use crate::db::Store;
use crate::models::Genre;
use crate::services::genre_service::{GenreError, GenreService};

pub struct SeaOrmGenreService {
    store: Store,
}

impl SeaOrmGenreService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl GenreService for SeaOrmGenreService {
    async fn list_genres(&self) -> Result<Vec<Genre>, GenreError> {
        Ok(self.store.list_genres().await?)
    }

    async fn get_genre_by_name(&self, name: &str) -> Result<Genre, GenreError> {
        self.store
            .find_genre_by_name(name)
            .await?
            .ok_or_else(|| GenreError::NotFound(name.to_string()))
    }
}
