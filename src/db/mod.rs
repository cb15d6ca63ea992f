use crate::models::{Genre, Hall, Movie, Show, ShowFilter};
use anyhow::Result;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DatabaseTransaction,
    Statement, TransactionTrait,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

pub mod migrator;
pub mod repositories;

pub use repositories::movie::MovieRecord;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // Every connection to an in-memory database opens a separate database.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        if !in_memory {
            opt.idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    pub async fn begin(&self) -> Result<DatabaseTransaction> {
        Ok(self.conn.begin().await?)
    }

    fn genre_repo(&self) -> repositories::genre::GenreRepository {
        repositories::genre::GenreRepository::new(self.conn.clone())
    }

    fn movie_repo(&self) -> repositories::movie::MovieRepository {
        repositories::movie::MovieRepository::new(self.conn.clone())
    }

    fn hall_repo(&self) -> repositories::hall::HallRepository {
        repositories::hall::HallRepository::new(self.conn.clone())
    }

    fn show_repo(&self) -> repositories::show::ShowRepository {
        repositories::show::ShowRepository::new(self.conn.clone())
    }

    pub async fn list_genres(&self) -> Result<Vec<Genre>> {
        self.genre_repo().list().await
    }

    pub async fn find_genre_by_name(&self, name: &str) -> Result<Option<Genre>> {
        self.genre_repo().get_by_name(name).await
    }

    pub async fn count_genres(&self) -> Result<u64> {
        self.genre_repo().count().await
    }

    pub async fn list_movies(&self) -> Result<Vec<Movie>> {
        self.movie_repo().list().await
    }

    pub async fn get_movie(&self, id: Uuid) -> Result<Option<Movie>> {
        self.movie_repo().get(id).await
    }

    pub async fn create_movie(&self, id: Uuid, record: MovieRecord) -> Result<Movie> {
        self.movie_repo().create(id, record).await
    }

    pub async fn update_movie(&self, id: Uuid, record: MovieRecord) -> Result<Option<Movie>> {
        self.movie_repo().update(id, record).await
    }

    pub async fn delete_movie(&self, id: Uuid) -> Result<bool> {
        self.movie_repo().delete(id).await
    }

    pub async fn count_movies(&self) -> Result<u64> {
        self.movie_repo().count().await
    }

    pub async fn list_halls(&self) -> Result<Vec<Hall>> {
        self.hall_repo().list().await
    }

    pub async fn get_hall(&self, id: i32) -> Result<Option<Hall>> {
        self.hall_repo().get(id).await
    }

    pub async fn create_hall(&self, name: &str, capacity: i32) -> Result<Hall> {
        self.hall_repo().create(name, capacity).await
    }

    pub async fn update_hall(&self, id: i32, name: &str, capacity: i32) -> Result<Option<Hall>> {
        self.hall_repo().update(id, name, capacity).await
    }

    pub async fn delete_hall(&self, id: i32) -> Result<bool> {
        self.hall_repo().delete(id).await
    }

    pub async fn count_halls(&self) -> Result<u64> {
        self.hall_repo().count().await
    }

    pub async fn get_show(&self, id: i32) -> Result<Option<Show>> {
        self.show_repo().get(id).await
    }

    pub async fn list_shows(&self, filter: &ShowFilter) -> Result<Vec<Show>> {
        self.show_repo().list(filter).await
    }

    pub async fn list_shows_for_hall(&self, hall_id: i32) -> Result<Vec<Show>> {
        self.show_repo().list_for_hall(hall_id).await
    }

    pub async fn list_shows_for_movie(&self, movie_id: Uuid) -> Result<Vec<Show>> {
        self.show_repo().list_for_movie(movie_id).await
    }

    pub async fn delete_show(&self, id: i32) -> Result<bool> {
        self.show_repo().delete(id).await
    }

    pub async fn count_shows(&self) -> Result<u64> {
        self.show_repo().count().await
    }

    pub async fn count_shows_for_hall(&self, hall_id: i32) -> Result<u64> {
        self.show_repo().count_for_hall(hall_id).await
    }

    pub async fn count_shows_for_movie(&self, movie_id: Uuid) -> Result<u64> {
        self.show_repo().count_for_movie(movie_id).await
    }
}
