use crate::entities::{genre, movie, prelude::*};
use crate::models::{Genre, Movie};
use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};
use uuid::Uuid;

/// Column values for inserting or replacing a movie.
#[derive(Debug, Clone)]
pub struct MovieRecord {
    pub title: String,
    pub description: String,
    pub duration_in_minutes: i32,
    pub release_date: NaiveDate,
    pub genre_id: i32,
}

pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<Movie>> {
        let rows = Movies::find()
            .find_also_related(Genres)
            .order_by_asc(movie::Column::Title)
            .order_by_asc(movie::Column::Id)
            .all(&self.conn)
            .await?;

        rows.into_iter()
            .map(|(m, g)| to_movie(m, g))
            .collect()
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Movie>> {
        let row = Movies::find_by_id(id)
            .find_also_related(Genres)
            .one(&self.conn)
            .await?;

        row.map(|(m, g)| to_movie(m, g)).transpose()
    }

    pub async fn create(&self, id: Uuid, record: MovieRecord) -> Result<Movie> {
        movie::ActiveModel {
            id: Set(id),
            title: Set(record.title),
            description: Set(record.description),
            duration_in_minutes: Set(record.duration_in_minutes),
            release_date: Set(record.release_date),
            genre_id: Set(record.genre_id),
        }
        .insert(&self.conn)
        .await?;

        self.get(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve created movie {id}"))
    }

    /// Returns `None` when no movie has this id.
    pub async fn update(&self, id: Uuid, record: MovieRecord) -> Result<Option<Movie>> {
        let Some(existing) = Movies::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: movie::ActiveModel = existing.into();
        active.title = Set(record.title);
        active.description = Set(record.description);
        active.duration_in_minutes = Set(record.duration_in_minutes);
        active.release_date = Set(record.release_date);
        active.genre_id = Set(record.genre_id);
        active.update(&self.conn).await?;

        self.get(id).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = Movies::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Movies::find().count(&self.conn).await?)
    }
}

pub(super) fn to_movie(model: movie::Model, genre: Option<genre::Model>) -> Result<Movie> {
    let genre = genre.ok_or_else(|| {
        anyhow::anyhow!(
            "Movie {} references missing genre {}",
            model.id,
            model.genre_id
        )
    })?;

    Ok(Movie {
        id: model.id,
        title: model.title,
        description: model.description,
        duration_in_minutes: model.duration_in_minutes,
        release_date: model.release_date,
        genre: Genre::from(genre),
    })
}
