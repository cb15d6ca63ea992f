use crate::entities::{genre, prelude::*};
use crate::models::Genre;
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

pub struct GenreRepository {
    conn: DatabaseConnection,
}

impl GenreRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<Genre>> {
        let rows = Genres::find()
            .order_by_asc(genre::Column::Name)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Genre::from).collect())
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<Genre>> {
        let row = Genres::find()
            .filter(genre::Column::Name.eq(name))
            .one(&self.conn)
            .await?;

        Ok(row.map(Genre::from))
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Genres::find().count(&self.conn).await?)
    }
}

impl From<genre::Model> for Genre {
    fn from(model: genre::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}
