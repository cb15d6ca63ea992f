use crate::entities::{hall, prelude::*};
use crate::models::Hall;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};

pub struct HallRepository {
    conn: DatabaseConnection,
}

impl HallRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<Hall>> {
        let rows = Halls::find()
            .order_by_asc(hall::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Hall::from).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<Hall>> {
        let row = Halls::find_by_id(id).one(&self.conn).await?;
        Ok(row.map(Hall::from))
    }

    pub async fn create(&self, name: &str, capacity: i32) -> Result<Hall> {
        let model = hall::ActiveModel {
            name: Set(name.to_string()),
            capacity: Set(capacity),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;

        Ok(Hall::from(model))
    }

    /// Returns `None` when no hall has this id.
    pub async fn update(&self, id: i32, name: &str, capacity: i32) -> Result<Option<Hall>> {
        let Some(existing) = Halls::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: hall::ActiveModel = existing.into();
        active.name = Set(name.to_string());
        active.capacity = Set(capacity);
        let model = active.update(&self.conn).await?;

        Ok(Some(Hall::from(model)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Halls::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Halls::find().count(&self.conn).await?)
    }
}

impl From<hall::Model> for Hall {
    fn from(model: hall::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            capacity: model.capacity,
        }
    }
}
