use async_trait::async_trait;
use tracing::info;

use crate::db::Store;
use crate::domain::HallId;
use crate::models::Hall;
use crate::services::hall_service::{HallError, HallInput, HallService};

pub struct SeaOrmHallService {
    store: Store,
}

impl SeaOrmHallService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl HallService for SeaOrmHallService {
    async fn list_halls(&self) -> Result<Vec<Hall>, HallError> {
        Ok(self.store.list_halls().await?)
    }

    async fn get_hall(&self, id: HallId) -> Result<Hall, HallError> {
        self.store
            .get_hall(id.value())
            .await?
            .ok_or(HallError::NotFound(id))
    }

    async fn create_hall(&self, input: HallInput) -> Result<Hall, HallError> {
        input.validate()?;

        let hall = self
            .store
            .create_hall(input.name.trim(), input.capacity)
            .await?;
        info!(hall_id = hall.id, name = %hall.name, "Hall created");

        Ok(hall)
    }

    async fn update_hall(&self, id: HallId, input: HallInput) -> Result<Hall, HallError> {
        self.get_hall(id).await?;
        input.validate()?;

        let hall = self
            .store
            .update_hall(id.value(), input.name.trim(), input.capacity)
            .await?
            .ok_or(HallError::NotFound(id))?;
        info!(hall_id = hall.id, "Hall updated");

        Ok(hall)
    }

    async fn delete_hall(&self, id: HallId) -> Result<(), HallError> {
        self.get_hall(id).await?;

        let shows = self.store.count_shows_for_hall(id.value()).await?;
        if shows > 0 {
            return Err(HallError::Conflict(format!(
                "Hall with id {id} still has {shows} scheduled show(s)"
            )));
        }

        if !self.store.delete_hall(id.value()).await? {
            return Err(HallError::NotFound(id));
        }
        info!(hall_id = %id, "Hall deleted");

        Ok(())
    }
}
