//! Hall management.

use serde::Deserialize;
use thiserror::Error;

use super::validation::FieldErrors;
use crate::domain::HallId;
use crate::models::Hall;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HallInput {
    pub name: String,
    pub capacity: i32,
}

impl HallInput {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require_text("name", &self.name);
        errors.require_positive("capacity", self.capacity);
        errors.into_result()
    }
}

#[derive(Debug, Error)]
pub enum HallError {
    #[error("Hall with id {0} does not exist")]
    NotFound(HallId),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for HallError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for HallError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<FieldErrors> for HallError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

#[async_trait::async_trait]
pub trait HallService: Send + Sync {
    /// All halls ordered by id.
    async fn list_halls(&self) -> Result<Vec<Hall>, HallError>;

    async fn get_hall(&self, id: HallId) -> Result<Hall, HallError>;

    async fn create_hall(&self, input: HallInput) -> Result<Hall, HallError>;

    async fn update_hall(&self, id: HallId, input: HallInput) -> Result<Hall, HallError>;

    /// Fails with [`HallError::Conflict`] while any show is scheduled in the hall.
    async fn delete_hall(&self, id: HallId) -> Result<(), HallError>;
}
