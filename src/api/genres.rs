use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, GenreDto};
use crate::services::GenreError;

impl From<GenreError> for ApiError {
    fn from(err: GenreError) -> Self {
        match err {
            GenreError::NotFound(_) => Self::NotFound(err.to_string()),
            GenreError::Database(msg) => Self::DatabaseError(msg),
            GenreError::Internal(msg) => Self::internal(msg),
        }
    }
}

pub async fn list_genres(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<GenreDto>>>, ApiError> {
    let genres = state.genre_service().list_genres().await?;
    Ok(Json(ApiResponse::success(
        genres.into_iter().map(GenreDto::from).collect(),
    )))
}
