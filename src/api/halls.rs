use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::validation::validate_hall_id;
use super::{ApiError, ApiResponse, AppState, HallDto, ShowDto};
use crate::services::{HallError, HallInput};

impl From<HallError> for ApiError {
    fn from(err: HallError) -> Self {
        match err {
            HallError::NotFound(_) => Self::NotFound(err.to_string()),
            HallError::Validation(fields) => Self::InvalidFields(fields),
            HallError::Conflict(msg) => Self::Conflict(msg),
            HallError::Database(msg) => Self::DatabaseError(msg),
            HallError::Internal(msg) => Self::internal(msg),
        }
    }
}

pub async fn list_halls(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<HallDto>>>, ApiError> {
    let halls = state.hall_service().list_halls().await?;
    Ok(Json(ApiResponse::success(
        halls.into_iter().map(HallDto::from).collect(),
    )))
}

pub async fn get_hall(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<HallDto>>, ApiError> {
    let id = validate_hall_id(id)?;
    let hall = state.hall_service().get_hall(id).await?;
    Ok(Json(ApiResponse::success(HallDto::from(hall))))
}

pub async fn create_hall(
    State(state): State<Arc<AppState>>,
    Json(input): Json<HallInput>,
) -> Result<(StatusCode, Json<ApiResponse<HallDto>>), ApiError> {
    let hall = state.hall_service().create_hall(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(HallDto::from(hall))),
    ))
}

pub async fn update_hall(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(input): Json<HallInput>,
) -> Result<Json<ApiResponse<HallDto>>, ApiError> {
    let id = validate_hall_id(id)?;
    let hall = state.hall_service().update_hall(id, input).await?;
    Ok(Json(ApiResponse::success(HallDto::from(hall))))
}

pub async fn delete_hall(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id = validate_hall_id(id)?;
    state.hall_service().delete_hall(id).await?;
    Ok(Json(ApiResponse::success(())))
}

pub async fn list_hall_shows(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<ShowDto>>>, ApiError> {
    let id = validate_hall_id(id)?;
    let shows = state.show_service().list_shows_for_hall(id).await?;
    Ok(Json(ApiResponse::success(
        shows.into_iter().map(ShowDto::from).collect(),
    )))
}
