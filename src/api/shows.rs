//! Show scheduling endpoints.
//!
//! Create and update bodies name the movie by UUID and the hall by id, e.g.
//! `{"movie": "…", "hall": 1, "startTime": "2020-09-28 12:00:00"}`.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::validate_show_id;
use super::{ApiError, ApiResponse, AppState, ShowDto};
use crate::constants::messages;
use crate::domain::{HallId, MovieId};
use crate::services::{FieldErrors, ShowError, ShowQuery};

impl From<ShowError> for ApiError {
    fn from(err: ShowError) -> Self {
        match err {
            ShowError::NotFound(_) | ShowError::MovieNotFound(_) | ShowError::HallNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            ShowError::Validation(fields) => Self::InvalidFields(fields),
            ShowError::HallUnavailable { .. } => Self::Conflict(err.to_string()),
            ShowError::Database(msg) => Self::DatabaseError(msg),
            ShowError::Internal(msg) => Self::internal(msg),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShowRequest {
    pub movie: String,
    pub hall: i32,
    pub start_time: String,
}

impl ShowRequest {
    /// Checks the shape of the movie and hall references.
    fn references(&self) -> Result<(MovieId, HallId), FieldErrors> {
        let mut errors = FieldErrors::new();

        errors.require_text("movie", &self.movie);
        let movie = self.movie.trim().parse::<MovieId>().ok();
        if movie.is_none() {
            errors.add("movie", messages::INVALID_UUID);
        }
        errors.require_positive("hall", self.hall);

        match movie {
            Some(movie) if errors.is_empty() => Ok((movie, HallId::new(self.hall))),
            _ => Err(errors),
        }
    }
}

pub async fn list_shows(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ShowQuery>,
) -> Result<Json<ApiResponse<Vec<ShowDto>>>, ApiError> {
    let filter = query.into_filter()?;
    let shows = state.show_service().list_shows(filter).await?;
    Ok(Json(ApiResponse::success(
        shows.into_iter().map(ShowDto::from).collect(),
    )))
}

pub async fn get_show(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ShowDto>>, ApiError> {
    let id = validate_show_id(id)?;
    let show = state.show_service().get_show(id).await?;
    Ok(Json(ApiResponse::success(ShowDto::from(show))))
}

pub async fn create_show(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ShowRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ShowDto>>), ApiError> {
    let (movie, hall) = request.references()?;
    let show = state
        .show_service()
        .create_show(movie, hall, &request.start_time)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(ShowDto::from(show))),
    ))
}

pub async fn update_show(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(request): Json<ShowRequest>,
) -> Result<Json<ApiResponse<ShowDto>>, ApiError> {
    let id = validate_show_id(id)?;
    let (movie, hall) = request.references()?;
    let show = state
        .show_service()
        .update_show(id, movie, hall, &request.start_time)
        .await?;

    Ok(Json(ApiResponse::success(ShowDto::from(show))))
}

pub async fn delete_show(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id = validate_show_id(id)?;
    state.show_service().delete_show(id).await?;
    Ok(Json(ApiResponse::success(())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case_start_time() {
        let request: ShowRequest = serde_json::from_str(
            r#"{"movie":"67e55044-10b1-426f-9247-bb680e5fe0c8","hall":2,"startTime":"2020-09-28 12:00:00"}"#,
        )
        .unwrap();

        let (movie, hall) = request.references().unwrap();
        assert_eq!(movie.to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
        assert_eq!(hall, HallId::new(2));
        assert_eq!(request.start_time, "2020-09-28 12:00:00");
    }

    #[test]
    fn test_request_reports_bad_references() {
        let request: ShowRequest = serde_json::from_str(r#"{"movie":"nope"}"#).unwrap();
        let errors = request.references().unwrap_err();

        assert!(errors.get("movie").is_some());
        assert_eq!(errors.get("hall"), Some(messages::POSITIVE));
    }
}
