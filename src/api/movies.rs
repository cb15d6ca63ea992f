use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::validation::validate_movie_id;
use super::{ApiError, ApiResponse, AppState, MovieDto, ShowDto};
use crate::services::{MovieError, MovieInput};

impl From<MovieError> for ApiError {
    fn from(err: MovieError) -> Self {
        match err {
            MovieError::NotFound(_) | MovieError::GenreNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            MovieError::Validation(fields) => Self::InvalidFields(fields),
            MovieError::Conflict(msg) => Self::Conflict(msg),
            MovieError::Database(msg) => Self::DatabaseError(msg),
            MovieError::Internal(msg) => Self::internal(msg),
        }
    }
}

pub async fn list_movies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<MovieDto>>>, ApiError> {
    let movies = state.movie_service().list_movies().await?;
    Ok(Json(ApiResponse::success(
        movies.into_iter().map(MovieDto::from).collect(),
    )))
}

pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MovieDto>>, ApiError> {
    let id = validate_movie_id(&id)?;
    let movie = state.movie_service().get_movie(id).await?;
    Ok(Json(ApiResponse::success(MovieDto::from(movie))))
}

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    Json(input): Json<MovieInput>,
) -> Result<(StatusCode, Json<ApiResponse<MovieDto>>), ApiError> {
    let movie = state.movie_service().create_movie(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(MovieDto::from(movie))),
    ))
}

pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(input): Json<MovieInput>,
) -> Result<Json<ApiResponse<MovieDto>>, ApiError> {
    let id = validate_movie_id(&id)?;
    let movie = state.movie_service().update_movie(id, input).await?;
    Ok(Json(ApiResponse::success(MovieDto::from(movie))))
}

pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id = validate_movie_id(&id)?;
    state.movie_service().delete_movie(id).await?;
    Ok(Json(ApiResponse::success(())))
}

pub async fn list_movie_shows(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<ShowDto>>>, ApiError> {
    let id = validate_movie_id(&id)?;
    let shows = state.show_service().list_shows_for_movie(id).await?;
    Ok(Json(ApiResponse::success(
        shows.into_iter().map(ShowDto::from).collect(),
    )))
}
