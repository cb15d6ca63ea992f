use super::ApiError;
use crate::domain::{HallId, MovieId, ShowId};

pub fn validate_hall_id(id: i32) -> Result<HallId, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid hall ID: {}. ID must be a positive integer",
            id
        )));
    }
    Ok(HallId::new(id))
}

pub fn validate_show_id(id: i32) -> Result<ShowId, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid show ID: {}. ID must be a positive integer",
            id
        )));
    }
    Ok(ShowId::new(id))
}

pub fn validate_movie_id(raw: &str) -> Result<MovieId, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::validation(format!("Invalid movie ID: {}. ID must be a UUID", raw)))
}
