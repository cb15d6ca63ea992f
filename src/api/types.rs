use serde::Serialize;

use crate::constants::formats;
use crate::models::{Genre, Hall, Movie, Show};
use crate::services::FieldErrors;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            fields: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            fields: None,
        }
    }

    pub fn error_with_fields(message: impl Into<String>, fields: FieldErrors) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            fields: Some(fields),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenreDto {
    pub id: i32,
    pub name: String,
}

impl From<Genre> for GenreDto {
    fn from(genre: Genre) -> Self {
        Self {
            id: genre.id,
            name: genre.name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MovieDto {
    pub id: String,
    pub title: String,
    pub description: String,
    pub duration_in_minutes: i32,
    pub release_date: String,
    pub genre: String,
}

impl From<Movie> for MovieDto {
    fn from(movie: Movie) -> Self {
        Self {
            id: movie.id.to_string(),
            title: movie.title,
            description: movie.description,
            duration_in_minutes: movie.duration_in_minutes,
            release_date: movie.release_date.format(formats::DATE).to_string(),
            genre: movie.genre.name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HallDto {
    pub id: i32,
    pub name: String,
    pub capacity: i32,
}

impl From<Hall> for HallDto {
    fn from(hall: Hall) -> Self {
        Self {
            id: hall.id,
            name: hall.name,
            capacity: hall.capacity,
        }
    }
}

/// Movie as embedded in a show listing.
#[derive(Debug, Serialize)]
pub struct ShowMovieDto {
    pub id: String,
    pub title: String,
    pub duration_in_minutes: i32,
    pub genre: String,
}

#[derive(Debug, Serialize)]
pub struct ShowDto {
    pub id: i32,
    pub movie: ShowMovieDto,
    pub hall: HallDto,
    pub start_time: String,
    pub end_time: String,
}

impl From<Show> for ShowDto {
    fn from(show: Show) -> Self {
        let end_time = show.end_time().format(formats::DATETIME).to_string();
        Self {
            id: show.id,
            start_time: show.start_time.format(formats::DATETIME).to_string(),
            end_time,
            movie: ShowMovieDto {
                id: show.movie.id.to_string(),
                title: show.movie.title,
                duration_in_minutes: show.movie.duration_in_minutes,
                genre: show.movie.genre.name,
            },
            hall: HallDto::from(show.hall),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: String,
    pub uptime: u64,
    pub genres: u64,
    pub movies: u64,
    pub halls: u64,
    pub shows: u64,
}
