pub mod validation;
pub use validation::FieldErrors;

pub mod genre_service;
pub mod genre_service_impl;
pub use genre_service::{GenreError, GenreService};
pub use genre_service_impl::SeaOrmGenreService;

pub mod movie_service;
pub mod movie_service_impl;
pub use movie_service::{MovieError, MovieInput, MovieService};
pub use movie_service_impl::SeaOrmMovieService;

pub mod hall_service;
pub mod hall_service_impl;
pub use hall_service::{HallError, HallInput, HallService};
pub use hall_service_impl::SeaOrmHallService;

pub mod show_service;
pub mod show_service_impl;
pub use show_service::{ShowError, ShowQuery, ShowService};
pub use show_service_impl::SeaOrmShowService;
