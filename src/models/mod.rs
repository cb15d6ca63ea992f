pub mod genre;
pub mod hall;
pub mod movie;
pub mod show;

pub use genre::Genre;
pub use hall::Hall;
pub use movie::Movie;
pub use show::{Show, ShowFilter};
