pub mod genre;
pub mod hall;
pub mod movie;
pub mod show;
