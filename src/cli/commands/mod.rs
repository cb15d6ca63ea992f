mod catalogue;
mod schedule;

pub use catalogue::{cmd_list_genres, cmd_list_halls, cmd_list_movies};
pub use schedule::cmd_list_shows;
