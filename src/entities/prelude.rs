pub use super::genre::Entity as Genres;
pub use super::hall::Entity as Halls;
pub use super::movie::Entity as Movies;
pub use super::show::Entity as Shows;
