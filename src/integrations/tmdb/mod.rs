pub mod client;
pub mod models;

pub use client::{MovieCatalog, TmdbClient};
pub use models::{CastMember, Genre, MovieCategory, MovieDetails, MoviePage, Video};

#[cfg(test)]
pub use client::MockMovieCatalog;
