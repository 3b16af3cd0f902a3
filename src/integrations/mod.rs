// src/integrations/mod.rs
//
// External Integrations Module
//
// - tmdb: movie catalog (read-only)
// - firestore: remote favorites store

pub mod firestore;
pub mod tmdb;

pub use firestore::FirestoreFavoritesStore;
pub use tmdb::{MovieCatalog, MovieCategory, MovieDetails, MoviePage, TmdbClient};

#[cfg(test)]
pub use tmdb::MockMovieCatalog;
