// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO event emission
// - Explicit SQL only

pub mod favorites_store;

pub use favorites_store::{FavoritesStore, SqliteFavoritesStore};

#[cfg(test)]
pub use favorites_store::MockFavoritesStore;
