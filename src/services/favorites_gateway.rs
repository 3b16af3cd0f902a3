// src/services/favorites_gateway.rs
//
// Favorites Gateway
//
// The only component that talks to the favorites store.
//
// CRITICAL RULES:
// - Validates input before any store call
// - Converts every store failure into DataWrite / DataRead
// - Emits events only after the store confirmed the change
// - Knows nothing about views or statuses

use std::sync::Arc;

use crate::domain::{validate_movie, FavoriteRecord, Movie, MovieId};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, FavoriteAdded, FavoriteRemoved};
use crate::repositories::FavoritesStore;

pub struct FavoritesGateway {
    store: Arc<dyn FavoritesStore>,
    event_bus: Arc<EventBus>,
}

impl FavoritesGateway {
    pub fn new(store: Arc<dyn FavoritesStore>, event_bus: Arc<EventBus>) -> Self {
        Self { store, event_bus }
    }

    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.event_bus
    }

    // ========================================================================
    // WRITES
    // ========================================================================

    /// Store a snapshot of the movie as the user's favorite.
    ///
    /// Adding an existing favorite overwrites it; there is never more than
    /// one record per (user, movie).
    pub async fn add_favorite(&self, user_id: &str, movie: &Movie) -> AppResult<()> {
        require_user_id(user_id)?;
        validate_movie(movie).map_err(|e| AppError::InvalidInput(e.to_string()))?;

        let record = FavoriteRecord::snapshot(movie);
        self.store.put(user_id, &record).await.map_err(|e| {
            log::error!("Failed to add favorite {} for {}: {}", movie.id, user_id, e);
            AppError::DataWrite(e.to_string())
        })?;

        log::info!("Favorite added: {} ({}) for {}", movie.title, movie.id, user_id);
        self.event_bus.emit(FavoriteAdded::new(
            user_id.to_string(),
            movie.id,
            movie.title.clone(),
        ));
        Ok(())
    }

    /// Remove the favorite; removing a missing favorite succeeds
    pub async fn remove_favorite(&self, user_id: &str, movie_id: MovieId) -> AppResult<()> {
        require_user_id(user_id)?;

        self.store.delete(user_id, movie_id).await.map_err(|e| {
            log::error!("Failed to remove favorite {} for {}: {}", movie_id, user_id, e);
            AppError::DataWrite(e.to_string())
        })?;

        log::info!("Favorite removed: {} for {}", movie_id, user_id);
        self.event_bus
            .emit(FavoriteRemoved::new(user_id.to_string(), movie_id));
        Ok(())
    }

    // ========================================================================
    // READS
    // ========================================================================

    /// Lenient lookup: unknown user or store failure reads as not favorited
    pub async fn is_favorited(&self, user_id: &str, movie_id: MovieId) -> bool {
        if user_id.trim().is_empty() {
            return false;
        }

        match self.check_favorited(user_id, movie_id).await {
            Ok(found) => found,
            Err(_) => false,
        }
    }

    /// Strict lookup used by hydration
    pub async fn check_favorited(&self, user_id: &str, movie_id: MovieId) -> AppResult<bool> {
        require_user_id(user_id)?;

        self.store.exists(user_id, movie_id).await.map_err(|e| {
            log::warn!("Favorite lookup {} for {} failed: {}", movie_id, user_id, e);
            AppError::DataRead(e.to_string())
        })
    }

    /// Lenient listing: unknown user or store failure yields an empty list
    pub async fn list_favorites(&self, user_id: &str) -> Vec<Movie> {
        if user_id.trim().is_empty() {
            return Vec::new();
        }

        match self.try_list_favorites(user_id).await {
            Ok(records) => records.into_iter().map(Movie::from).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Strict listing
    pub async fn try_list_favorites(&self, user_id: &str) -> AppResult<Vec<FavoriteRecord>> {
        require_user_id(user_id)?;

        let records = self.store.list(user_id).await.map_err(|e| {
            log::warn!("Listing favorites for {} failed: {}", user_id, e);
            AppError::DataRead(e.to_string())
        })?;

        log::debug!("Listed {} favorites for {}", records.len(), user_id);
        Ok(records)
    }
}

fn require_user_id(user_id: &str) -> AppResult<()> {
    if user_id.trim().is_empty() {
        return Err(AppError::InvalidInput("User id cannot be empty".to_string()));
    }
    Ok(())
}
