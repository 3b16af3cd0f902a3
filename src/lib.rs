// src/lib.rs
// MovieMark - movie browsing with per-user favorites
//
// Architecture:
// - Domain-centric: movies, favorite records and users live in `domain`
// - Event-driven: services announce confirmed changes on the event bus
// - Explicit: session and stores are injected, never global
// - Store-agnostic: favorites go through the FavoritesStore trait
// - Application Layer: view boundary, DTOs and user-facing errors

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    image_url,
    validate_movie,
    validate_user,
    CurrentUser,
    // Favorite
    FavoriteRecord,
    FavoriteStatus,
    // Movie
    Movie,
    MovieId,
    IMAGE_BASE_URL,
};

// ============================================================================
// PUBLIC API - Configuration & Errors
// ============================================================================

pub use config::{AppConfig, StoreBackend};
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    DomainEvent,
    EventBus,
    EventLogEntry,
    // Favorite events
    FavoriteAdded,
    FavoriteRemoved,
    FavoritesHydrated,
    // Session events
    UserSignedIn,
    UserSignedOut,
};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, create_memory_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Stores
// ============================================================================

pub use repositories::{FavoritesStore, SqliteFavoritesStore};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    FavoritesGateway,
    FavoritesView,
    HydrationReport,
    SessionContext,
    ToggleOutcome,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppState, ErrorResponse, ErrorType};

// Re-export application submodules
pub use application::commands;
pub use application::dto;

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{
    FirestoreFavoritesStore,
    MovieCatalog,
    MovieCategory,
    MovieDetails,
    MoviePage,
    TmdbClient,
};
