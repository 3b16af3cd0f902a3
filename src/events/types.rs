// events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::MovieId;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// FAVORITE EVENTS
// ============================================================================

/// Emitted after the store confirmed a favorite write
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteAdded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: String,
    pub movie_id: MovieId,
    pub title: String,
}

impl FavoriteAdded {
    pub fn new(user_id: String, movie_id: MovieId, title: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
            movie_id,
            title,
        }
    }
}

impl DomainEvent for FavoriteAdded {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "FavoriteAdded" }
}

/// Emitted after the store confirmed a favorite delete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteRemoved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: String,
    pub movie_id: MovieId,
}

impl FavoriteRemoved {
    pub fn new(user_id: String, movie_id: MovieId) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
            movie_id,
        }
    }
}

impl DomainEvent for FavoriteRemoved {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "FavoriteRemoved" }
}

/// Emitted when a view finished populating its favorite statuses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoritesHydrated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: String,
    pub movie_count: usize,
    pub favorite_count: usize,
    pub failed_count: usize,
}

impl FavoritesHydrated {
    pub fn new(user_id: String, movie_count: usize, favorite_count: usize, failed_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
            movie_count,
            favorite_count,
            failed_count,
        }
    }
}

impl DomainEvent for FavoritesHydrated {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "FavoritesHydrated" }
}

// ============================================================================
// SESSION EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSignedIn {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: String,
}

impl UserSignedIn {
    pub fn new(user_id: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
        }
    }
}

impl DomainEvent for UserSignedIn {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "UserSignedIn" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSignedOut {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: String,
}

impl UserSignedOut {
    pub fn new(user_id: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
        }
    }
}

impl DomainEvent for UserSignedOut {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "UserSignedOut" }
}
