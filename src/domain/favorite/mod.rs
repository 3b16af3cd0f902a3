//! Favorite invariants:
//!
//! 1. At most one record per (user, movie)
//! 2. Presence of the record means "is favorite"
//! 3. Records are created or destroyed, never updated
//! 4. The snapshot is not refreshed when the catalog changes

pub mod entity;

pub use entity::{FavoriteRecord, FavoriteStatus};
