use serde::{Deserialize, Serialize};

use crate::domain::movie::{Movie, MovieId};

/// A user's bookmark of a movie.
///
/// Holds a denormalized copy of the movie's display fields taken when the
/// movie was favorited. The copy is never refreshed from the catalog, so
/// ratings or titles may drift from the live entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    pub id: MovieId,
    pub title: String,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: f64,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
}

impl FavoriteRecord {
    /// Snapshot the display fields of a movie
    pub fn snapshot(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster_path: movie.poster_path.clone(),
            release_date: movie.release_date.clone(),
            vote_average: movie.vote_average,
            genre_ids: movie.genre_ids.clone(),
        }
    }
}

impl From<FavoriteRecord> for Movie {
    fn from(record: FavoriteRecord) -> Self {
        Movie {
            id: record.id,
            title: record.title,
            poster_path: record.poster_path,
            backdrop_path: None,
            overview: None,
            release_date: record.release_date,
            vote_average: record.vote_average,
            genre_ids: record.genre_ids,
        }
    }
}

/// Favorite status of one displayed movie inside a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FavoriteStatus {
    /// Not queried yet, or the lookup failed
    Unknown,
    /// Last successful read or write says favorited
    Favorite,
    /// Last successful read or write says not favorited
    NotFavorite,
    /// A toggle write is in flight; the view keeps rendering the last
    /// confirmed status until it resolves
    Pending,
}

impl FavoriteStatus {
    pub fn from_bool(is_favorite: bool) -> Self {
        if is_favorite {
            FavoriteStatus::Favorite
        } else {
            FavoriteStatus::NotFavorite
        }
    }

    /// Only a settled favorite renders as favorited
    pub fn is_favorite(self) -> bool {
        matches!(self, FavoriteStatus::Favorite)
    }

    pub fn is_known(self) -> bool {
        matches!(self, FavoriteStatus::Favorite | FavoriteStatus::NotFavorite)
    }
}

impl std::fmt::Display for FavoriteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            FavoriteStatus::Unknown => "unknown",
            FavoriteStatus::Favorite => "favorite",
            FavoriteStatus::NotFavorite => "not_favorite",
            FavoriteStatus::Pending => "pending",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> Movie {
        Movie {
            id: MovieId(42),
            title: "Dune".to_string(),
            poster_path: Some("/abc.jpg".to_string()),
            backdrop_path: Some("/backdrop.jpg".to_string()),
            overview: Some("Spice".to_string()),
            release_date: Some("2021-10-22".to_string()),
            vote_average: 8.1,
            genre_ids: vec![12, 878],
        }
    }

    #[test]
    fn test_snapshot_copies_display_fields_only() {
        let record = FavoriteRecord::snapshot(&dune());
        assert_eq!(record.id, MovieId(42));
        assert_eq!(record.genre_ids, vec![12, 878]);

        let movie = Movie::from(record);
        assert_eq!(movie.title, "Dune");
        assert!(movie.backdrop_path.is_none());
        assert!(movie.overview.is_none());
    }

    #[test]
    fn test_status_rendering() {
        assert!(FavoriteStatus::Favorite.is_favorite());
        assert!(!FavoriteStatus::Unknown.is_favorite());
        assert!(!FavoriteStatus::Pending.is_favorite());
        assert!(!FavoriteStatus::Pending.is_known());
        assert_eq!(FavoriteStatus::from_bool(false), FavoriteStatus::NotFavorite);
    }
}
