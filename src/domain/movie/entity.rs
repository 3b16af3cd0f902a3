use serde::{Deserialize, Serialize};

/// Fixed image host prefix for poster and backdrop path fragments
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Catalog-assigned movie identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub i64);

impl MovieId {
    pub fn value(self) -> i64 {
        self.0
    }

    /// Key used for the movie's document in per-user collections
    pub fn document_key(self) -> String {
        self.0.to_string()
    }
}

impl std::fmt::Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for MovieId {
    fn from(value: i64) -> Self {
        MovieId(value)
    }
}

impl std::str::FromStr for MovieId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(MovieId)
    }
}

/// A movie as returned by the catalog.
/// Immutable from the favorites core's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub poster_path: Option<String>,

    #[serde(default)]
    pub backdrop_path: Option<String>,

    #[serde(default)]
    pub overview: Option<String>,

    /// ISO-like date string as delivered by the catalog
    #[serde(default)]
    pub release_date: Option<String>,

    /// Average rating, 0-10
    #[serde(default)]
    pub vote_average: f64,

    /// Genre identifiers; order carries no meaning here
    #[serde(default)]
    pub genre_ids: Vec<i64>,
}

impl Movie {
    /// Create a movie with only id and title set
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id: MovieId(id),
            title: title.into(),
            poster_path: None,
            backdrop_path: None,
            overview: None,
            release_date: None,
            vote_average: 0.0,
            genre_ids: Vec::new(),
        }
    }

    pub fn poster_url(&self) -> Option<String> {
        self.poster_path.as_deref().map(image_url)
    }

    pub fn backdrop_url(&self) -> Option<String> {
        self.backdrop_path.as_deref().map(image_url)
    }

    /// Rating on a 0-100 scale
    pub fn rating_percent(&self) -> u32 {
        (self.vote_average * 10.0).round().clamp(0.0, 100.0) as u32
    }
}

impl std::fmt::Display for Movie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.title, self.id)
    }
}

/// Combine a path fragment with the image host prefix
pub fn image_url(path: &str) -> String {
    if path.starts_with('/') {
        format!("{}{}", IMAGE_BASE_URL, path)
    } else {
        format!("{}/{}", IMAGE_BASE_URL, path)
    }
}
