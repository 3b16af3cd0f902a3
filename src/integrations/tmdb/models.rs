// src/integrations/tmdb/models.rs
//
// TMDB response shapes. Only the fields the app reads are declared;
// everything else in the payload is ignored.

use serde::{Deserialize, Serialize};

use crate::domain::Movie;
use crate::error::{AppError, AppResult};

/// Browsable movie lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovieCategory {
    Popular,
    TopRated,
    Upcoming,
    NowPlaying,
    Trending,
}

impl MovieCategory {
    pub const ALL: [MovieCategory; 5] = [
        MovieCategory::Popular,
        MovieCategory::TopRated,
        MovieCategory::Upcoming,
        MovieCategory::NowPlaying,
        MovieCategory::Trending,
    ];

    pub fn key(self) -> &'static str {
        match self {
            MovieCategory::Popular => "popular",
            MovieCategory::TopRated => "top_rated",
            MovieCategory::Upcoming => "upcoming",
            MovieCategory::NowPlaying => "now_playing",
            MovieCategory::Trending => "trending",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MovieCategory::Popular => "Popular",
            MovieCategory::TopRated => "Top Rated",
            MovieCategory::Upcoming => "Upcoming",
            MovieCategory::NowPlaying => "Now Playing",
            MovieCategory::Trending => "Trending",
        }
    }

    /// Endpoint path relative to the API root
    pub fn endpoint(self) -> String {
        match self {
            MovieCategory::Trending => "/trending/movie/week".to_string(),
            other => format!("/movie/{}", other.key()),
        }
    }
}

impl std::str::FromStr for MovieCategory {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        MovieCategory::ALL
            .into_iter()
            .find(|c| c.key() == s.trim())
            .ok_or_else(|| AppError::InvalidInput(format!("Unknown movie category: {}", s)))
    }
}

impl std::fmt::Display for MovieCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// One page of catalog results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoviePage {
    #[serde(default = "first_page")]
    pub page: u32,

    #[serde(default)]
    pub results: Vec<Movie>,

    #[serde(default = "first_page")]
    pub total_pages: u32,
}

fn first_page() -> u32 {
    1
}

impl MoviePage {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub key: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub video_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoList {
    #[serde(default)]
    pub results: Vec<Video>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimilarMovies {
    #[serde(default)]
    pub results: Vec<Movie>,
}

/// Movie detail enriched with credits, videos and similar movies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    #[serde(flatten)]
    pub movie: Movie,

    #[serde(default)]
    pub genres: Vec<Genre>,

    #[serde(default)]
    pub runtime: Option<u32>,

    #[serde(default)]
    pub credits: Credits,

    #[serde(default)]
    pub videos: VideoList,

    #[serde(default)]
    pub similar: SimilarMovies,
}

impl MovieDetails {
    /// Key of the first YouTube trailer, if any
    pub fn trailer_key(&self) -> Option<&str> {
        self.videos
            .results
            .iter()
            .find(|v| v.video_type == "Trailer" && v.site == "YouTube")
            .map(|v| v.key.as_str())
    }

    /// The detail payload carries `genres` instead of `genre_ids`
    pub fn as_movie(&self) -> Movie {
        let mut movie = self.movie.clone();
        if movie.genre_ids.is_empty() {
            movie.genre_ids = self.genres.iter().map(|g| g.id).collect();
        }
        movie
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MovieId;
    use serde_json::json;

    #[test]
    fn test_category_endpoints() {
        assert_eq!(MovieCategory::TopRated.endpoint(), "/movie/top_rated");
        assert_eq!(MovieCategory::Trending.endpoint(), "/trending/movie/week");
        assert_eq!("now_playing".parse::<MovieCategory>().unwrap(), MovieCategory::NowPlaying);
        assert!("classics".parse::<MovieCategory>().is_err());
    }

    #[test]
    fn test_page_without_total_pages() {
        let page: MoviePage = serde_json::from_value(json!({
            "results": [{"id": 1, "title": "A"}, {"id": 2, "title": "B"}]
        }))
        .unwrap();
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.results.len(), 2);
        assert!(!page.has_next());
    }

    #[test]
    fn test_details_decoding() {
        let details: MovieDetails = serde_json::from_value(json!({
            "id": 438631,
            "title": "Dune",
            "poster_path": "/d5NXSklXo0qyIYkgV94XAgMIckC.jpg",
            "release_date": "2021-09-15",
            "vote_average": 7.8,
            "genres": [{"id": 878, "name": "Science Fiction"}, {"id": 12, "name": "Adventure"}],
            "runtime": 155,
            "credits": {"cast": [{"name": "Timothée Chalamet", "character": "Paul Atreides"}]},
            "videos": {"results": [
                {"key": "teaser1", "site": "YouTube", "type": "Teaser"},
                {"key": "n9xhJrPXop4", "site": "YouTube", "type": "Trailer"}
            ]},
            "similar": {"results": [{"id": 841, "title": "Dune"}]}
        }))
        .unwrap();

        assert_eq!(details.movie.id, MovieId(438631));
        assert_eq!(details.trailer_key(), Some("n9xhJrPXop4"));
        assert_eq!(details.similar.results.len(), 1);
        assert_eq!(details.as_movie().genre_ids, vec![878, 12]);
    }
}
