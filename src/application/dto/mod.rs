// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are view-friendly representations
// - DTOs are simple, serializable structs
// - The only inbound conversion is MovieDto → Movie, and it validates

use serde::{Deserialize, Serialize};

use crate::domain::{validate_movie, Movie, MovieId};
use crate::error::AppError;
use crate::integrations::{MovieDetails, MoviePage};
use crate::services::ToggleOutcome;

// ============================================================================
// MOVIE DTOs
// ============================================================================

/// A movie card as a view renders it.
///
/// Also the payload of a toggle request, where the view may hand over a
/// half-filled object; `id` is therefore optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieDto {
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub genre_ids: Vec<i64>,

    // Derived, ignored on input
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub rating_percent: u32,
    #[serde(default)]
    pub is_favorite: bool,
}

impl MovieDto {
    pub fn from_movie(movie: &Movie, is_favorite: bool) -> Self {
        Self {
            id: Some(movie.id.value()),
            title: movie.title.clone(),
            poster_path: movie.poster_path.clone(),
            backdrop_path: movie.backdrop_path.clone(),
            overview: movie.overview.clone(),
            release_date: movie.release_date.clone(),
            vote_average: movie.vote_average,
            genre_ids: movie.genre_ids.clone(),
            poster_url: movie.poster_url(),
            rating_percent: movie.rating_percent(),
            is_favorite,
        }
    }
}

impl TryFrom<MovieDto> for Movie {
    type Error = AppError;

    fn try_from(dto: MovieDto) -> Result<Self, Self::Error> {
        let id = dto
            .id
            .ok_or_else(|| AppError::InvalidInput("Movie has no id".to_string()))?;

        let movie = Movie {
            id: MovieId(id),
            title: dto.title,
            poster_path: dto.poster_path,
            backdrop_path: dto.backdrop_path,
            overview: dto.overview,
            release_date: dto.release_date,
            vote_average: dto.vote_average,
            genre_ids: dto.genre_ids,
        };

        validate_movie(&movie).map_err(|e| AppError::InvalidInput(e.to_string()))?;
        Ok(movie)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoviePageDto {
    pub page: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub movies: Vec<MovieDto>,
}

impl MoviePageDto {
    pub fn from_page(page: &MoviePage, is_favorite: impl Fn(MovieId) -> bool) -> Self {
        Self {
            page: page.page,
            total_pages: page.total_pages,
            has_next: page.has_next(),
            movies: page
                .results
                .iter()
                .map(|m| MovieDto::from_movie(m, is_favorite(m.id)))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastDto {
    pub name: String,
    pub character: Option<String>,
    pub profile_url: Option<String>,
}

/// Card in the "similar movies" strip; these are not hydrated, so they
/// carry no favorite flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarMovieDto {
    pub id: i64,
    pub title: String,
    pub poster_url: Option<String>,
    pub release_date: Option<String>,
    pub rating_percent: u32,
}

impl From<&Movie> for SimilarMovieDto {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id.value(),
            title: movie.title.clone(),
            poster_url: movie.poster_url(),
            release_date: movie.release_date.clone(),
            rating_percent: movie.rating_percent(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetailsDto {
    pub movie: MovieDto,
    pub genres: Vec<String>,
    pub runtime: Option<u32>,
    pub cast: Vec<CastDto>,
    pub trailer_key: Option<String>,
    pub similar: Vec<SimilarMovieDto>,
}

impl MovieDetailsDto {
    pub fn from_details(details: &MovieDetails, is_favorite: impl Fn(MovieId) -> bool) -> Self {
        let movie = details.as_movie();
        Self {
            movie: MovieDto::from_movie(&movie, is_favorite(movie.id)),
            genres: details.genres.iter().map(|g| g.name.clone()).collect(),
            runtime: details.runtime,
            cast: details
                .credits
                .cast
                .iter()
                .map(|c| CastDto {
                    name: c.name.clone(),
                    character: c.character.clone(),
                    profile_url: c.profile_path.as_deref().map(crate::domain::image_url),
                })
                .collect(),
            trailer_key: details.trailer_key().map(str::to_string),
            similar: details
                .similar
                .results
                .iter()
                .map(SimilarMovieDto::from)
                .collect(),
        }
    }
}

// ============================================================================
// FAVORITE DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleResultDto {
    pub movie_id: i64,
    pub is_favorite: bool,
    pub applied: bool,
    /// Confirmation shown to the user
    pub notice: String,
}

impl ToggleResultDto {
    pub fn from_outcome(outcome: &ToggleOutcome, title: &str) -> Self {
        let notice = if outcome.is_favorite {
            format!("Added \"{}\" to favorites!", title)
        } else {
            format!("Removed \"{}\" from favorites.", title)
        };

        Self {
            movie_id: outcome.movie_id.value(),
            is_favorite: outcome.is_favorite,
            applied: outcome.applied,
            notice,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoritesPageDto {
    pub count: usize,
    pub movies: Vec<MovieDto>,
}
