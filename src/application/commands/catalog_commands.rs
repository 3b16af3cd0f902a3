// src/application/commands/catalog_commands.rs
//
// Catalog Command Handlers
//
// RULES:
// - Fetch from the catalog, then hydrate the view
// - Return DTOs with favorite flags from the view
// - Never contain business logic

use crate::application::dto::{MovieDetailsDto, MoviePageDto};
use crate::application::error_handling::CommandResult;
use crate::application::state::AppState;
use crate::domain::MovieId;
use crate::error::AppError;
use crate::integrations::MovieCategory;
use crate::services::FavoritesView;

/// Browse one of the catalog lists
pub async fn browse_category(
    state: &AppState,
    view: &FavoritesView,
    category: &str,
    page: u32,
) -> CommandResult<MoviePageDto> {
    let category: MovieCategory = category.parse()?;

    let movies = state.catalog()?.movies_by_category(category, page).await?;
    view.hydrate(movies.results.clone()).await;

    Ok(MoviePageDto::from_page(&movies, |id| view.is_favorite(id)))
}

/// Search the catalog; a blank query lists popular movies
pub async fn search_movies(
    state: &AppState,
    view: &FavoritesView,
    query: &str,
    page: u32,
) -> CommandResult<MoviePageDto> {
    let movies = state.catalog()?.search_movies(query, page).await?;
    view.hydrate_from_listing(movies.results.clone()).await;

    Ok(MoviePageDto::from_page(&movies, |id| view.is_favorite(id)))
}

/// Detail page of one movie
pub async fn movie_details(
    state: &AppState,
    view: &FavoritesView,
    movie_id: i64,
) -> CommandResult<MovieDetailsDto> {
    if movie_id <= 0 {
        return Err(AppError::InvalidInput(format!("Invalid movie id: {}", movie_id)).into());
    }

    let details = state.catalog()?.movie_details(MovieId(movie_id)).await?;
    view.hydrate(vec![details.as_movie()]).await;

    Ok(MovieDetailsDto::from_details(&details, |id| view.is_favorite(id)))
}
