// src/application/commands/favorite_commands.rs
//
// Favorite Command Handlers
//
// RULES:
// - Accept DTOs
// - Delegate to FavoritesView / FavoritesGateway
// - Return DTOs
// - Never contain business logic

use crate::application::dto::{FavoritesPageDto, MovieDto, ToggleResultDto};
use crate::application::error_handling::CommandResult;
use crate::application::state::AppState;
use crate::domain::{Movie, MovieId};
use crate::error::AppError;
use crate::services::FavoritesView;

/// Toggle the favorite status of the movie a view handed over
pub async fn toggle_favorite(
    state: &AppState,
    view: &FavoritesView,
    movie: Option<MovieDto>,
) -> CommandResult<ToggleResultDto> {
    // Sign-in comes before input checks
    if !state.session.is_authenticated() {
        return Err(AppError::AuthRequired.into());
    }

    let movie = movie.map(Movie::try_from).transpose()?;
    let outcome = view.toggle(movie.as_ref()).await?;

    let title = movie.as_ref().map(|m| m.title.as_str()).unwrap_or_default();
    Ok(ToggleResultDto::from_outcome(&outcome, title))
}

/// The signed-in user's favorites
pub async fn favorites_page(view: &FavoritesView) -> CommandResult<FavoritesPageDto> {
    let movies = view.load_favorites_page().await?;

    Ok(FavoritesPageDto {
        count: movies.len(),
        movies: movies
            .iter()
            .map(|m| MovieDto::from_movie(m, true))
            .collect(),
    })
}

/// Remove a favorite without a mounted view
pub async fn remove_favorite(state: &AppState, movie_id: i64) -> CommandResult<()> {
    let user_id = state.session.user_id().ok_or(AppError::AuthRequired)?;
    state
        .gateway
        .remove_favorite(&user_id, MovieId(movie_id))
        .await?;
    Ok(())
}

/// Whether the signed-in user favorited the movie; false when signed out
pub async fn is_favorite(state: &AppState, movie_id: i64) -> bool {
    match state.session.user_id() {
        Some(user_id) => state.gateway.is_favorited(&user_id, MovieId(movie_id)).await,
        None => false,
    }
}
