// src/services/favorites_view.rs
//
// Favorites reconciliation for one mounted view
//
// ARCHITECTURE:
// - Owns the displayed movie list and the id → status map
// - Reads the user from the injected SessionContext
// - Talks to the store only through FavoritesGateway
//
// CRITICAL RULES:
// - A status changes only after the store confirmed the write
// - While a write is in flight the last confirmed status is rendered
// - One toggle per movie at a time; overlapping toggles are rejected
// - The state lock is never held across an await
// - Results arriving after unmount or a user change are dropped

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use futures::stream::{self, StreamExt};
use serde::Serialize;

use crate::config::DEFAULT_HYDRATION_CONCURRENCY;
use crate::domain::{validate_movie, FavoriteStatus, Movie, MovieId};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, FavoritesHydrated};
use crate::services::favorites_gateway::FavoritesGateway;
use crate::services::session::SessionContext;

/// Result of an accepted toggle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleOutcome {
    pub movie_id: MovieId,
    /// Stored state after the write
    pub is_favorite: bool,
    /// False when the view was gone or re-bound before the write finished
    pub applied: bool,
}

/// Summary of one hydration pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HydrationReport {
    pub favorited: usize,
    pub not_favorited: usize,
    pub failed: usize,
    /// Superseded before its results arrived
    pub discarded: bool,
}

#[derive(Default)]
struct ViewState {
    mounted: bool,
    /// User the statuses belong to
    bound_user: Option<String>,
    /// Bumped on unmount and on every user change
    epoch: u64,
    /// Bumped on every list replacement
    generation: u64,
    movies: Vec<Movie>,
    /// Last confirmed status per movie; never `Pending`
    statuses: HashMap<MovieId, FavoriteStatus>,
    /// Movies with a toggle write in flight
    in_flight: HashSet<MovieId>,
    /// Movies toggled since the current list was loaded
    touched: HashSet<MovieId>,
}

impl ViewState {
    fn settled(&self, movie_id: MovieId) -> FavoriteStatus {
        self.statuses
            .get(&movie_id)
            .copied()
            .unwrap_or(FavoriteStatus::Unknown)
    }

    fn status(&self, movie_id: MovieId) -> FavoriteStatus {
        if self.in_flight.contains(&movie_id) {
            FavoriteStatus::Pending
        } else {
            self.settled(movie_id)
        }
    }

    fn reset_statuses(&mut self) {
        self.statuses = self
            .movies
            .iter()
            .map(|m| (m.id, FavoriteStatus::Unknown))
            .collect();
        self.touched = self.in_flight.clone();
    }

    fn replace_movies(&mut self, movies: Vec<Movie>) -> u64 {
        self.generation += 1;
        self.movies = movies;
        self.reset_statuses();
        self.generation
    }
}

pub struct FavoritesView {
    session: SessionContext,
    gateway: Arc<FavoritesGateway>,
    hydration_concurrency: usize,
    state: Mutex<ViewState>,
}

impl FavoritesView {
    /// Create a mounted view with an empty list
    pub fn new(session: SessionContext, gateway: Arc<FavoritesGateway>) -> Self {
        let bound_user = session.user_id();
        Self {
            session,
            gateway,
            hydration_concurrency: DEFAULT_HYDRATION_CONCURRENCY,
            state: Mutex::new(ViewState {
                mounted: true,
                bound_user,
                ..ViewState::default()
            }),
        }
    }

    pub fn with_hydration_concurrency(mut self, concurrency: usize) -> Self {
        self.hydration_concurrency = concurrency.max(1);
        self
    }

    fn event_bus(&self) -> &Arc<EventBus> {
        self.gateway.event_bus()
    }

    /// Lock the state, re-binding it if the session user changed
    fn state(&self) -> MutexGuard<'_, ViewState> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let current = self.session.user_id();
        if state.mounted && state.bound_user != current {
            log::debug!(
                "Session changed from {:?} to {:?}, discarding favorite statuses",
                state.bound_user,
                current
            );
            state.bound_user = current;
            state.epoch += 1;
            // Pending toggles of the previous user do not carry over
            state.statuses = state
                .movies
                .iter()
                .map(|m| (m.id, FavoriteStatus::Unknown))
                .collect();
            state.in_flight.clear();
            state.touched.clear();
        }
        state
    }

    /// Whether a result computed for (epoch, user) may still be applied
    fn is_live(&self, state: &ViewState, epoch: u64, user_id: &str) -> bool {
        state.mounted && state.epoch == epoch && state.bound_user.as_deref() == Some(user_id)
    }

    // ========================================================================
    // TOGGLE
    // ========================================================================

    /// Flip the favorite status of a movie.
    ///
    /// Exactly one store write per accepted toggle. The new status is
    /// applied once the write is confirmed; on failure the previous status
    /// stays and `DataWrite` is returned. An unmounted view has no status
    /// to flip and rejects the toggle with `ViewUnmounted`.
    pub async fn toggle(&self, movie: Option<&Movie>) -> AppResult<ToggleOutcome> {
        let user_id = self.session.user_id().ok_or(AppError::AuthRequired)?;

        let movie = movie.ok_or_else(|| AppError::InvalidInput("No movie selected".to_string()))?;
        validate_movie(movie).map_err(|e| AppError::InvalidInput(e.to_string()))?;

        let (previous, epoch) = {
            let mut state = self.state();
            if !state.mounted {
                return Err(AppError::ViewUnmounted);
            }
            if state.in_flight.contains(&movie.id) {
                return Err(AppError::ToggleInFlight(movie.id));
            }

            state.in_flight.insert(movie.id);
            state.touched.insert(movie.id);
            (state.settled(movie.id), state.epoch)
        };

        let removing = previous == FavoriteStatus::Favorite;
        let result = if removing {
            self.gateway.remove_favorite(&user_id, movie.id).await
        } else {
            self.gateway.add_favorite(&user_id, movie).await
        };

        let mut state = self.state();
        let applied = self.is_live(&state, epoch, &user_id);

        if applied {
            state.in_flight.remove(&movie.id);
        }

        let is_favorite = !removing;
        result?;
        if applied {
            state
                .statuses
                .insert(movie.id, FavoriteStatus::from_bool(is_favorite));
        } else {
            log::debug!("Toggle of {} finished after the view moved on", movie.id);
        }
        Ok(ToggleOutcome {
            movie_id: movie.id,
            is_favorite,
            applied,
        })
    }

    // ========================================================================
    // HYDRATION
    // ========================================================================

    /// Replace the displayed list and look up every movie individually.
    ///
    /// Lookups run with bounded concurrency. A failed lookup leaves that
    /// movie `Unknown` and does not stop the others.
    pub async fn hydrate(&self, movies: Vec<Movie>) -> HydrationReport {
        let Some((user_id, epoch, generation, ids)) = self.begin_hydration(movies) else {
            return HydrationReport::default();
        };

        let gateway = &self.gateway;
        let user = user_id.as_str();
        let results: Vec<(MovieId, AppResult<bool>)> = stream::iter(ids)
            .map(|id| async move { (id, gateway.check_favorited(user, id).await) })
            .buffer_unordered(self.hydration_concurrency)
            .collect()
            .await;

        let found: HashMap<MovieId, Option<bool>> = results
            .into_iter()
            .map(|(id, result)| (id, result.ok()))
            .collect();

        self.finish_hydration(&user_id, epoch, generation, found)
    }

    /// Replace the displayed list and resolve it with a single listing call.
    ///
    /// Listed ids become `Favorite`, the rest `NotFavorite`. If the listing
    /// fails every movie stays `Unknown`.
    pub async fn hydrate_from_listing(&self, movies: Vec<Movie>) -> HydrationReport {
        let Some((user_id, epoch, generation, ids)) = self.begin_hydration(movies) else {
            return HydrationReport::default();
        };

        let found: HashMap<MovieId, Option<bool>> =
            match self.gateway.try_list_favorites(&user_id).await {
                Ok(records) => {
                    let favorites: HashSet<MovieId> = records.iter().map(|r| r.id).collect();
                    ids.into_iter()
                        .map(|id| (id, Some(favorites.contains(&id))))
                        .collect()
                }
                Err(_) => ids.into_iter().map(|id| (id, None)).collect(),
            };

        self.finish_hydration(&user_id, epoch, generation, found)
    }

    /// Install the new list; returns what the lookups need, or None when
    /// there is nobody to look up for
    fn begin_hydration(&self, movies: Vec<Movie>) -> Option<(String, u64, u64, Vec<MovieId>)> {
        let mut state = self.state();
        if !state.mounted {
            log::debug!("Ignoring hydration of an unmounted view");
            return None;
        }

        let generation = state.replace_movies(movies);
        let user_id = state.bound_user.clone()?;

        let mut seen = HashSet::new();
        let ids: Vec<MovieId> = state
            .movies
            .iter()
            .map(|m| m.id)
            .filter(|id| seen.insert(*id))
            .collect();

        Some((user_id, state.epoch, generation, ids))
    }

    fn finish_hydration(
        &self,
        user_id: &str,
        epoch: u64,
        generation: u64,
        found: HashMap<MovieId, Option<bool>>,
    ) -> HydrationReport {
        let mut report = HydrationReport::default();
        for value in found.values() {
            match value {
                Some(true) => report.favorited += 1,
                Some(false) => report.not_favorited += 1,
                None => report.failed += 1,
            }
        }

        {
            let mut state = self.state();
            if !self.is_live(&state, epoch, user_id) || state.generation != generation {
                log::debug!("Discarding superseded hydration for {}", user_id);
                report.discarded = true;
                return report;
            }

            for (id, value) in found {
                if state.touched.contains(&id) {
                    continue;
                }
                if let Some(is_favorite) = value {
                    state.statuses.insert(id, FavoriteStatus::from_bool(is_favorite));
                }
            }
        }

        if report.failed > 0 {
            log::warn!(
                "Hydration for {}: {} of {} lookups failed",
                user_id,
                report.failed,
                report.favorited + report.not_favorited + report.failed
            );
        }

        self.event_bus().emit(FavoritesHydrated::new(
            user_id.to_string(),
            report.favorited + report.not_favorited + report.failed,
            report.favorited,
            report.failed,
        ));
        report
    }

    // ========================================================================
    // FAVORITES PAGE
    // ========================================================================

    /// Show the user's stored favorites.
    ///
    /// Every listed movie is a settled `Favorite`. A listing failure shows
    /// an empty page.
    pub async fn load_favorites_page(&self) -> AppResult<Vec<Movie>> {
        let user_id = self.session.user_id().ok_or(AppError::AuthRequired)?;

        let (epoch, generation) = {
            let mut state = self.state();
            let generation = state.replace_movies(Vec::new());
            (state.epoch, generation)
        };

        let movies: Vec<Movie> = match self.gateway.try_list_favorites(&user_id).await {
            Ok(records) => records.into_iter().map(Movie::from).collect(),
            Err(e) => {
                log::error!("Could not load favorites page for {}: {}", user_id, e);
                Vec::new()
            }
        };

        let mut state = self.state();
        if self.is_live(&state, epoch, &user_id) && state.generation == generation {
            state.movies = movies.clone();
            for movie in &movies {
                if !state.touched.contains(&movie.id) {
                    state.statuses.insert(movie.id, FavoriteStatus::Favorite);
                }
            }
        }

        Ok(movies)
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// `Pending` while a toggle write is in flight
    pub fn status(&self, movie_id: MovieId) -> FavoriteStatus {
        self.state().status(movie_id)
    }

    /// Last confirmed status, pending writes included; unknown ids read as
    /// not favorited
    pub fn is_favorite(&self, movie_id: MovieId) -> bool {
        self.state().settled(movie_id).is_favorite()
    }

    /// Favorite flag for every displayed movie
    pub fn favorites_map(&self) -> HashMap<MovieId, bool> {
        let state = self.state();
        state
            .movies
            .iter()
            .map(|m| (m.id, state.settled(m.id).is_favorite()))
            .collect()
    }

    pub fn movies(&self) -> Vec<Movie> {
        self.state().movies.clone()
    }

    pub fn bound_user(&self) -> Option<String> {
        self.state().bound_user.clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).mounted
    }

    /// Drop all state; in-flight work finishes without touching the view
    pub fn unmount(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.mounted = false;
        state.epoch += 1;
        state.generation += 1;
        state.movies.clear();
        state.statuses.clear();
        state.in_flight.clear();
        state.touched.clear();
    }
}

impl std::fmt::Debug for FavoritesView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        f.debug_struct("FavoritesView")
            .field("mounted", &state.mounted)
            .field("bound_user", &state.bound_user)
            .field("movies", &state.movies.len())
            .finish()
    }
}
