// src/application/commands/commands_tests.rs
//
// UNIT TESTS: Command handlers
//
// Commands are wired against an in-memory SQLite store and a mocked catalog.

#[cfg(test)]
mod command_tests {
    use std::sync::Arc;

    use crate::application::commands::*;
    use crate::application::dto::MovieDto;
    use crate::application::error_handling::{ErrorType, AUTH_REQUIRED_MESSAGE, TRY_AGAIN_MESSAGE};
    use crate::application::state::AppState;
    use crate::config::AppConfig;
    use crate::db::{create_memory_pool, initialize_database};
    use crate::domain::{CurrentUser, FavoriteRecord, Movie, MovieId};
    use crate::error::AppError;
    use crate::events::EventBus;
    use crate::integrations::{MockMovieCatalog, MovieCategory, MovieDetails, MoviePage};
    use crate::repositories::{FavoritesStore, MockFavoritesStore, SqliteFavoritesStore};
    use crate::services::{FavoritesGateway, SessionContext};

    fn page(ids: &[i64]) -> MoviePage {
        MoviePage {
            page: 1,
            results: ids
                .iter()
                .map(|id| Movie::new(*id, format!("Movie {}", id)))
                .collect(),
            total_pages: 3,
        }
    }

    fn state_with(store: Arc<dyn FavoritesStore>, catalog: MockMovieCatalog) -> AppState {
        let event_bus = Arc::new(EventBus::new());
        AppState {
            session: SessionContext::new(event_bus.clone()),
            gateway: Arc::new(FavoritesGateway::new(store, event_bus.clone())),
            catalog: Some(Arc::new(catalog)),
            config: AppConfig::default(),
            event_bus,
        }
    }

    fn sqlite_store() -> Arc<dyn FavoritesStore> {
        let pool = create_memory_pool().unwrap();
        initialize_database(&pool.get().unwrap()).unwrap();
        Arc::new(SqliteFavoritesStore::new(Arc::new(pool)))
    }

    fn dune_dto() -> MovieDto {
        MovieDto::from_movie(&Movie::new(42, "Dune"), false)
    }

    #[tokio::test]
    async fn test_browse_marks_favorites() {
        let store = sqlite_store();
        store.put("u1", &FavoriteRecord::snapshot(&Movie::new(2, "Movie 2"))).await.unwrap();

        let mut catalog = MockMovieCatalog::new();
        catalog
            .expect_movies_by_category()
            .withf(|category, page| *category == MovieCategory::TopRated && *page == 1)
            .times(1)
            .returning(|_, _| Ok(page(&[1, 2, 3])));

        let state = state_with(store, catalog);
        state.session.sign_in(CurrentUser::new("u1")).unwrap();
        let view = state.mount_view();

        let dto = browse_category(&state, &view, "top_rated", 1).await.unwrap();

        let flags: Vec<(Option<i64>, bool)> = dto.movies.iter().map(|m| (m.id, m.is_favorite)).collect();
        assert_eq!(flags, vec![(Some(1), false), (Some(2), true), (Some(3), false)]);
        assert!(dto.has_next);
    }

    #[tokio::test]
    async fn test_unknown_category_is_rejected() {
        let mut catalog = MockMovieCatalog::new();
        catalog.expect_movies_by_category().times(0);
        let state = state_with(sqlite_store(), catalog);
        let view = state.mount_view();

        let err = browse_category(&state, &view, "classics", 1).await.unwrap_err();
        assert_eq!(err.error_type, ErrorType::Validation);
    }

    #[tokio::test]
    async fn test_search_uses_listing_hydration() {
        let mut store = MockFavoritesStore::new();
        store.expect_exists().times(0);
        store.expect_list().times(1).returning(|_| {
            Ok(vec![FavoriteRecord::snapshot(&Movie::new(3, "Movie 3"))])
        });

        let mut catalog = MockMovieCatalog::new();
        catalog
            .expect_search_movies()
            .times(1)
            .returning(|_, _| Ok(page(&[3, 4])));

        let state = state_with(Arc::new(store), catalog);
        state.session.sign_in(CurrentUser::new("u1")).unwrap();
        let view = state.mount_view();

        let dto = search_movies(&state, &view, "matrix", 1).await.unwrap();
        assert!(dto.movies[0].is_favorite);
        assert!(!dto.movies[1].is_favorite);
    }

    #[tokio::test]
    async fn test_catalog_failure_maps_to_external_service() {
        let mut catalog = MockMovieCatalog::new();
        catalog
            .expect_movie_details()
            .returning(|_| Err(AppError::Catalog("status 500".to_string())));
        let state = state_with(sqlite_store(), catalog);
        let view = state.mount_view();

        let err = movie_details(&state, &view, 42).await.unwrap_err();
        assert_eq!(err.error_type, ErrorType::ExternalService);
    }

    #[tokio::test]
    async fn test_details_hydrates_the_movie() {
        let store = sqlite_store();
        store.put("u1", &FavoriteRecord::snapshot(&Movie::new(42, "Dune"))).await.unwrap();

        let mut catalog = MockMovieCatalog::new();
        catalog
            .expect_movie_details()
            .withf(|id| *id == MovieId(42))
            .returning(|_| {
                Ok(serde_json::from_value::<MovieDetails>(serde_json::json!({
                    "id": 42,
                    "title": "Dune",
                    "genres": [{"id": 878, "name": "Science Fiction"}],
                    "videos": {"results": [{"key": "abc", "site": "YouTube", "type": "Trailer"}]}
                }))
                .unwrap())
            });

        let state = state_with(store, catalog);
        state.session.sign_in(CurrentUser::new("u1")).unwrap();
        let view = state.mount_view();

        let dto = movie_details(&state, &view, 42).await.unwrap();
        assert!(dto.movie.is_favorite);
        assert_eq!(dto.genres, vec!["Science Fiction"]);
        assert_eq!(dto.trailer_key.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_toggle_requires_login_before_input_checks() {
        let mut store = MockFavoritesStore::new();
        store.expect_put().times(0);
        let state = state_with(Arc::new(store), MockMovieCatalog::new());
        let view = state.mount_view();

        let err = toggle_favorite(&state, &view, None).await.unwrap_err();
        assert_eq!(err.error_type, ErrorType::AuthRequired);
        assert_eq!(err.message, AUTH_REQUIRED_MESSAGE);
        assert_eq!(err.redirect.as_deref(), Some("/login"));
    }

    #[tokio::test]
    async fn test_toggle_round_trip_notices() {
        let state = state_with(sqlite_store(), MockMovieCatalog::new());
        state.session.sign_in(CurrentUser::new("u1")).unwrap();
        let view = state.mount_view();

        let added = toggle_favorite(&state, &view, Some(dune_dto())).await.unwrap();
        assert_eq!(added.notice, "Added \"Dune\" to favorites!");
        assert!(is_favorite(&state, 42).await);

        let removed = toggle_favorite(&state, &view, Some(dune_dto())).await.unwrap();
        assert_eq!(removed.notice, "Removed \"Dune\" from favorites.");
        assert!(!is_favorite(&state, 42).await);
    }

    #[tokio::test]
    async fn test_toggle_with_missing_id_is_validation_error() {
        let state = state_with(sqlite_store(), MockMovieCatalog::new());
        state.session.sign_in(CurrentUser::new("u1")).unwrap();
        let view = state.mount_view();

        let dto = MovieDto {
            id: None,
            ..dune_dto()
        };
        let err = toggle_favorite(&state, &view, Some(dto)).await.unwrap_err();
        assert_eq!(err.error_type, ErrorType::Validation);
    }

    #[tokio::test]
    async fn test_toggle_write_failure_asks_to_retry() {
        let mut store = MockFavoritesStore::new();
        store
            .expect_put()
            .returning(|_, _| Err(AppError::Other("quota exceeded".to_string())));
        let state = state_with(Arc::new(store), MockMovieCatalog::new());
        state.session.sign_in(CurrentUser::new("u1")).unwrap();
        let view = state.mount_view();

        let err = toggle_favorite(&state, &view, Some(dune_dto())).await.unwrap_err();
        assert_eq!(err.message, TRY_AGAIN_MESSAGE);
    }

    #[tokio::test]
    async fn test_favorites_page_and_remove() {
        let store = sqlite_store();
        for id in [10, 20] {
            store
                .put("u1", &FavoriteRecord::snapshot(&Movie::new(id, format!("Movie {}", id))))
                .await
                .unwrap();
        }
        let state = state_with(store, MockMovieCatalog::new());
        state.session.sign_in(CurrentUser::new("u1")).unwrap();

        let view = state.mount_view();
        let page = favorites_page(&view).await.unwrap();
        assert_eq!(page.count, 2);
        assert!(page.movies.iter().all(|m| m.is_favorite));

        remove_favorite(&state, 10).await.unwrap();
        let page = favorites_page(&view).await.unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.movies[0].id, Some(20));
    }

    #[tokio::test]
    async fn test_favorites_commands_work_without_a_catalog() {
        let store = sqlite_store();
        store.put("u1", &FavoriteRecord::snapshot(&Movie::new(42, "Dune"))).await.unwrap();
        let mut state = state_with(store, MockMovieCatalog::new());
        state.catalog = None;
        state.session.sign_in(CurrentUser::new("u1")).unwrap();
        let view = state.mount_view();

        assert_eq!(favorites_page(&view).await.unwrap().count, 1);
        remove_favorite(&state, 42).await.unwrap();
        assert!(!is_favorite(&state, 42).await);

        let err = browse_category(&state, &view, "popular", 1).await.unwrap_err();
        assert_eq!(err.error_type, ErrorType::Internal);
    }

    #[tokio::test]
    async fn test_signed_out_reads() {
        let state = state_with(sqlite_store(), MockMovieCatalog::new());
        assert!(!is_favorite(&state, 42).await);

        let err = remove_favorite(&state, 42).await.unwrap_err();
        assert_eq!(err.error_type, ErrorType::AuthRequired);
    }
}
