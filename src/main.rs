// src/main.rs
//
// moviemark command-line entry point.
// Wires the stores, services and catalog, then runs one command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use env_logger::Env;
use serde::Serialize;

use moviemark::application::commands::*;
use moviemark::application::dto::MovieDto;
use moviemark::application::{AppState, ErrorResponse};
use moviemark::config::{AppConfig, StoreBackend};
use moviemark::db::{
    create_connection_pool, get_connection, get_database_path, get_database_stats,
    initialize_database, verify_database_integrity,
};
use moviemark::domain::CurrentUser;
use moviemark::events::{EventBus, FavoriteAdded, FavoriteRemoved};
use moviemark::integrations::{FirestoreFavoritesStore, MovieCatalog, TmdbClient};
use moviemark::repositories::{FavoritesStore, SqliteFavoritesStore};
use moviemark::services::{FavoritesGateway, SessionContext};

/// MovieMark - browse movies and keep per-user favorites
#[derive(Parser)]
#[command(name = "moviemark")]
#[command(about = "Browse the movie catalog and manage favorites")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Act as this signed-in user id
    #[arg(long, global = true)]
    user: Option<String>,

    /// Display name for the signed-in user
    #[arg(long, global = true)]
    name: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List a catalog category (popular, top_rated, upcoming, now_playing, trending)
    Browse {
        #[arg(default_value = "popular")]
        category: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Search movies by title
    Search {
        query: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show one movie with cast, trailer and similar movies
    Details { id: i64 },
    /// Flip the favorite status of a movie
    Toggle { id: i64 },
    /// List the user's favorites
    Favorites,
    /// Remove a movie from the user's favorites
    Remove { id: i64 },
}

impl Commands {
    fn uses_catalog(&self) -> bool {
        !matches!(self, Commands::Favorites | Commands::Remove { .. })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let cli = Cli::parse();
    let config = AppConfig::from_env().context("Failed to read configuration")?;

    // 1. INFRASTRUCTURE
    let event_bus = Arc::new(EventBus::new());
    let store = build_store(&config, cli.user.is_some())?;
    let catalog = if cli.command.uses_catalog() {
        let client = TmdbClient::new(
            config.require_tmdb_api_key()?,
            &config.tmdb_base_url,
            config.http_timeout(),
        )?;
        Some(Arc::new(client) as Arc<dyn MovieCatalog>)
    } else {
        None
    };

    // 2. SERVICES
    let session = SessionContext::new(event_bus.clone());
    let gateway = Arc::new(FavoritesGateway::new(store, event_bus.clone()));

    // 3. EVENT HANDLER REGISTRATION
    event_bus.subscribe::<FavoriteAdded, _>(|event| {
        log::debug!("{} favorited \"{}\"", event.user_id, event.title);
    });
    event_bus.subscribe::<FavoriteRemoved, _>(|event| {
        log::debug!("{} unfavorited {}", event.user_id, event.movie_id);
    });

    // 4. APPLICATION STATE
    let state = AppState {
        event_bus,
        session,
        gateway,
        catalog,
        config,
    };

    if let Some(uid) = cli.user.as_deref() {
        let mut user = CurrentUser::new(uid);
        if let Some(name) = cli.name.as_deref() {
            user = user.with_display_name(name);
        }
        if let StoreBackend::Firestore { id_token: Some(token), .. } = &state.config.store {
            user = user.with_id_token(token.clone());
        }
        state.session.sign_in(user)?;
    }

    run(&state, cli.command).await
}

fn build_store(config: &AppConfig, signed_in: bool) -> anyhow::Result<Arc<dyn FavoritesStore>> {
    match &config.store {
        StoreBackend::Sqlite { path } => {
            let path: PathBuf = match path {
                Some(path) => path.clone(),
                None => get_database_path()?,
            };
            log::info!("Using SQLite favorites store at {}", path.display());

            let pool = create_connection_pool(&path)?;
            {
                let conn = get_connection(&pool)?;
                initialize_database(&conn)?;
                verify_database_integrity(&conn)?;
                let stats = get_database_stats(&conn)?;
                log::debug!(
                    "{} favorites from {} users, {} bytes",
                    stats.favorite_count,
                    stats.user_count,
                    stats.size_bytes
                );
            }
            Ok(Arc::new(SqliteFavoritesStore::new(Arc::new(pool))))
        }
        StoreBackend::Firestore {
            base_url,
            project_id,
            id_token,
        } => {
            log::info!("Using Firestore favorites store for project {}", project_id);
            if signed_in && id_token.is_none() {
                log::warn!("FIRESTORE_ID_TOKEN is not set, requests go out unauthenticated");
            }

            let store = FirestoreFavoritesStore::new(base_url, project_id, config.http_timeout())?;
            store.set_auth_token(id_token.clone());
            Ok(Arc::new(store))
        }
    }
}

async fn run(state: &AppState, command: Commands) -> anyhow::Result<()> {
    let view = state.mount_view();

    match command {
        Commands::Browse { category, page } => {
            print(browse_category(state, &view, &category, page).await)
        }
        Commands::Search { query, page } => print(search_movies(state, &view, &query, page).await),
        Commands::Details { id } => print(movie_details(state, &view, id).await),
        Commands::Toggle { id } => {
            // The catalog provides the snapshot that gets stored
            let details = match movie_details(state, &view, id).await {
                Ok(details) => details,
                Err(error) => return print::<()>(Err(error)),
            };
            let movie: MovieDto = details.movie;
            print(toggle_favorite(state, &view, Some(movie)).await)
        }
        Commands::Favorites => print(favorites_page(&view).await),
        Commands::Remove { id } => print(remove_favorite(state, id).await.map(|_| {
            serde_json::json!({ "removed": id })
        })),
    }
}

fn print<T: Serialize>(result: Result<T, ErrorResponse>) -> anyhow::Result<()> {
    match result {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Err(error) => {
            eprintln!("{}", serde_json::to_string_pretty(&error)?);
            Err(anyhow::anyhow!(error.message))
        }
    }
}
