// src/application/state.rs

use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::events::EventBus;
use crate::integrations::MovieCatalog;
use crate::services::{FavoritesGateway, FavoritesView, SessionContext};

/// Application state shared by all commands.
/// All fields are Arc-wrapped or cheaply cloneable.
/// Built once in main.rs.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub session: SessionContext,
    pub gateway: Arc<FavoritesGateway>,
    /// Absent when the running command never talks to the catalog
    pub catalog: Option<Arc<dyn MovieCatalog>>,
    pub config: AppConfig,
}

impl AppState {
    /// A freshly mounted view bound to the current session
    pub fn mount_view(&self) -> FavoritesView {
        FavoritesView::new(self.session.clone(), self.gateway.clone())
            .with_hydration_concurrency(self.config.hydration_concurrency)
    }

    pub fn catalog(&self) -> AppResult<&dyn MovieCatalog> {
        self.catalog
            .as_deref()
            .ok_or_else(|| AppError::Config("TMDB_API_KEY is not set".to_string()))
    }
}
