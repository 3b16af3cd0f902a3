// src/error/types.rs
use crate::domain::{DomainError, MovieId};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// A favorite-affecting action was attempted without a signed-in user
    #[error("Authentication required")]
    AuthRequired,

    /// Malformed input reached a favorite operation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The favorites store rejected or failed to complete a write
    #[error("Favorites write failed: {0}")]
    DataWrite(String),

    /// The favorites store failed to answer a read
    #[error("Favorites read failed: {0}")]
    DataRead(String),

    /// A toggle for the same movie is already in flight in this view
    #[error("Toggle already in progress for movie {0}")]
    ToggleInFlight(MovieId),

    /// The view was unmounted before the action started
    #[error("View is no longer mounted")]
    ViewUnmounted,

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl AppError {
    /// Whether re-issuing the same operation may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::DataWrite(_)
                | AppError::DataRead(_)
                | AppError::ToggleInFlight(_)
                | AppError::Catalog(_)
                | AppError::Http(_)
                | AppError::Pool(_)
        )
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Other(format!("Blocking task failed: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;
