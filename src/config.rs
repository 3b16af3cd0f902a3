// src/config.rs
//
// Runtime configuration
//
// Everything is read from the environment. The binary loads a `.env`
// file first, so local setups can keep keys out of the shell.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AppError, AppResult};

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";
pub const DEFAULT_HYDRATION_CONCURRENCY: usize = 8;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Which favorites store backend to talk to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Local SQLite file; `None` means the default data directory
    Sqlite { path: Option<PathBuf> },
    /// Remote document store
    Firestore {
        base_url: String,
        project_id: String,
        id_token: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub tmdb_api_key: Option<String>,
    pub tmdb_base_url: String,
    pub store: StoreBackend,
    /// Max concurrent favorite lookups while hydrating a view
    pub hydration_concurrency: usize,
    pub http_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tmdb_api_key: None,
            tmdb_base_url: DEFAULT_TMDB_BASE_URL.to_string(),
            store: StoreBackend::Sqlite { path: None },
            hydration_concurrency: DEFAULT_HYDRATION_CONCURRENCY,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Build the configuration from process environment variables
    pub fn from_env() -> AppResult<Self> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(&vars)
    }

    /// Build the configuration from an explicit variable map
    ///
    /// Recognized keys:
    /// - `TMDB_API_KEY`, `TMDB_BASE_URL`
    /// - `MOVIEMARK_STORE` (`sqlite` | `firestore`)
    /// - `MOVIEMARK_DB_PATH`
    /// - `FIRESTORE_PROJECT_ID`, `FIRESTORE_BASE_URL`, `FIRESTORE_ID_TOKEN`
    /// - `MOVIEMARK_HYDRATION_CONCURRENCY`, `MOVIEMARK_HTTP_TIMEOUT_SECS`
    pub fn from_vars(vars: &HashMap<String, String>) -> AppResult<Self> {
        let get = |key: &str| {
            vars.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = AppConfig {
            tmdb_api_key: get("TMDB_API_KEY"),
            ..AppConfig::default()
        };

        if let Some(url) = get("TMDB_BASE_URL") {
            config.tmdb_base_url = url.trim_end_matches('/').to_string();
        }

        let backend = get("MOVIEMARK_STORE").unwrap_or_else(|| "sqlite".to_string());
        config.store = match backend.to_lowercase().as_str() {
            "sqlite" => StoreBackend::Sqlite {
                path: get("MOVIEMARK_DB_PATH").map(PathBuf::from),
            },
            "firestore" => {
                let project_id = get("FIRESTORE_PROJECT_ID").ok_or_else(|| {
                    AppError::Config(
                        "FIRESTORE_PROJECT_ID is required for the firestore store".to_string(),
                    )
                })?;
                StoreBackend::Firestore {
                    base_url: get("FIRESTORE_BASE_URL")
                        .unwrap_or_else(|| DEFAULT_FIRESTORE_BASE_URL.to_string()),
                    project_id,
                    id_token: get("FIRESTORE_ID_TOKEN"),
                }
            }
            other => {
                return Err(AppError::Config(format!(
                    "Unknown favorites store '{}', expected 'sqlite' or 'firestore'",
                    other
                )))
            }
        };

        if let Some(raw) = get("MOVIEMARK_HYDRATION_CONCURRENCY") {
            let value: usize = raw.parse().map_err(|_| {
                AppError::Config(format!("Invalid MOVIEMARK_HYDRATION_CONCURRENCY: {}", raw))
            })?;
            config.hydration_concurrency = value.max(1);
        }

        if let Some(raw) = get("MOVIEMARK_HTTP_TIMEOUT_SECS") {
            config.http_timeout_secs = raw.parse().map_err(|_| {
                AppError::Config(format!("Invalid MOVIEMARK_HTTP_TIMEOUT_SECS: {}", raw))
            })?;
        }

        Ok(config)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// The TMDB key, required by anything touching the catalog
    pub fn require_tmdb_api_key(&self) -> AppResult<&str> {
        self.tmdb_api_key
            .as_deref()
            .ok_or_else(|| AppError::Config("TMDB_API_KEY is not set".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_vars(&HashMap::new()).unwrap();
        assert_eq!(config.tmdb_base_url, DEFAULT_TMDB_BASE_URL);
        assert_eq!(config.store, StoreBackend::Sqlite { path: None });
        assert_eq!(config.hydration_concurrency, DEFAULT_HYDRATION_CONCURRENCY);
        assert!(config.require_tmdb_api_key().is_err());
    }

    #[test]
    fn test_firestore_requires_project() {
        let result = AppConfig::from_vars(&vars(&[("MOVIEMARK_STORE", "firestore")]));
        assert!(matches!(result, Err(AppError::Config(_))));

        let config = AppConfig::from_vars(&vars(&[
            ("MOVIEMARK_STORE", "firestore"),
            ("FIRESTORE_PROJECT_ID", "moviemark-dev"),
        ]))
        .unwrap();
        match config.store {
            StoreBackend::Firestore { project_id, base_url, id_token } => {
                assert_eq!(project_id, "moviemark-dev");
                assert_eq!(base_url, DEFAULT_FIRESTORE_BASE_URL);
                assert!(id_token.is_none());
            }
            other => panic!("unexpected backend: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(AppConfig::from_vars(&vars(&[("MOVIEMARK_STORE", "redis")])).is_err());
        assert!(
            AppConfig::from_vars(&vars(&[("MOVIEMARK_HYDRATION_CONCURRENCY", "lots")])).is_err()
        );
    }

    #[test]
    fn test_concurrency_floor_is_one() {
        let config =
            AppConfig::from_vars(&vars(&[("MOVIEMARK_HYDRATION_CONCURRENCY", "0")])).unwrap();
        assert_eq!(config.hydration_concurrency, 1);
    }
}
