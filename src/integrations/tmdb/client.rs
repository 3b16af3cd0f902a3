// src/integrations/tmdb/client.rs
//
// TMDB v3 catalog client
//
// ARCHITECTURE:
// - REST client for the movie catalog
// - Read-only: listing, search, detail
// - Used by the application layer through the MovieCatalog trait
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Never touches the favorites store
// - Every transport or decode failure becomes AppError::Catalog

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Url};
use serde::de::DeserializeOwned;

use super::models::{MovieCategory, MovieDetails, MoviePage};
use crate::domain::MovieId;
use crate::error::{AppError, AppResult};

/// Read access to the movie catalog
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    async fn movies_by_category(&self, category: MovieCategory, page: u32) -> AppResult<MoviePage>;

    /// A blank query lists popular movies instead
    async fn search_movies(&self, query: &str, page: u32) -> AppResult<MoviePage>;

    async fn movie_details(&self, id: MovieId) -> AppResult<MovieDetails>;
}

pub struct TmdbClient {
    base_url: String,
    api_key: String,
    http_client: Client,
}

impl TmdbClient {
    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> AppResult<Self> {
        if api_key.trim().is_empty() {
            return Err(AppError::Config("TMDB API key is empty".to_string()));
        }

        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            http_client,
        })
    }

    fn endpoint_url(&self, path: &str, params: &[(&str, &str)]) -> AppResult<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| AppError::Config(format!("Invalid TMDB URL: {}", e)))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("api_key", &self.api_key);
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> AppResult<T> {
        log::debug!("TMDB request: {}", url.path());

        let response = self
            .http_client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| AppError::Catalog(format!("TMDB request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Catalog(format!(
                "TMDB returned status: {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Catalog(format!("Failed to parse TMDB response: {}", e)))
    }
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    async fn movies_by_category(&self, category: MovieCategory, page: u32) -> AppResult<MoviePage> {
        let page = page.max(1).to_string();
        let url = self.endpoint_url(&category.endpoint(), &[("page", &page)])?;
        self.get_json(url).await
    }

    async fn search_movies(&self, query: &str, page: u32) -> AppResult<MoviePage> {
        let query = query.trim();
        if query.is_empty() {
            return self.movies_by_category(MovieCategory::Popular, page).await;
        }

        let page = page.max(1).to_string();
        let url = self.endpoint_url("/search/movie", &[("query", query), ("page", &page)])?;
        self.get_json(url).await
    }

    async fn movie_details(&self, id: MovieId) -> AppResult<MovieDetails> {
        let url = self.endpoint_url(
            &format!("/movie/{}", id),
            &[("append_to_response", "videos,credits,similar")],
        )?;
        self.get_json(url).await
    }
}

impl std::fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TmdbClient {
        TmdbClient::new("key123", "https://api.themoviedb.org/3/", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_client_rejects_empty_key() {
        assert!(TmdbClient::new("  ", "https://api.themoviedb.org/3", Duration::from_secs(5)).is_err());
    }

    #[test]
    fn test_category_url() {
        let url = client()
            .endpoint_url(&MovieCategory::NowPlaying.endpoint(), &[("page", "2")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.themoviedb.org/3/movie/now_playing?api_key=key123&page=2"
        );
    }

    #[test]
    fn test_search_query_is_encoded() {
        let url = client()
            .endpoint_url("/search/movie", &[("query", "blade runner & co")])
            .unwrap();
        assert!(url.as_str().contains("query=blade+runner+%26+co"));
    }

    #[test]
    fn test_api_key_not_debug_printed() {
        assert!(!format!("{:?}", client()).contains("key123"));
    }
}
