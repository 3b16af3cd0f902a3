// src/integrations/firestore/client.rs
//
// Firestore favorites store over the REST API.
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Knows the document path convention, nothing about views
// - Returns raw errors; the gateway classifies them

use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode, Url};

use super::document::{decode_record, encode_record, ListDocumentsResponse};
use crate::domain::{FavoriteRecord, MovieId};
use crate::error::{AppError, AppResult};
use crate::repositories::FavoritesStore;

const USERS_COLLECTION: &str = "users";
const FAVORITES_COLLECTION: &str = "favorites";
const LIST_PAGE_SIZE: u32 = 300;

pub struct FirestoreFavoritesStore {
    documents_root: String,
    http_client: Client,
    auth_token: RwLock<Option<String>>,
}

impl FirestoreFavoritesStore {
    pub fn new(base_url: &str, project_id: &str, timeout: Duration) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            documents_root: format!(
                "{}/projects/{}/databases/(default)/documents",
                base_url.trim_end_matches('/'),
                project_id
            ),
            http_client,
            auth_token: RwLock::new(None),
        })
    }

    /// Create a store that sends the given bearer token
    pub fn with_auth(
        base_url: &str,
        project_id: &str,
        timeout: Duration,
        token: String,
    ) -> AppResult<Self> {
        let store = Self::new(base_url, project_id, timeout)?;
        store.set_auth_token(Some(token));
        Ok(store)
    }

    /// Swap the bearer token, e.g. after the identity provider refreshed it
    pub fn set_auth_token(&self, token: Option<String>) {
        *self.auth_token.write().unwrap_or_else(|e| e.into_inner()) = token;
    }

    fn favorites_url(&self, user_id: &str) -> AppResult<Url> {
        self.url_for(&[USERS_COLLECTION, user_id, FAVORITES_COLLECTION])
    }

    fn favorite_url(&self, user_id: &str, movie_id: MovieId) -> AppResult<Url> {
        let key = movie_id.document_key();
        self.url_for(&[USERS_COLLECTION, user_id, FAVORITES_COLLECTION, &key])
    }

    /// Path segments are percent-encoded individually
    fn url_for(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = Url::parse(&self.documents_root)
            .map_err(|e| AppError::Config(format!("Invalid Firestore URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Config("Firestore URL cannot be a base".to_string()))?
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let token = self
            .auth_token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        match token {
            Some(token) => request.header(header::AUTHORIZATION, format!("Bearer {}", token)),
            None => request,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder, what: &str) -> AppResult<reqwest::Response> {
        self.authorize(request)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| AppError::Other(format!("Firestore {} request failed: {}", what, e)))
    }

    fn status_error(status: StatusCode, what: &str) -> AppError {
        AppError::Other(format!("Firestore {} returned status: {}", what, status))
    }
}

#[async_trait]
impl FavoritesStore for FirestoreFavoritesStore {
    async fn put(&self, user_id: &str, record: &FavoriteRecord) -> AppResult<()> {
        let url = self.favorite_url(user_id, record.id)?;
        let body = encode_record(record);

        let response = self.send(self.http_client.patch(url).json(&body), "write").await?;
        if !response.status().is_success() {
            return Err(Self::status_error(response.status(), "write"));
        }
        Ok(())
    }

    async fn delete(&self, user_id: &str, movie_id: MovieId) -> AppResult<()> {
        let url = self.favorite_url(user_id, movie_id)?;

        let response = self.send(self.http_client.delete(url), "delete").await?;
        let status = response.status();
        if status.is_success() || status == StatusCode::NOT_FOUND {
            return Ok(());
        }
        Err(Self::status_error(status, "delete"))
    }

    async fn exists(&self, user_id: &str, movie_id: MovieId) -> AppResult<bool> {
        let url = self.favorite_url(user_id, movie_id)?;

        let response = self.send(self.http_client.get(url), "lookup").await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => Err(Self::status_error(status, "lookup")),
        }
    }

    async fn list(&self, user_id: &str) -> AppResult<Vec<FavoriteRecord>> {
        let mut records = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut url = self.favorites_url(user_id)?;
            {
                let mut query = url.query_pairs_mut();
                query.append_pair("pageSize", &LIST_PAGE_SIZE.to_string());
                if let Some(token) = &page_token {
                    query.append_pair("pageToken", token);
                }
            }

            let response = self.send(self.http_client.get(url), "listing").await?;
            if !response.status().is_success() {
                return Err(Self::status_error(response.status(), "listing"));
            }

            let page: ListDocumentsResponse = response.json().await.map_err(|e| {
                AppError::Other(format!("Failed to parse Firestore listing: {}", e))
            })?;

            for document in &page.documents {
                match decode_record(document) {
                    Ok(record) => records.push(record),
                    Err(e) => log::warn!("Skipping unreadable favorite document: {}", e),
                }
            }

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(records)
    }
}

impl std::fmt::Debug for FirestoreFavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirestoreFavoritesStore")
            .field("documents_root", &self.documents_root)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> FirestoreFavoritesStore {
        FirestoreFavoritesStore::new(
            "https://firestore.googleapis.com/v1/",
            "moviemark-dev",
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_document_path_convention() {
        let url = store().favorite_url("u1", MovieId(42)).unwrap();
        assert_eq!(
            url.as_str(),
            "https://firestore.googleapis.com/v1/projects/moviemark-dev/databases/(default)/documents/users/u1/favorites/42"
        );
    }

    #[test]
    fn test_user_id_is_percent_encoded() {
        let url = store().favorites_url("a/b c").unwrap();
        assert!(url.path().ends_with("/users/a%2Fb%20c/favorites"));
    }

    #[test]
    fn test_token_is_not_debug_printed() {
        let store = FirestoreFavoritesStore::with_auth(
            "https://firestore.googleapis.com/v1",
            "p",
            Duration::from_secs(5),
            "secret-token".to_string(),
        )
        .unwrap();
        assert!(!format!("{:?}", store).contains("secret-token"));
    }
}
