//! # TMDB Integration Module
//!
//! HTTP client for the parts of the TMDB Web API the movie browser needs.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, Detail Flow)
//!          ↓
//! TMDB Integration Layer
//!     ├── Movie Details   (GET /movie/{id})
//!     └── Movie Lists     (GET /movie/top_rated, GET /movie/popular)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! Authentication is a plain API key sent as the `api_key` query parameter.
//! Non-2xx responses are turned into [`DataError::ApiError`] carrying the
//! status code and the response body. Requests are never retried: a failed
//! call surfaces to the caller immediately.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let client = TmdbClient::from_env();
//! let page = client.get_movie_list(MovieList::TopRated, 1).await?;
//! let detail = client.get_movie_detail(550).await?;
//! ```

mod movies;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{config, data::DataError};

pub use movies::MovieList;

pub struct TmdbClient {
    client: Client,
    api_url: String,
    api_key: Option<String>,
    language: String,
}

impl TmdbClient {
    pub fn new(
        client: Client,
        api_url: String,
        api_key: Option<String>,
        language: String,
    ) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
            language,
        }
    }

    /// Builds a client from `TMDB_API_URL`, `TMDB_API_KEY` and `TMDB_LANGUAGE`.
    ///
    /// A missing API key is not an error here; every request made without
    /// one fails with [`DataError::ConfigError`] instead.
    pub fn from_env() -> Self {
        Self::new(
            Client::new(),
            config::tmdb_apiurl(),
            config::tmdb_api_key().ok(),
            config::tmdb_language(),
        )
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, DataError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(DataError::ConfigError("TMDB_API_KEY must be set".to_string()));
        };

        let response = self
            .client
            .get(self.url(path))
            .query(&[
                ("api_key", api_key),
                ("language", self.language.as_str()),
            ])
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DataError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
