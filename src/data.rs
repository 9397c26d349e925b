//! Contracts between the detail flow and its data sources.
//!
//! The presenter only sees these two traits. [`crate::management::MovieDetailManager`]
//! implements [`LocalStore`] on top of a JSON cache file and
//! [`crate::tmdb::TmdbClient`] implements [`RemoteSource`] on top of the TMDB
//! Web API. Tests substitute in-memory fakes.

use std::{fmt, io};

use async_trait::async_trait;

use crate::types::{MovieDetail, MovieDetailResponse};

#[derive(Debug)]
pub enum DataError {
    IoError(io::Error),
    SerdeError(serde_json::Error),
    HttpError(reqwest::Error),
    ApiError { status: u16, message: String },
    NotFound(u32),
    ConfigError(String),
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::IoError(e) => write!(f, "I/O error: {}", e),
            DataError::SerdeError(e) => write!(f, "Malformed data: {}", e),
            DataError::HttpError(e) => write!(f, "Request failed: {}", e),
            DataError::ApiError { status, message } => {
                write!(f, "TMDB responded with {}: {}", status, message)
            }
            DataError::NotFound(id) => write!(f, "Movie {} is not in the local store", id),
            DataError::ConfigError(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::IoError(e) => Some(e),
            DataError::SerdeError(e) => Some(e),
            DataError::HttpError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for DataError {
    fn from(err: io::Error) -> Self {
        DataError::IoError(err)
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::SerdeError(err)
    }
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        DataError::HttpError(err)
    }
}

/// On-device cache of movie details.
#[async_trait]
pub trait LocalStore: Send + Sync {
    /// `Ok(None)` means the movie was never cached; it is not an error.
    async fn fetch_movie_detail(&self, movie_id: u32) -> Result<Option<MovieDetail>, DataError>;

    async fn add_movie_detail(&self, detail: MovieDetail) -> Result<(), DataError>;

    /// Fails with [`DataError::NotFound`] when `movie_id` is not cached.
    async fn update_favorite(&self, movie_id: u32, favorite: bool) -> Result<(), DataError>;
}

/// Authoritative movie data.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    async fn fetch_movie_detail(&self, movie_id: u32) -> Result<MovieDetailResponse, DataError>;
}
