use std::fmt;

use async_trait::async_trait;

use crate::{
    data::{DataError, RemoteSource},
    types::{MovieDetailResponse, MovieListPage},
};

use super::TmdbClient;

/// The movie lists TMDB exposes as paged endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieList {
    TopRated,
    Popular,
}

impl MovieList {
    fn path(&self) -> &'static str {
        match self {
            MovieList::TopRated => "/movie/top_rated",
            MovieList::Popular => "/movie/popular",
        }
    }
}

impl fmt::Display for MovieList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovieList::TopRated => write!(f, "top rated"),
            MovieList::Popular => write!(f, "popular"),
        }
    }
}

impl TmdbClient {
    /// Retrieves one page of a movie list.
    ///
    /// `page` is 1-based; TMDB rejects pages outside `1..=500` with a 422
    /// which is returned as [`DataError::ApiError`].
    pub async fn get_movie_list(
        &self,
        list: MovieList,
        page: u32,
    ) -> Result<MovieListPage, DataError> {
        self.get_json(list.path(), &[("page", page.to_string())])
            .await
    }

    /// GET /movie/{movie_id}
    pub async fn get_movie_detail(&self, movie_id: u32) -> Result<MovieDetailResponse, DataError> {
        self.get_json(&format!("/movie/{}", movie_id), &[]).await
    }
}

#[async_trait]
impl RemoteSource for TmdbClient {
    async fn fetch_movie_detail(&self, movie_id: u32) -> Result<MovieDetailResponse, DataError> {
        self.get_movie_detail(movie_id).await
    }
}
