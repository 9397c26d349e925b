use chrono::Utc;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One page of a TMDB movie list (`/movie/top_rated`, `/movie/popular`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovieListPage {
    pub page: Option<u32>,
    pub total_pages: Option<u32>,
    pub total_results: Option<u32>,
    pub results: Option<Vec<Option<MovieSummary>>>,
}

impl MovieListPage {
    /// Returns the non-null entries in their original order.
    pub fn movies(&self) -> Vec<MovieSummary> {
        self.results
            .as_ref()
            .map(|r| r.iter().flatten().cloned().collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: u32,
    pub title: Option<String>,
    pub poster_path: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub favorite: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: Option<String>,
}

/// Response of `GET /movie/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetailResponse {
    pub id: u32,
    pub title: Option<String>,
    pub poster_path: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u32>,
    pub runtime: Option<u32>,
    pub tagline: Option<String>,
    pub genres: Option<Vec<Genre>>,
}

/// A movie detail as kept in the local store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: u32,
    pub title: String,
    pub poster_path: Option<String>,
    pub overview: String,
    pub release_date: String,
    pub vote_average: f64,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub cached_at: i64,
}

impl From<MovieDetailResponse> for MovieDetail {
    fn from(res: MovieDetailResponse) -> Self {
        MovieDetail {
            id: res.id,
            title: res.title.unwrap_or_default(),
            poster_path: res.poster_path,
            overview: res.overview.unwrap_or_default(),
            release_date: res.release_date.unwrap_or_default(),
            vote_average: res.vote_average.unwrap_or(0.0),
            favorite: false,
            cached_at: Utc::now().timestamp(),
        }
    }
}

#[derive(Tabled)]
pub struct MovieTableRow {
    pub id: u32,
    pub title: String,
    pub year: String,
    pub rating: String,
    #[tabled(rename = "fav")]
    pub favorite: String,
}

#[derive(Tabled)]
pub struct DetailTableRow {
    pub field: String,
    pub value: String,
}
