use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    config,
    data::{DataError, LocalStore},
    types::MovieDetail,
};

/// JSON-file backed cache of movie details.
///
/// Every operation reads the file, applies its change and writes it back.
/// The mutex keeps concurrent read-modify-write cycles (for example a cache
/// insert racing a favorite toggle) from losing updates.
pub struct MovieDetailManager {
    path: PathBuf,
    lock: Mutex<()>,
}

impl MovieDetailManager {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    /// Store at `<data_dir>/cache/movie-details.json`.
    pub fn from_env() -> Self {
        Self::new(Self::cache_path())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub async fn all(&self) -> Result<Vec<MovieDetail>, DataError> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    pub async fn favorites(&self) -> Result<Vec<MovieDetail>, DataError> {
        let mut favorites: Vec<MovieDetail> =
            self.all().await?.into_iter().filter(|d| d.favorite).collect();
        favorites.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
        Ok(favorites)
    }

    pub async fn count(&self) -> Result<usize, DataError> {
        Ok(self.all().await?.len())
    }

    async fn load(&self) -> Result<Vec<MovieDetail>, DataError> {
        match async_fs::read_to_string(&self.path).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(DataError::IoError(e)),
        }
    }

    async fn persist(&self, details: &[MovieDetail]) -> Result<(), DataError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(details)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    fn cache_path() -> PathBuf {
        let mut path = config::data_dir();
        path.push("cache/movie-details.json");
        path
    }
}

#[async_trait]
impl LocalStore for MovieDetailManager {
    async fn fetch_movie_detail(&self, movie_id: u32) -> Result<Option<MovieDetail>, DataError> {
        let _guard = self.lock.lock().await;
        let details = self.load().await?;
        Ok(details.into_iter().find(|d| d.id == movie_id))
    }

    async fn add_movie_detail(&self, detail: MovieDetail) -> Result<(), DataError> {
        let _guard = self.lock.lock().await;
        let mut details = self.load().await?;
        match details.iter_mut().find(|d| d.id == detail.id) {
            Some(existing) => *existing = detail,
            None => details.push(detail),
        }
        self.persist(&details).await
    }

    async fn update_favorite(&self, movie_id: u32, favorite: bool) -> Result<(), DataError> {
        let _guard = self.lock.lock().await;
        let mut details = self.load().await?;
        let Some(detail) = details.iter_mut().find(|d| d.id == movie_id) else {
            return Err(DataError::NotFound(movie_id));
        };
        detail.favorite = favorite;
        self.persist(&details).await
    }
}
