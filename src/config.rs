//! Configuration management for the movie browser.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::Res;

pub const DEFAULT_TMDB_API_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_TMDB_IMAGE_URL: &str = "https://image.tmdb.org/t/p/w500";
pub const DEFAULT_TMDB_LANGUAGE: &str = "en-US";
pub const TMDB_WEB_URL: &str = "https://www.themoviedb.org";

/// Loads environment variables from the `.env` file in the data directory.
///
/// Creates the data directory if it doesn't exist. The file is looked up at:
/// - Linux: `~/.local/share/moviecli/.env`
/// - macOS: `~/Library/Application Support/moviecli/.env`
/// - Windows: `%LOCALAPPDATA%/moviecli/.env`
///
/// # Errors
///
/// A missing `.env` file is fine. Fails if the directory cannot be created
/// or an existing `.env` file cannot be read or parsed. Variables already present in the process environment are
/// never overwritten.
pub async fn load_env() -> Res<()> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path)?;
    }
    Ok(())
}

/// Returns the application data directory.
///
/// `MOVIECLI_DATA_DIR` wins when set, otherwise `<data_local_dir>/moviecli`.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = env::var("MOVIECLI_DATA_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("moviecli");
    path
}

/// Returns the TMDB API key.
///
/// # Errors
///
/// Fails when `TMDB_API_KEY` is unset or blank.
pub fn tmdb_api_key() -> Result<String, String> {
    match env::var("TMDB_API_KEY") {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err("TMDB_API_KEY must be set".to_string()),
    }
}

/// Returns the TMDB Web API base URL, e.g. `https://api.themoviedb.org/3`.
pub fn tmdb_apiurl() -> String {
    env_or("TMDB_API_URL", DEFAULT_TMDB_API_URL)
}

/// Returns the base URL poster paths are appended to.
pub fn tmdb_image_url() -> String {
    env_or("TMDB_IMAGE_URL", DEFAULT_TMDB_IMAGE_URL)
}

/// Returns the language requested from TMDB, e.g. `en-US`.
pub fn tmdb_language() -> String {
    env_or("TMDB_LANGUAGE", DEFAULT_TMDB_LANGUAGE)
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
