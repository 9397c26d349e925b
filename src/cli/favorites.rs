use tabled::Table;

use crate::{info, management::MovieDetailManager, utils, warning};

pub async fn favorites(search: Option<String>) {
    let store = MovieDetailManager::from_env();
    let mut favorites = match store.favorites().await {
        Ok(f) => f,
        Err(e) => {
            warning!("Failed to load favorites. Err: {}", e);
            return;
        }
    };

    if let Some(term) = search {
        let term = term.to_lowercase();
        favorites.retain(|d| d.title.to_lowercase().contains(&term));
    }

    if favorites.is_empty() {
        info!("No favorites yet. Mark one with moviecli favorite <id>.");
        return;
    }

    let table = Table::new(utils::favorite_table_rows(&favorites));
    println!("{}", table);
    match store.count().await {
        Ok(cached) => info!(
            "{} favorite(s) among {} cached movie(s) in {}",
            favorites.len(),
            cached,
            store.path().display()
        ),
        Err(_) => info!("{} favorite(s) in {}", favorites.len(), store.path().display()),
    }
}
