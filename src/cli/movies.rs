use tabled::Table;

use crate::{
    cli::view::spinner,
    error, info,
    management::MovieDetailManager,
    tmdb::{MovieList, TmdbClient},
    utils, warning,
};

/// Prints one page of a TMDB movie list as a table.
///
/// Movies already marked as favorites in the local cache get a `*` in the
/// `fav` column. Null entries in the response are skipped.
///
/// # Example Usage
///
/// ```bash
/// moviecli top-rated
/// moviecli popular --page 3
/// ```
pub async fn movies(list: MovieList, page: Option<u32>) {
    let page_no = page.unwrap_or(1).max(1);
    let client = TmdbClient::from_env();

    let pb = spinner(format!("Fetching {} movies...", list));
    let result = client.get_movie_list(list, page_no).await;
    pb.finish_and_clear();

    let movie_page = match result {
        Ok(p) => p,
        Err(e) => error!("Cannot fetch {} movies. Err: {}", list, e),
    };

    let favorite_ids: Vec<u32> = match MovieDetailManager::from_env().favorites().await {
        Ok(favorites) => favorites.iter().map(|d| d.id).collect(),
        Err(e) => {
            warning!("Cannot read favorites from cache. Err: {}", e);
            Vec::new()
        }
    };

    let rows = utils::movie_table_rows(&movie_page.movies(), &favorite_ids);
    if rows.is_empty() {
        info!("No {} movies on page {}.", list, page_no);
        return;
    }

    println!("{}", Table::new(rows));
    info!(
        "Page {} of {} ({} movies total)",
        movie_page.page.unwrap_or(page_no),
        movie_page
            .total_pages
            .map(|p| p.to_string())
            .unwrap_or_else(|| "?".to_string()),
        movie_page
            .total_results
            .map(|r| r.to_string())
            .unwrap_or_else(|| "?".to_string()),
    );
}
