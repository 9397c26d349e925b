use moviecli::{
    data::{DataError, LocalStore},
    management::MovieDetailManager,
    types::MovieDetail,
};
use tempfile::TempDir;

fn create_test_detail(id: u32, title: &str, favorite: bool) -> MovieDetail {
    MovieDetail {
        id,
        title: title.to_string(),
        poster_path: None,
        overview: format!("Overview of {}", title),
        release_date: "2010-07-16".to_string(),
        vote_average: 8.0,
        favorite,
        cached_at: 1_700_000_000,
    }
}

fn store_in(dir: &TempDir) -> MovieDetailManager {
    MovieDetailManager::new(dir.path().join("cache/movie-details.json"))
}

#[tokio::test]
async fn test_missing_file_is_an_empty_store() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    assert_eq!(store.fetch_movie_detail(1).await.unwrap(), None);
    assert_eq!(store.count().await.unwrap(), 0);
    assert!(store.favorites().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_add_then_fetch_survives_a_new_instance() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let detail = create_test_detail(27205, "Inception", false);

    store.add_movie_detail(detail.clone()).await.unwrap();
    assert!(store.path().is_file());

    let reopened = store_in(&dir);
    assert_eq!(
        reopened.fetch_movie_detail(27205).await.unwrap(),
        Some(detail)
    );
    assert_eq!(reopened.fetch_movie_detail(1).await.unwrap(), None);
}

#[tokio::test]
async fn test_add_replaces_record_with_same_id() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store
        .add_movie_detail(create_test_detail(1, "Old title", false))
        .await
        .unwrap();
    store
        .add_movie_detail(create_test_detail(1, "New title", false))
        .await
        .unwrap();

    assert_eq!(store.count().await.unwrap(), 1);
    assert_eq!(
        store.fetch_movie_detail(1).await.unwrap().unwrap().title,
        "New title"
    );
}

#[tokio::test]
async fn test_update_favorite_only_touches_the_flag() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let detail = create_test_detail(550, "Fight Club", false);
    store.add_movie_detail(detail.clone()).await.unwrap();

    store.update_favorite(550, true).await.unwrap();

    let stored = store.fetch_movie_detail(550).await.unwrap().unwrap();
    assert!(stored.favorite);
    assert_eq!(stored.id, detail.id);
    assert_eq!(stored.title, detail.title);
    assert_eq!(stored.overview, detail.overview);

    store.update_favorite(550, false).await.unwrap();
    assert!(!store.fetch_movie_detail(550).await.unwrap().unwrap().favorite);
}

#[tokio::test]
async fn test_update_favorite_of_unknown_movie_fails() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store
        .add_movie_detail(create_test_detail(1, "Known", false))
        .await
        .unwrap();

    let err = store.update_favorite(2, true).await.unwrap_err();
    assert!(matches!(err, DataError::NotFound(2)));
    assert!(store.favorites().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_favorites_are_filtered_and_sorted_by_title() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    for detail in [
        create_test_detail(1, "zodiac", true),
        create_test_detail(2, "Amelie", true),
        create_test_detail(3, "Not liked", false),
    ] {
        store.add_movie_detail(detail).await.unwrap();
    }

    let titles: Vec<String> = store
        .favorites()
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.title)
        .collect();
    assert_eq!(titles, vec!["Amelie", "zodiac"]);
}

#[tokio::test]
async fn test_corrupt_cache_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.path(), "{ not json").unwrap();

    let err = store.fetch_movie_detail(1).await.unwrap_err();
    assert!(matches!(err, DataError::SerdeError(_)));
}

#[tokio::test]
async fn test_concurrent_writes_are_not_lost() {
    let dir = TempDir::new().unwrap();
    let store = std::sync::Arc::new(store_in(&dir));

    let mut handles = Vec::new();
    for id in 1..=10 {
        let store = std::sync::Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store
                .add_movie_detail(create_test_detail(id, &format!("Movie {}", id), false))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(store.count().await.unwrap(), 10);
}
