//! Upsert and read tests.

use super::movie;
use crate::MovieStore;
use tempfile::tempdir;

#[tokio::test]
async fn insert_then_load_orders_by_popularity() {
    let store = MovieStore::in_memory().await.unwrap();

    let written = store
        .insert(vec![
            movie("348", "Alien", 40.0),
            movie("679", "Aliens", 55.5),
            movie("8077", "Alien 3", 12.0),
        ])
        .await
        .unwrap();

    assert_eq!(written, 3);
    let titles: Vec<_> = store
        .load_movies()
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.title)
        .collect();
    assert_eq!(titles, vec!["Aliens", "Alien", "Alien 3"]);
}

#[tokio::test]
async fn equal_popularity_falls_back_to_title() {
    let store = MovieStore::in_memory().await.unwrap();
    store
        .insert(vec![movie("2", "Heat", 10.0), movie("1", "Brazil", 10.0)])
        .await
        .unwrap();

    let titles: Vec<_> = store
        .load_movies()
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.title)
        .collect();
    assert_eq!(titles, vec!["Brazil", "Heat"]);
}

#[tokio::test]
async fn insert_upserts_by_id() {
    let store = MovieStore::in_memory().await.unwrap();
    store.insert(vec![movie("348", "Alien", 40.0)]).await.unwrap();

    let mut updated = movie("348", "Alien (Director's Cut)", 41.0);
    updated.poster_url = None;
    store.insert(vec![updated.clone()]).await.unwrap();

    assert_eq!(store.count().await.unwrap(), 1);
    assert_eq!(store.load_movie("348").await.unwrap(), Some(updated));
}

#[tokio::test]
async fn missing_movie_is_none() {
    let store = MovieStore::in_memory().await.unwrap();
    assert_eq!(store.load_movie("nope").await.unwrap(), None);
}

#[tokio::test]
async fn empty_batch_is_a_no_op() {
    let store = MovieStore::in_memory().await.unwrap();
    assert_eq!(store.insert(Vec::new()).await.unwrap(), 0);
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn duplicate_ids_in_one_batch_keep_the_last() {
    let store = MovieStore::in_memory().await.unwrap();
    store
        .insert(vec![movie("1", "First", 1.0), movie("1", "Second", 2.0)])
        .await
        .unwrap();

    assert_eq!(store.count().await.unwrap(), 1);
    let cached = store.load_movie("1").await.unwrap().unwrap();
    assert_eq!(cached.title, "Second");
}

#[tokio::test]
async fn clear_removes_everything() {
    let store = MovieStore::in_memory().await.unwrap();
    store
        .insert(vec![movie("1", "Heat", 1.0), movie("2", "Ronin", 2.0)])
        .await
        .unwrap();

    assert_eq!(store.clear().await.unwrap(), 2);
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn data_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("movies.sqlite");

    {
        let store = MovieStore::open(&path).await.unwrap();
        store.insert(vec![movie("348", "Alien", 40.0)]).await.unwrap();
    }

    let reopened = MovieStore::open(&path).await.unwrap();
    assert_eq!(
        reopened.load_movie("348").await.unwrap(),
        Some(movie("348", "Alien", 40.0))
    );
}
