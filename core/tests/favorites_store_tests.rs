// core/tests/favorites_store_tests.rs
mod common;

use common::*;
use eatzy::catalog::CatalogRepository;
use eatzy::store::FavoriteStore;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn toggle_adds_then_removes_a_mark() {
  setup_tracing();
  let store = FavoriteStore::in_memory().await.unwrap();

  assert!(store.toggle(2, OWNER).await.unwrap());
  let mark = store.find(2, OWNER).await.unwrap().expect("mark stored");
  assert_eq!(mark.food_id, 2);
  assert_eq!(mark.owner, OWNER);

  assert!(!store.toggle(2, OWNER).await.unwrap());
  assert!(store.find(2, OWNER).await.unwrap().is_none());
}

#[tokio::test]
#[serial]
async fn marks_are_kept_per_owner() {
  setup_tracing();
  let store = FavoriteStore::in_memory().await.unwrap();
  store.toggle(1, OWNER).await.unwrap();
  store.toggle(3, OWNER).await.unwrap();
  store.toggle(1, "someone_else").await.unwrap();

  let mine: Vec<i64> = store.list(OWNER).await.unwrap().into_iter().map(|m| m.food_id).collect();
  assert_eq!(mine, vec![1, 3]);

  assert_eq!(store.clear(OWNER).await.unwrap(), 2);
  assert!(store.list(OWNER).await.unwrap().is_empty());
  assert_eq!(store.list("someone_else").await.unwrap().len(), 1);
}

#[tokio::test]
#[serial]
async fn schema_can_be_applied_twice() {
  setup_tracing();
  let store = FavoriteStore::in_memory().await.unwrap();
  store.toggle(4, OWNER).await.unwrap();

  store.init_schema().await.unwrap();

  assert_eq!(store.list(OWNER).await.unwrap().len(), 1);
}

#[tokio::test]
#[serial]
async fn catalog_flags_favorites_and_filters_them() {
  setup_tracing();
  let api = RecordingFoodApi::new();
  let store = FavoriteStore::in_memory().await.unwrap();
  let catalog = CatalogRepository::new(api.clone(), store);

  assert!(catalog.toggle_favorite(3, OWNER).await.unwrap());

  let foods = catalog.foods(OWNER).await.unwrap();
  assert_eq!(foods.len(), sample_catalog().len());
  let flagged: Vec<&str> = foods.iter().filter(|f| f.is_favorite).map(|f| f.name.as_str()).collect();
  assert_eq!(flagged, vec!["Kebab"]);
  assert!(foods.iter().all(|f| (0.0..=5.0).contains(&f.rating)));

  let favorites = catalog.favorites(OWNER).await.unwrap();
  assert_eq!(favorites.len(), 1);
  assert_eq!(favorites[0].id, 3);

  assert_eq!(catalog.clear_favorites(OWNER).await.unwrap(), 1);
  assert!(catalog.favorites(OWNER).await.unwrap().is_empty());
}
