// core/src/catalog.rs

//! Catalog foods joined with the local favorite marks.

use crate::error::Result;
use crate::models::CatalogItem;
use crate::remote::FoodApi;
use crate::store::FavoriteStore;
use rand::Rng;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct CatalogRepository {
  api: Arc<dyn FoodApi>,
  favorites: FavoriteStore,
}

/// Cosmetic rating in [0, 5], two decimals.
fn display_rating<R: Rng>(rng: &mut R) -> f64 {
  (rng.gen_range(0.0..=5.0_f64) * 100.0).round() / 100.0
}

impl CatalogRepository {
  pub fn new(api: Arc<dyn FoodApi>, favorites: FavoriteStore) -> Self {
    Self { api, favorites }
  }

  pub fn favorites_store(&self) -> &FavoriteStore {
    &self.favorites
  }

  /// Every catalog food, flagged with the owner's favorites and given a fresh rating.
  #[instrument(name = "CatalogRepository::foods", skip(self), err(Display))]
  pub async fn foods(&self, owner: &str) -> Result<Vec<CatalogItem>> {
    let items = self.api.list_catalog().await?;
    let marked: HashSet<i64> = self.favorites.list(owner).await?.into_iter().map(|m| m.food_id).collect();
    let mut rng = rand::thread_rng();
    let items: Vec<CatalogItem> = items
      .into_iter()
      .map(|item| CatalogItem {
        is_favorite: marked.contains(&item.id),
        rating: display_rating(&mut rng),
        ..item
      })
      .collect();
    debug!(count = items.len(), favorites = marked.len(), "Catalog loaded.");
    Ok(items)
  }

  pub async fn favorites(&self, owner: &str) -> Result<Vec<CatalogItem>> {
    Ok(self.foods(owner).await?.into_iter().filter(|f| f.is_favorite).collect())
  }

  /// Returns whether the food is a favorite afterwards.
  pub async fn toggle_favorite(&self, food_id: i64, owner: &str) -> Result<bool> {
    self.favorites.toggle(food_id, owner).await
  }

  pub async fn clear_favorites(&self, owner: &str) -> Result<u64> {
    self.favorites.clear(owner).await
  }
}

/// Case-insensitive substring match on the name. An empty query keeps everything.
pub fn search(items: &[CatalogItem], query: &str) -> Vec<CatalogItem> {
  let needle = query.trim().to_lowercase();
  items
    .iter()
    .filter(|item| needle.is_empty() || item.name.to_lowercase().contains(&needle))
    .cloned()
    .collect()
}
