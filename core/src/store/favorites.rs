// core/src/store/favorites.rs

//! Favorite-food marks in a local SQLite database.

use super::FAVORITES_SCHEMA;
use crate::error::Result;
use crate::models::FavoriteMark;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone)]
pub struct FavoriteStore {
  pool: SqlitePool,
}

impl FavoriteStore {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }

  /// Opens (creating if needed) the database at `url` and applies the schema.
  #[instrument(name = "FavoriteStore::connect", err(Display))]
  pub async fn connect(url: &str) -> Result<Self> {
    let opts = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().max_connections(4).connect_with(opts).await?;
    let store = Self::new(pool);
    store.init_schema().await?;
    info!("Favorites store ready.");
    Ok(store)
  }

  /// A private in-memory database. One connection, so every query sees the same data.
  pub async fn in_memory() -> Result<Self> {
    let opts = SqliteConnectOptions::new().filename(":memory:").create_if_missing(true);
    let pool = SqlitePoolOptions::new().max_connections(1).connect_with(opts).await?;
    let store = Self::new(pool);
    store.init_schema().await?;
    Ok(store)
  }

  pub async fn init_schema(&self) -> Result<()> {
    for stmt in FAVORITES_SCHEMA.split(';').map(str::trim).filter(|s| !s.is_empty()) {
      sqlx::query(stmt).execute(&self.pool).await?;
    }
    Ok(())
  }

  pub async fn list(&self, owner: &str) -> Result<Vec<FavoriteMark>> {
    let marks = sqlx::query_as::<_, FavoriteMark>(
      "SELECT favorite_id, yemek_id, kullanici_adi FROM favorite_foods WHERE kullanici_adi = ? ORDER BY favorite_id",
    )
    .bind(owner)
    .fetch_all(&self.pool)
    .await?;
    Ok(marks)
  }

  pub async fn find(&self, food_id: i64, owner: &str) -> Result<Option<FavoriteMark>> {
    let mark = sqlx::query_as::<_, FavoriteMark>(
      "SELECT favorite_id, yemek_id, kullanici_adi FROM favorite_foods WHERE yemek_id = ? AND kullanici_adi = ? LIMIT 1",
    )
    .bind(food_id)
    .bind(owner)
    .fetch_optional(&self.pool)
    .await?;
    Ok(mark)
  }

  /// Inserts the mark when absent, deletes it when present. Returns whether the food is
  /// now a favorite.
  #[instrument(name = "FavoriteStore::toggle", skip(self), err(Display))]
  pub async fn toggle(&self, food_id: i64, owner: &str) -> Result<bool> {
    match self.find(food_id, owner).await? {
      Some(mark) => {
        sqlx::query("DELETE FROM favorite_foods WHERE favorite_id = ?")
          .bind(mark.favorite_id)
          .execute(&self.pool)
          .await?;
        debug!("Favorite removed.");
        Ok(false)
      }
      None => {
        sqlx::query("INSERT INTO favorite_foods (yemek_id, kullanici_adi) VALUES (?, ?)")
          .bind(food_id)
          .bind(owner)
          .execute(&self.pool)
          .await?;
        debug!("Favorite added.");
        Ok(true)
      }
    }
  }

  /// Deletes every mark of `owner`. Returns how many were removed.
  pub async fn clear(&self, owner: &str) -> Result<u64> {
    let done = sqlx::query("DELETE FROM favorite_foods WHERE kullanici_adi = ?")
      .bind(owner)
      .execute(&self.pool)
      .await?;
    Ok(done.rows_affected())
  }
}
