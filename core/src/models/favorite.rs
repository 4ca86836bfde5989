// core/src/models/favorite.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct FavoriteMark {
  #[sqlx(rename = "favorite_id")]
  pub favorite_id: i64,
  #[sqlx(rename = "yemek_id")]
  pub food_id: i64,
  #[sqlx(rename = "kullanici_adi")]
  pub owner: String,
}
