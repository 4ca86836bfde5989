// core/src/models/food.rs
use super::cart_item::CartLineItem;
use serde::{Deserialize, Serialize};

/// A food product from the remote catalog, decorated for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
  pub id: i64,
  pub name: String,
  pub image: String,
  pub price: f64,
  pub is_favorite: bool,
  /// Cosmetic only. Regenerated on every load.
  pub rating: f64,
}

impl CatalogItem {
  pub fn to_line_item(&self, quantity: u32) -> CartLineItem {
    CartLineItem::unpersisted(self.name.clone(), self.image.clone(), self.price, quantity)
  }
}
