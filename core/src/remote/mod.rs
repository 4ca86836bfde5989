// core/src/remote/mod.rs

//! The remote food/cart API.

pub mod dto;
pub mod http;

use crate::error::Result;
use crate::models::{CartLineItem, CatalogItem};
use async_trait::async_trait;

pub use http::HttpFoodApi;

/// Contract of the remote food/cart service.
///
/// Every call returns the uniform `EatzyError` on failure. The service has no "set quantity"
/// operation, only add and remove, which is why the cart module reconciles by delete then re-add.
#[async_trait]
pub trait FoodApi: Send + Sync {
  /// All catalog foods. `is_favorite` and `rating` are left at their defaults.
  async fn list_catalog(&self) -> Result<Vec<CatalogItem>>;

  /// Creates a new cart line for `owner` with `quantity` of `item`.
  async fn add_to_cart(&self, item: &CartLineItem, quantity: u32, owner: &str) -> Result<()>;

  /// The owner's cart. An empty cart is `Ok(vec![])`.
  async fn list_cart(&self, owner: &str) -> Result<Vec<CartLineItem>>;

  async fn remove_from_cart(&self, line_id: i64, owner: &str) -> Result<()>;
}
