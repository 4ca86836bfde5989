// core/src/models/promotion.rs
use serde::{Deserialize, Serialize};

/// A discount code owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Promotion {
  pub id: String,
  pub code: String,
  pub title: String,
  /// Whole percent, 0 to 100.
  pub discount: u8,
  pub owner: String,
}

impl Promotion {
  pub fn is_owned_by(&self, owner: &str) -> bool {
    self.owner == owner
  }
}
