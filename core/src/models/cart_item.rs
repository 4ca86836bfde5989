// core/src/models/cart_item.rs
use serde::{Deserialize, Serialize};

/// One row of a user's remote cart.
///
/// `id` is assigned by the remote service; `0` means the line has not been persisted yet.
/// A line present in the cart always has `quantity >= 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
  pub id: i64,
  pub name: String,
  pub image: String,
  pub unit_price: f64,
  pub quantity: u32,
}

impl CartLineItem {
  /// A line that has not been sent to the remote cart yet.
  pub fn unpersisted(name: impl Into<String>, image: impl Into<String>, unit_price: f64, quantity: u32) -> Self {
    Self {
      id: 0,
      name: name.into(),
      image: image.into(),
      unit_price,
      quantity,
    }
  }

  pub fn is_persisted(&self) -> bool {
    self.id != 0
  }

  /// The remote API stores whole currency units, so the unit price is truncated.
  pub fn whole_unit_price(&self) -> i64 {
    self.unit_price.trunc() as i64
  }

  pub fn line_total(&self) -> i64 {
    self.whole_unit_price() * i64::from(self.quantity)
  }

  pub fn with_quantity(&self, quantity: u32) -> Self {
    Self {
      quantity,
      ..self.clone()
    }
  }
}
