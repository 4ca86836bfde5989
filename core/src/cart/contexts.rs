// core/src/cart/contexts.rs

//! Data carried through the cart flows.

use crate::models::CartLineItem;
use crate::remote::FoodApi;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartMutation {
  /// Add the incoming quantity, merging into an existing line of the same name.
  Add,
  /// One more of an existing line.
  Increase,
  /// One fewer. Reaching zero removes the line.
  Decrease,
  /// Drop the line, and any same-named duplicates.
  RemoveEntirely,
}

/// One call made against the remote cart while converging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteCall {
  Remove { line_id: i64 },
  Add { quantity: u32 },
}

#[derive(Clone)]
pub struct CartMutationCtxData {
  pub api: Arc<dyn FoodApi>,
  pub owner: String,
  pub mutation: CartMutation,
  /// The line as the screen knows it, or the new line being added.
  pub item: CartLineItem,
  // Filled by fetch_remote_cart.
  pub remote_lines: Vec<CartLineItem>,
  // Filled by locate_line.
  pub matched: Option<CartLineItem>,
  pub duplicates: Vec<CartLineItem>,
  // Filled by converge.
  pub calls: Vec<RemoteCall>,
  pub resulting_quantity: Option<u32>,
}

impl CartMutationCtxData {
  pub fn new(api: Arc<dyn FoodApi>, owner: impl Into<String>, mutation: CartMutation, item: CartLineItem) -> Self {
    Self {
      api,
      owner: owner.into(),
      mutation,
      item,
      remote_lines: Vec::new(),
      matched: None,
      duplicates: Vec::new(),
      calls: Vec::new(),
      resulting_quantity: None,
    }
  }
}

#[derive(Clone)]
pub struct ClearCartCtxData {
  pub api: Arc<dyn FoodApi>,
  pub owner: String,
  /// The lines currently displayed.
  pub lines: Vec<CartLineItem>,
  pub deleted: usize,
  pub failures: Vec<(i64, String)>,
}

impl ClearCartCtxData {
  pub fn new(api: Arc<dyn FoodApi>, owner: impl Into<String>, lines: Vec<CartLineItem>) -> Self {
    Self {
      api,
      owner: owner.into(),
      lines,
      deleted: 0,
      failures: Vec::new(),
    }
  }
}
