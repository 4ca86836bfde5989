// core/src/cart/repository.rs

//! `CartRepository`: the entry point screens use to read and change the remote cart.

use super::contexts::{CartMutation, CartMutationCtxData, ClearCartCtxData, RemoteCall};
use super::reconcile::register_cart_flows;
use crate::error::{EatzyError, Result};
use crate::flow::{ContextData, FlowRegistry, PipelineResult};
use crate::models::CartLineItem;
use crate::remote::FoodApi;
use crate::session::Session;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, instrument};

/// What a mutation did to the remote cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome {
  pub calls: Vec<RemoteCall>,
  /// Quantity of the line afterwards. `None` when the line is gone.
  pub quantity: Option<u32>,
}

/// Subtotal in whole currency units and the total item count.
pub fn summarize(lines: &[CartLineItem]) -> (i64, u32) {
  lines
    .iter()
    .fold((0, 0), |(total, count), line| (total + line.line_total(), count + line.quantity))
}

#[derive(Clone)]
pub struct CartRepository {
  api: Arc<dyn FoodApi>,
  flows: Arc<FlowRegistry<EatzyError>>,
  // One async mutex per owner: mutations for the same cart run one at a time.
  // An entry lives only while some mutation for that owner holds or awaits it.
  owner_locks: Arc<Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>>,
}

impl CartRepository {
  pub fn new(api: Arc<dyn FoodApi>) -> Self {
    let flows = FlowRegistry::new();
    register_cart_flows(&flows);
    Self::with_flows(api, Arc::new(flows))
  }

  /// Uses a registry the caller already populated with `register_cart_flows`.
  pub fn with_flows(api: Arc<dyn FoodApi>, flows: Arc<FlowRegistry<EatzyError>>) -> Self {
    Self {
      api,
      flows,
      owner_locks: Arc::new(Mutex::new(HashMap::new())),
    }
  }

  pub fn api(&self) -> Arc<dyn FoodApi> {
    self.api.clone()
  }

  fn owner_lock(&self, owner: &str) -> Arc<tokio::sync::Mutex<()>> {
    self.owner_locks.lock().entry(owner.to_string()).or_default().clone()
  }

  /// Drops the owner's entry once the map holds the only handle to it.
  fn release_owner_lock(&self, owner: &str, lock: Arc<tokio::sync::Mutex<()>>) {
    drop(lock);
    let mut locks = self.owner_locks.lock();
    if locks.get(owner).is_some_and(|l| Arc::strong_count(l) == 1) {
      locks.remove(owner);
    }
  }

  /// Owners with a cart mutation in flight or waiting.
  pub fn busy_owners(&self) -> usize {
    self.owner_locks.lock().len()
  }

  pub async fn list(&self, owner: &str) -> Result<Vec<CartLineItem>> {
    self.api.list_cart(owner).await
  }

  #[instrument(name = "CartRepository::mutate", skip(self, item), fields(name = %item.name), err(Display))]
  async fn mutate(&self, mutation: CartMutation, item: &CartLineItem, owner: &str) -> Result<MutationOutcome> {
    let lock = self.owner_lock(owner);
    let outcome = {
      let _serialized = lock.lock().await;
      self.run_mutation(mutation, item, owner).await
    };
    self.release_owner_lock(owner, lock);
    outcome
  }

  async fn run_mutation(&self, mutation: CartMutation, item: &CartLineItem, owner: &str) -> Result<MutationOutcome> {
    let ctx = ContextData::new(CartMutationCtxData::new(self.api.clone(), owner, mutation, item.clone()));
    match self.flows.run(ctx.clone()).await? {
      PipelineResult::Completed => {}
      PipelineResult::Stopped => {
        return Err(EatzyError::Internal("cart mutation flow stopped early".to_string()));
      }
    }
    let guard = ctx.read();
    Ok(MutationOutcome {
      calls: guard.calls.clone(),
      quantity: guard.resulting_quantity,
    })
  }

  /// Adds `item.quantity` of `item`, merging into a same-named line.
  pub async fn add(&self, item: &CartLineItem, owner: &str) -> Result<MutationOutcome> {
    self.mutate(CartMutation::Add, item, owner).await
  }

  pub async fn increase(&self, item: &CartLineItem, owner: &str) -> Result<MutationOutcome> {
    self.mutate(CartMutation::Increase, item, owner).await
  }

  /// One fewer; the line disappears when it would reach zero.
  pub async fn decrease(&self, item: &CartLineItem, owner: &str) -> Result<MutationOutcome> {
    self.mutate(CartMutation::Decrease, item, owner).await
  }

  pub async fn remove(&self, item: &CartLineItem, owner: &str) -> Result<MutationOutcome> {
    self.mutate(CartMutation::RemoveEntirely, item, owner).await
  }

  /// Deletes every displayed line. Fails with `ClearCartIncomplete` unless every delete succeeded.
  #[instrument(name = "CartRepository::clear", skip(self, lines), fields(lines = lines.len()), err(Display))]
  pub async fn clear(&self, lines: &[CartLineItem], owner: &str) -> Result<usize> {
    let lock = self.owner_lock(owner);
    let outcome = {
      let _serialized = lock.lock().await;
      let ctx = ContextData::new(ClearCartCtxData::new(self.api.clone(), owner, lines.to_vec()));
      let ran = self.flows.run(ctx.clone()).await;
      let deleted = ctx.read().deleted;
      ran.map(|_| deleted)
    };
    self.release_owner_lock(owner, lock);
    outcome
  }

  /// Subtotal of the owner's cart. Also refreshes the session's cart badge.
  /// A failed fetch reads as an empty cart.
  pub async fn subtotal(&self, owner: &str, session: &Session) -> i64 {
    match self.api.list_cart(owner).await {
      Ok(lines) => {
        let (total, count) = summarize(&lines);
        session.set_cart_badge(count);
        total
      }
      Err(e) => {
        error!(error = %e, "Cart subtotal unavailable.");
        0
      }
    }
  }
}
