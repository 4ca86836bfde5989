// core/src/cart/reconcile.rs

//! The cart mutation and clear-cart flows.

use super::contexts::{CartMutation, CartMutationCtxData, ClearCartCtxData, RemoteCall};
use crate::error::{EatzyError, Result};
use crate::flow::{ContextData, FlowRegistry, Pipeline, PipelineControl};
use crate::models::CartLineItem;
use tracing::{debug, info, warn};

/// Registers the mutation and clear-cart flows.
pub fn register_cart_flows(registry: &FlowRegistry<EatzyError>) {
  registry.register(mutation_pipeline());
  registry.register(clear_cart_pipeline());
  info!("Cart flows registered.");
}

/// The remote calls that move `matched` (the remote line with the same name, if any) to the
/// state `mutation` asks for. Calls run in order.
///
/// Fails with `Validation` when the resulting quantity would not fit in a `u32`.
pub fn plan_convergence(
  mutation: CartMutation,
  item: &CartLineItem,
  matched: Option<&CartLineItem>,
  duplicates: &[CartLineItem],
) -> Result<Vec<RemoteCall>> {
  let mut calls = Vec::new();
  let remove_matched = |calls: &mut Vec<RemoteCall>| {
    if let Some(m) = matched {
      calls.push(RemoteCall::Remove { line_id: m.id });
    }
  };
  // Quantity changes start from what the remote holds, falling back to what is displayed.
  let base = matched.map_or(item.quantity, |m| m.quantity);
  let too_many = || EatzyError::Validation(format!("quantity of '{}' is too large", item.name));

  match mutation {
    CartMutation::Add => {
      remove_matched(&mut calls);
      let existing = matched.map_or(0, |m| m.quantity);
      let quantity = existing.checked_add(item.quantity).ok_or_else(too_many)?;
      calls.push(RemoteCall::Add { quantity });
    }
    CartMutation::Increase => {
      remove_matched(&mut calls);
      let quantity = base.checked_add(1).ok_or_else(too_many)?;
      calls.push(RemoteCall::Add { quantity });
    }
    CartMutation::Decrease => {
      remove_matched(&mut calls);
      let target = base.saturating_sub(1);
      if target >= 1 {
        calls.push(RemoteCall::Add { quantity: target });
      }
    }
    CartMutation::RemoveEntirely => {
      let mut ids: Vec<i64> = matched.into_iter().chain(duplicates.iter()).map(|l| l.id).collect();
      if item.is_persisted() && !ids.contains(&item.id) {
        ids.push(item.id);
      }
      calls.extend(ids.into_iter().map(|line_id| RemoteCall::Remove { line_id }));
    }
  }
  Ok(calls)
}

fn mutation_pipeline() -> Pipeline<CartMutationCtxData, EatzyError> {
  let mut p = Pipeline::<CartMutationCtxData, EatzyError>::new(&[
    ("validate_request", false, None),
    ("fetch_remote_cart", false, None),
    ("locate_line", false, None),
    ("converge", false, None),
  ]);

  p.on_root("validate_request", |ctx_data: ContextData<CartMutationCtxData>| {
    Box::pin(async move {
      let guard = ctx_data.read();
      if guard.owner.is_empty() {
        return Err(EatzyError::NotSignedIn);
      }
      if guard.item.name.is_empty() {
        return Err(EatzyError::Validation("cart item has no name".to_string()));
      }
      if guard.mutation == CartMutation::Add && guard.item.quantity == 0 {
        return Err(EatzyError::Validation("quantity must be at least 1".to_string()));
      }
      Ok(PipelineControl::Continue)
    })
  });

  p.on_root("fetch_remote_cart", |ctx_data: ContextData<CartMutationCtxData>| {
    Box::pin(async move {
      let (api, owner) = {
        let guard = ctx_data.read();
        (guard.api.clone(), guard.owner.clone())
      };
      let lines = api.list_cart(&owner).await?;
      debug!(lines = lines.len(), "Remote cart fetched.");
      ctx_data.write().remote_lines = lines;
      Ok::<_, EatzyError>(PipelineControl::Continue)
    })
  });

  p.on_root("locate_line", |ctx_data: ContextData<CartMutationCtxData>| {
    Box::pin(async move {
      let mut guard = ctx_data.write();
      let name = guard.item.name.clone();
      let mut same_name = guard.remote_lines.iter().filter(|l| l.name == name).cloned();
      let matched = same_name.next();
      let duplicates: Vec<CartLineItem> = same_name.collect();
      if !duplicates.is_empty() {
        warn!(%name, duplicates = duplicates.len(), "Remote cart holds several lines with the same name.");
      }
      guard.matched = matched;
      guard.duplicates = duplicates;
      Ok::<_, EatzyError>(PipelineControl::Continue)
    })
  });

  p.on_root("converge", |ctx_data: ContextData<CartMutationCtxData>| {
    Box::pin(async move {
      let (api, owner, item, calls) = {
        let guard = ctx_data.read();
        let calls = plan_convergence(guard.mutation, &guard.item, guard.matched.as_ref(), &guard.duplicates)?;
        (guard.api.clone(), guard.owner.clone(), guard.item.clone(), calls)
      };

      let mut resulting_quantity = None;
      for call in calls {
        match call {
          RemoteCall::Remove { line_id } => api.remove_from_cart(line_id, &owner).await?,
          RemoteCall::Add { quantity } => {
            api.add_to_cart(&item, quantity, &owner).await?;
            resulting_quantity = Some(quantity);
          }
        }
        ctx_data.write().calls.push(call);
      }

      let mut guard = ctx_data.write();
      guard.resulting_quantity = resulting_quantity;
      info!(
        name = %guard.item.name,
        mutation = ?guard.mutation,
        calls = guard.calls.len(),
        quantity = ?resulting_quantity,
        "Cart line converged."
      );
      Ok::<_, EatzyError>(PipelineControl::Continue)
    })
  });

  p
}

fn clear_cart_pipeline() -> Pipeline<ClearCartCtxData, EatzyError> {
  let mut p = Pipeline::<ClearCartCtxData, EatzyError>::new(&[("delete_lines", false, None), ("verify_count", false, None)]);

  p.on_root("delete_lines", |ctx_data: ContextData<ClearCartCtxData>| {
    Box::pin(async move {
      let (api, owner, lines) = {
        let guard = ctx_data.read();
        (guard.api.clone(), guard.owner.clone(), guard.lines.clone())
      };
      for line in lines {
        // Keep going after a failure so the count reflects every attempt.
        match api.remove_from_cart(line.id, &owner).await {
          Ok(()) => {
            ctx_data.write().deleted += 1;
          }
          Err(e) => {
            warn!(line_id = line.id, error = %e, "Cart line could not be deleted.");
            ctx_data.write().failures.push((line.id, e.to_string()));
          }
        }
      }
      Ok::<_, EatzyError>(PipelineControl::Continue)
    })
  });

  p.on_root("verify_count", |ctx_data: ContextData<ClearCartCtxData>| {
    Box::pin(async move {
      let guard = ctx_data.read();
      if guard.deleted != guard.lines.len() {
        return Err(EatzyError::ClearCartIncomplete {
          deleted: guard.deleted,
          expected: guard.lines.len(),
        });
      }
      info!(deleted = guard.deleted, "Cart cleared.");
      Ok(PipelineControl::Continue)
    })
  });

  p
}
