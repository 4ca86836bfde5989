// core/src/promotion.rs

//! Promotion codes: at most one per cart screen, only the owner's own codes.

use crate::error::{EatzyError, Result};
use crate::flow::{ContextData, Pipeline, PipelineControl};
use crate::models::Promotion;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

/// Global lookup of a promotion by its code, regardless of owner.
#[async_trait]
pub trait PromotionLookup: Send + Sync {
  async fn find_by_code(&self, code: &str) -> Result<Option<Promotion>>;
}

/// `floor(subtotal - subtotal * discount / 100)` in integers.
pub fn discounted_subtotal(subtotal: i64, discount: u8) -> i64 {
  let cut = subtotal * i64::from(discount);
  // Ceiling of the cut gives the floor of the remainder.
  subtotal - (cut + 99).div_euclid(100)
}

#[derive(Clone)]
pub struct PromotionCtxData {
  pub lookup: Arc<dyn PromotionLookup>,
  pub owner: String,
  pub code: String,
  pub subtotal: i64,
  pub applied_count: u8,
  pub promotion: Option<Promotion>,
  pub new_subtotal: Option<i64>,
}

static PROMOTION_FLOW: Lazy<Pipeline<PromotionCtxData, EatzyError>> = Lazy::new(promotion_pipeline);

fn promotion_pipeline() -> Pipeline<PromotionCtxData, EatzyError> {
  let mut p = Pipeline::<PromotionCtxData, EatzyError>::new(&[
    ("guard_session", false, None),
    ("guard_subtotal", false, None),
    ("lookup", false, None),
    ("discount", false, None),
  ]);

  p.on_root("guard_session", |ctx_data: ContextData<PromotionCtxData>| {
    Box::pin(async move {
      if ctx_data.read().applied_count != 0 {
        return Err(EatzyError::PromotionAlreadyApplied);
      }
      Ok(PipelineControl::Continue)
    })
  });

  p.on_root("guard_subtotal", |ctx_data: ContextData<PromotionCtxData>| {
    Box::pin(async move {
      if ctx_data.read().subtotal <= 0 {
        return Err(EatzyError::CartEmpty);
      }
      Ok(PipelineControl::Continue)
    })
  });

  p.on_root("lookup", |ctx_data: ContextData<PromotionCtxData>| {
    Box::pin(async move {
      let (lookup, code, owner) = {
        let guard = ctx_data.read();
        (guard.lookup.clone(), guard.code.clone(), guard.owner.clone())
      };
      let promotion = lookup.find_by_code(&code).await?.ok_or(EatzyError::PromotionNotFound)?;
      if !promotion.is_owned_by(&owner) {
        warn!(%code, "Promotion belongs to another user.");
        return Err(EatzyError::PromotionNotOwned);
      }
      ctx_data.write().promotion = Some(promotion);
      Ok::<_, EatzyError>(PipelineControl::Continue)
    })
  });

  p.on_root("discount", |ctx_data: ContextData<PromotionCtxData>| {
    Box::pin(async move {
      let mut guard = ctx_data.write();
      let Some(discount) = guard.promotion.as_ref().map(|p| p.discount) else {
        return Err(EatzyError::Internal("discount step ran without a promotion".to_string()));
      };
      let new_subtotal = discounted_subtotal(guard.subtotal, discount);
      guard.new_subtotal = Some(new_subtotal);
      guard.applied_count = 1;
      Ok(PipelineControl::Continue)
    })
  });

  p
}

/// The applied-promotion counter of one cart screen.
///
/// Created with the screen and never reset by clearing the cart. A second code in the same
/// session is rejected before any lookup.
pub struct PromotionSession {
  lookup: Arc<dyn PromotionLookup>,
  applied: Mutex<Applied>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Applied {
  count: u8,
  // Percent of the accepted code, kept so later subtotals get the same cut.
  discount: Option<u8>,
}

impl PromotionSession {
  pub fn new(lookup: Arc<dyn PromotionLookup>) -> Self {
    Self {
      lookup,
      applied: Mutex::new(Applied::default()),
    }
  }

  pub async fn applied_count(&self) -> u8 {
    self.applied.lock().await.count
  }

  /// Discount percent of the accepted code, if one was accepted.
  pub async fn applied_discount(&self) -> Option<u8> {
    self.applied.lock().await.discount
  }

  /// `subtotal` with the accepted code's discount, or unchanged when there is none.
  pub async fn discount(&self, subtotal: i64) -> i64 {
    match self.applied_discount().await {
      Some(percent) => discounted_subtotal(subtotal, percent),
      None => subtotal,
    }
  }

  /// Applies `code` to `subtotal` for `owner` and returns the discounted subtotal.
  /// On error nothing changes.
  #[instrument(name = "PromotionSession::apply", skip(self), err(Display))]
  pub async fn apply(&self, code: &str, subtotal: i64, owner: &str) -> Result<i64> {
    let mut applied = self.applied.lock().await;
    let ctx = ContextData::new(PromotionCtxData {
      lookup: self.lookup.clone(),
      owner: owner.to_string(),
      code: code.trim().to_string(),
      subtotal,
      applied_count: applied.count,
      promotion: None,
      new_subtotal: None,
    });
    PROMOTION_FLOW.run(ctx.clone()).await?;

    let done = ctx.snapshot();
    let new_subtotal = done
      .new_subtotal
      .ok_or_else(|| EatzyError::Internal("promotion flow finished without a subtotal".to_string()))?;
    applied.count = done.applied_count;
    applied.discount = done.promotion.as_ref().map(|p| p.discount);
    info!(code = %done.code, subtotal, new_subtotal, "Promotion applied.");
    Ok(new_subtotal)
  }
}

#[cfg(test)]
mod tests {
  use super::discounted_subtotal;

  #[test]
  fn discount_floors_the_result() {
    assert_eq!(discounted_subtotal(100, 20), 80);
    assert_eq!(discounted_subtotal(99, 10), 89);
    assert_eq!(discounted_subtotal(250, 0), 250);
    assert_eq!(discounted_subtotal(250, 100), 0);
    assert_eq!(discounted_subtotal(7, 50), 3);
  }
}
