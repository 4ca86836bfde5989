// core/src/screens/cart.rs
use super::{Screen, StateHolder};
use crate::account::AccountRepository;
use crate::cart::{summarize, CartRepository};
use crate::error::{EatzyError, Result};
use crate::models::{CartLineItem, PaymentCard};
use crate::promotion::PromotionSession;
use crate::session::Session;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
  pub loading: bool,
  pub cart_loading: bool,
  pub lines: Vec<CartLineItem>,
  /// Whole currency units. Discounted once a promotion is applied.
  pub subtotal: i64,
  pub promotion_code: String,
  pub promotion_count: u8,
  pub payments: Vec<PaymentCard>,
  pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum CartIntent {
  Load,
  Increase(CartLineItem),
  /// Removes the line when its quantity is 1.
  Decrease(CartLineItem),
  Remove(CartLineItem),
  ClearRequested,
  ClearConfirmed,
  PromotionCodeChanged(String),
  SubmitPromotion,
  ShowPayments,
  /// Checkout with the chosen card empties the cart.
  PaymentChosen(PaymentCard),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CartEffect {
  ConfirmClear,
  ShowPaymentPicker,
  OrderPlaced,
  Message(String),
}

pub struct CartScreen {
  holder: StateHolder<CartState, CartEffect>,
  session: Session,
  cart: CartRepository,
  account: AccountRepository,
  // One per screen instance: clearing the cart does not reset it.
  promotions: PromotionSession,
}

impl CartScreen {
  pub fn new(session: Session, cart: CartRepository, account: AccountRepository) -> Self {
    let promotions = PromotionSession::new(Arc::new(account.clone()));
    Self {
      holder: StateHolder::new(CartState::default()),
      session,
      cart,
      account,
      promotions,
    }
  }

  fn fail(&self, err: EatzyError) {
    warn!(error = %err, "Cart screen action failed.");
    let message = err.user_message();
    self.holder.update(|s| {
      s.loading = false;
      s.cart_loading = false;
      s.error = Some(message);
    });
  }

  /// Re-reads the remote cart, recomputes the subtotal and refreshes the badge.
  async fn refresh(&self) -> Result<()> {
    let owner = self.session.owner_id()?;
    self.holder.update(|s| s.cart_loading = true);
    let lines = self.cart.list(&owner).await?;
    let (subtotal, count) = summarize(&lines);
    // An accepted code keeps applying to whatever the cart holds now.
    let subtotal = self.promotions.discount(subtotal).await;
    self.session.set_cart_badge(count);
    self.holder.update(|s| {
      s.lines = lines;
      s.subtotal = subtotal;
      s.cart_loading = false;
      s.loading = false;
    });
    Ok(())
  }

  async fn mutate_then_refresh(&self, intent: &CartIntent) -> Result<()> {
    let owner = self.session.owner_id()?;
    self.holder.update(|s| {
      s.loading = true;
      s.error = None;
    });
    let outcome = match intent {
      CartIntent::Increase(line) => self.cart.increase(line, &owner).await,
      CartIntent::Decrease(line) if line.quantity > 1 => self.cart.decrease(line, &owner).await,
      CartIntent::Decrease(line) | CartIntent::Remove(line) => self.cart.remove(line, &owner).await,
      _ => return Ok(()),
    };
    // Refresh either way so the screen shows what the remote really holds.
    let refreshed = self.refresh().await;
    outcome?;
    refreshed
  }

  async fn clear(&self) -> Result<()> {
    let owner = self.session.owner_id()?;
    let lines = self.holder.state().lines;
    self.holder.update(|s| s.loading = true);
    let cleared = self.cart.clear(&lines, &owner).await;
    let refreshed = self.refresh().await;
    cleared?;
    refreshed
  }

  async fn submit_promotion(&self) -> Result<()> {
    let owner = self.session.owner_id()?;
    let (code, subtotal) = {
      let s = self.holder.state();
      (s.promotion_code, s.subtotal)
    };
    let new_subtotal = self.promotions.apply(&code, subtotal, &owner).await?;
    let count = self.promotions.applied_count().await;
    self.holder.update(|s| {
      s.subtotal = new_subtotal;
      s.promotion_count = count;
      s.error = None;
    });
    Ok(())
  }

  async fn load_payments(&self) -> Result<()> {
    let owner = self.session.owner_id()?;
    let payments = self.account.payments(&owner).await?;
    self.holder.update(|s| s.payments = payments);
    Ok(())
  }

  async fn handle(&self, intent: CartIntent) -> Result<()> {
    match intent {
      CartIntent::Load => {
        self.holder.update(|s| s.loading = true);
        self.refresh().await
      }
      CartIntent::Increase(_) | CartIntent::Decrease(_) | CartIntent::Remove(_) => self.mutate_then_refresh(&intent).await,
      CartIntent::ClearRequested => {
        self.holder.emit(CartEffect::ConfirmClear);
        Ok(())
      }
      CartIntent::ClearConfirmed => self.clear().await,
      CartIntent::PromotionCodeChanged(code) => {
        self.holder.update(|s| s.promotion_code = code);
        Ok(())
      }
      CartIntent::SubmitPromotion => self.submit_promotion().await,
      CartIntent::ShowPayments => {
        self.load_payments().await?;
        self.holder.emit(CartEffect::ShowPaymentPicker);
        Ok(())
      }
      CartIntent::PaymentChosen(card) => {
        info!(card = %card.masked_number(), "Paying for cart.");
        self.clear().await?;
        self.holder.emit(CartEffect::OrderPlaced);
        Ok(())
      }
    }
  }
}

#[async_trait]
impl Screen for CartScreen {
  type State = CartState;
  type Intent = CartIntent;
  type Effect = CartEffect;

  fn holder(&self) -> &StateHolder<CartState, CartEffect> {
    &self.holder
  }

  async fn dispatch(&self, intent: CartIntent) {
    if let Err(err) = self.handle(intent).await {
      self.fail(err);
    }
  }
}
