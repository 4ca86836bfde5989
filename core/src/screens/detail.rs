// core/src/screens/detail.rs
use super::{Screen, StateHolder};
use crate::cart::CartRepository;
use crate::catalog::CatalogRepository;
use crate::error::Result;
use crate::models::CatalogItem;
use crate::session::Session;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq)]
pub struct DetailState {
  pub food: CatalogItem,
  /// Never below 1.
  pub amount: u32,
  pub error: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub enum DetailIntent {
  Increase,
  Decrease,
  ToggleFavorite,
  AddToCart,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailEffect {
  AddedToCart { amount: u32 },
  Message(String),
}

pub struct DetailScreen {
  holder: StateHolder<DetailState, DetailEffect>,
  session: Session,
  catalog: CatalogRepository,
  cart: CartRepository,
}

impl DetailScreen {
  pub fn new(session: Session, catalog: CatalogRepository, cart: CartRepository, food: CatalogItem) -> Self {
    Self {
      holder: StateHolder::new(DetailState {
        food,
        amount: 1,
        error: None,
      }),
      session,
      catalog,
      cart,
    }
  }

  async fn handle(&self, intent: DetailIntent) -> Result<()> {
    match intent {
      DetailIntent::Increase => self.holder.update(|s| s.amount += 1),
      DetailIntent::Decrease => self.holder.update(|s| s.amount = s.amount.saturating_sub(1).max(1)),
      DetailIntent::ToggleFavorite => {
        let owner = self.session.owner_id()?;
        let food_id = self.holder.state().food.id;
        let now_favorite = self.catalog.toggle_favorite(food_id, &owner).await?;
        self.holder.update(|s| s.food.is_favorite = now_favorite);
      }
      DetailIntent::AddToCart => {
        let owner = self.session.owner_id()?;
        let DetailState { food, amount, .. } = self.holder.state();
        self.cart.add(&food.to_line_item(amount), &owner).await?;
        self.cart.subtotal(&owner, &self.session).await;
        self.holder.emit(DetailEffect::AddedToCart { amount });
      }
    }
    Ok(())
  }
}

#[async_trait]
impl Screen for DetailScreen {
  type State = DetailState;
  type Intent = DetailIntent;
  type Effect = DetailEffect;

  fn holder(&self) -> &StateHolder<DetailState, DetailEffect> {
    &self.holder
  }

  async fn dispatch(&self, intent: DetailIntent) {
    if let Err(err) = self.handle(intent).await {
      let message = err.user_message();
      self.holder.update(|s| s.error = Some(message.clone()));
      self.holder.emit(DetailEffect::Message(message));
    }
  }
}
