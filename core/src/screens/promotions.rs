// core/src/screens/promotions.rs
use super::{Screen, StateHolder};
use crate::account::AccountRepository;
use crate::error::Result;
use crate::models::Promotion;
use crate::session::Session;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq)]
pub struct PromotionsState {
  pub loading: bool,
  pub promotions: Vec<Promotion>,
  pub error: Option<String>,
}

impl Default for PromotionsState {
  fn default() -> Self {
    Self {
      loading: true,
      promotions: Vec::new(),
      error: None,
    }
  }
}

#[derive(Debug, Clone, Copy)]
pub enum PromotionsIntent {
  Load,
  Retry,
}

/// Lists the signed-in user's promotion codes. No effects.
pub struct PromotionsScreen {
  holder: StateHolder<PromotionsState, ()>,
  session: Session,
  account: AccountRepository,
}

impl PromotionsScreen {
  pub fn new(session: Session, account: AccountRepository) -> Self {
    Self {
      holder: StateHolder::new(PromotionsState::default()),
      session,
      account,
    }
  }

  async fn load(&self) -> Result<()> {
    self.holder.update(|s| s.loading = true);
    let owner = self.session.owner_id()?;
    let promotions = self.account.promotions(&owner).await?;
    self.holder.update(|s| {
      s.promotions = promotions;
      s.loading = false;
      s.error = None;
    });
    Ok(())
  }
}

#[async_trait]
impl Screen for PromotionsScreen {
  type State = PromotionsState;
  type Intent = PromotionsIntent;
  type Effect = ();

  fn holder(&self) -> &StateHolder<PromotionsState, ()> {
    &self.holder
  }

  async fn dispatch(&self, intent: PromotionsIntent) {
    match intent {
      PromotionsIntent::Load | PromotionsIntent::Retry => {
        if let Err(err) = self.load().await {
          let message = err.user_message();
          self.holder.update(|s| {
            s.loading = false;
            s.error = Some(message);
          });
        }
      }
    }
  }
}
