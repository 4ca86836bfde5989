// core/src/screens/settings.rs
use super::{Screen, StateHolder};
use crate::account::AccountRepository;
use crate::error::Result;
use crate::models::{Location, PaymentCard, UserProfile};
use crate::session::Session;
use async_trait::async_trait;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsState {
  pub loading: bool,
  pub user: Option<UserProfile>,
  pub locations: Vec<Location>,
  pub payments: Vec<PaymentCard>,
  pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum SettingsIntent {
  Load,
  ShowLocations,
  ShowPayments,
  DeleteLocation(String),
  DeletePayment(String),
  QuitRequested,
  QuitConfirmed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SettingsEffect {
  ShowLocations,
  ShowPayments,
  ConfirmQuit,
  NavigateToIntro,
}

pub struct SettingsScreen {
  holder: StateHolder<SettingsState, SettingsEffect>,
  session: Session,
  account: AccountRepository,
}

impl SettingsScreen {
  pub fn new(session: Session, account: AccountRepository) -> Self {
    Self {
      holder: StateHolder::new(SettingsState::default()),
      session,
      account,
    }
  }

  async fn load(&self) -> Result<()> {
    self.holder.update(|s| s.loading = true);
    let owner = self.session.owner_id()?;
    let locations = self.account.locations(&owner).await?;
    let payments = self.account.payments(&owner).await?;
    let user = self.session.current_user();
    self.holder.update(|s| {
      s.user = user;
      s.locations = locations;
      s.payments = payments;
      s.loading = false;
      s.error = None;
    });
    Ok(())
  }

  async fn handle(&self, intent: SettingsIntent) -> Result<()> {
    match intent {
      SettingsIntent::Load => self.load().await?,
      SettingsIntent::ShowLocations => self.holder.emit(SettingsEffect::ShowLocations),
      SettingsIntent::ShowPayments => self.holder.emit(SettingsEffect::ShowPayments),
      SettingsIntent::DeleteLocation(id) => {
        self.account.delete_location(&id).await?;
        self.holder.update(|s| s.locations.retain(|l| l.id != id));
      }
      SettingsIntent::DeletePayment(id) => {
        self.account.delete_payment(&id).await?;
        self.holder.update(|s| s.payments.retain(|p| p.id != id));
      }
      SettingsIntent::QuitRequested => self.holder.emit(SettingsEffect::ConfirmQuit),
      SettingsIntent::QuitConfirmed => {
        self.account.sign_out().await;
        self.session.sign_out();
        info!("Signed out.");
        self.holder.update(|s| *s = SettingsState::default());
        self.holder.emit(SettingsEffect::NavigateToIntro);
      }
    }
    Ok(())
  }
}

#[async_trait]
impl Screen for SettingsScreen {
  type State = SettingsState;
  type Intent = SettingsIntent;
  type Effect = SettingsEffect;

  fn holder(&self) -> &StateHolder<SettingsState, SettingsEffect> {
    &self.holder
  }

  async fn dispatch(&self, intent: SettingsIntent) {
    if let Err(err) = self.handle(intent).await {
      let message = err.user_message();
      self.holder.update(|s| {
        s.loading = false;
        s.error = Some(message);
      });
    }
  }
}
