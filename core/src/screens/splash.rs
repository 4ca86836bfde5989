// core/src/screens/splash.rs
use super::{Screen, StateHolder};
use crate::account::AccountRepository;
use crate::session::Session;
use async_trait::async_trait;
use tracing::warn;

#[derive(Debug, Clone, Copy)]
pub enum SplashIntent {
  Check,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SplashEffect {
  NavigateToMain,
  NavigateToIntro,
}

/// Restores a persisted sign-in, if the auth backend has one.
pub struct SplashScreen {
  holder: StateHolder<(), SplashEffect>,
  session: Session,
  account: AccountRepository,
}

impl SplashScreen {
  pub fn new(session: Session, account: AccountRepository) -> Self {
    Self {
      holder: StateHolder::new(()),
      session,
      account,
    }
  }
}

#[async_trait]
impl Screen for SplashScreen {
  type State = ();
  type Intent = SplashIntent;
  type Effect = SplashEffect;

  fn holder(&self) -> &StateHolder<(), SplashEffect> {
    &self.holder
  }

  async fn dispatch(&self, intent: SplashIntent) {
    let SplashIntent::Check = intent;
    match self.account.current_user().await {
      Ok(Some(profile)) => {
        self.session.sign_in(profile);
        self.holder.emit(SplashEffect::NavigateToMain);
      }
      Ok(None) => self.holder.emit(SplashEffect::NavigateToIntro),
      Err(err) => {
        warn!(error = %err, "Could not restore the signed-in profile.");
        self.holder.emit(SplashEffect::NavigateToIntro);
      }
    }
  }
}
