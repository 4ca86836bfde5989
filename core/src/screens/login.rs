// core/src/screens/login.rs
use super::{Screen, StateHolder};
use crate::account::AccountRepository;
use crate::error::{EatzyError, Result};
use crate::session::Session;
use crate::validation::is_valid_email;
use async_trait::async_trait;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginState {
  pub email: String,
  pub password: String,
  pub loading: bool,
}

#[derive(Debug, Clone)]
pub enum LoginIntent {
  EmailChanged(String),
  PasswordChanged(String),
  Submit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoginEffect {
  NavigateToMain,
  ShowMessage(String),
}

pub struct LoginScreen {
  holder: StateHolder<LoginState, LoginEffect>,
  session: Session,
  account: AccountRepository,
}

impl LoginScreen {
  pub fn new(session: Session, account: AccountRepository) -> Self {
    Self {
      holder: StateHolder::new(LoginState::default()),
      session,
      account,
    }
  }

  async fn submit(&self) -> Result<()> {
    let LoginState { email, password, .. } = self.holder.state();
    let (email, password) = (email.trim().to_string(), password.trim().to_string());
    if !is_valid_email(&email) {
      return Err(EatzyError::Validation("Please enter a valid email address.".to_string()));
    }
    if password.is_empty() {
      return Err(EatzyError::Validation("Please enter your password.".to_string()));
    }

    self.holder.update(|s| s.loading = true);
    let profile = self.account.login(&email, &password).await?;
    self.session.sign_in(profile);
    self.holder.update(|s| s.loading = false);
    self.holder.emit(LoginEffect::NavigateToMain);
    Ok(())
  }
}

#[async_trait]
impl Screen for LoginScreen {
  type State = LoginState;
  type Intent = LoginIntent;
  type Effect = LoginEffect;

  fn holder(&self) -> &StateHolder<LoginState, LoginEffect> {
    &self.holder
  }

  async fn dispatch(&self, intent: LoginIntent) {
    match intent {
      LoginIntent::EmailChanged(email) => self.holder.update(|s| s.email = email),
      LoginIntent::PasswordChanged(password) => self.holder.update(|s| s.password = password),
      LoginIntent::Submit => {
        if let Err(err) = self.submit().await {
          self.holder.update(|s| s.loading = false);
          self.holder.emit(LoginEffect::ShowMessage(err.user_message()));
        }
      }
    }
  }
}
