// core/src/screens/register.rs
use super::{Screen, StateHolder};
use crate::account::AccountRepository;
use crate::error::{EatzyError, Result};
use crate::format::PhoneNumberMask;
use crate::session::Session;
use crate::validation::{
  is_valid_email, is_valid_full_name, is_valid_password, is_valid_phone, is_valid_username,
};
use async_trait::async_trait;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterState {
  pub full_name: String,
  pub username: String,
  pub email: String,
  pub phone: String,
  pub password: String,
  pub loading: bool,
}

impl RegisterState {
  pub fn phone_display(&self) -> String {
    PhoneNumberMask::apply(&self.phone).text
  }
}

#[derive(Debug, Clone)]
pub enum RegisterIntent {
  FullNameChanged(String),
  UsernameChanged(String),
  EmailChanged(String),
  PhoneChanged(String),
  PasswordChanged(String),
  Submit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegisterEffect {
  NavigateToMain,
  ShowMessage(String),
}

pub struct RegisterScreen {
  holder: StateHolder<RegisterState, RegisterEffect>,
  session: Session,
  account: AccountRepository,
}

fn check(valid: bool, message: &str) -> Result<()> {
  if valid {
    Ok(())
  } else {
    Err(EatzyError::Validation(message.to_string()))
  }
}

impl RegisterScreen {
  pub fn new(session: Session, account: AccountRepository) -> Self {
    Self {
      holder: StateHolder::new(RegisterState::default()),
      session,
      account,
    }
  }

  async fn submit(&self) -> Result<()> {
    let form = self.holder.state();
    let full_name = form.full_name.trim();
    let username = form.username.trim();
    let email = form.email.trim();
    let phone = form.phone.trim();

    check(is_valid_full_name(full_name), "Please enter your full name.")?;
    check(is_valid_username(username), "Username must be at least 6 characters.")?;
    check(is_valid_email(email), "Please enter a valid email address.")?;
    check(is_valid_phone(phone), "Please enter a valid phone number.")?;
    check(
      is_valid_password(&form.password),
      "Password needs 8+ characters with a digit, a lowercase and an uppercase letter.",
    )?;

    self.holder.update(|s| s.loading = true);
    let profile = self
      .account
      .register(email, &form.password, full_name, username, phone)
      .await?;
    self.session.sign_in(profile);
    self.holder.update(|s| s.loading = false);
    self.holder.emit(RegisterEffect::NavigateToMain);
    Ok(())
  }
}

#[async_trait]
impl Screen for RegisterScreen {
  type State = RegisterState;
  type Intent = RegisterIntent;
  type Effect = RegisterEffect;

  fn holder(&self) -> &StateHolder<RegisterState, RegisterEffect> {
    &self.holder
  }

  async fn dispatch(&self, intent: RegisterIntent) {
    match intent {
      RegisterIntent::FullNameChanged(v) => self.holder.update(|s| s.full_name = v),
      RegisterIntent::UsernameChanged(v) => self.holder.update(|s| s.username = v),
      RegisterIntent::EmailChanged(v) => self.holder.update(|s| s.email = v),
      RegisterIntent::PhoneChanged(v) => self.holder.update(|s| s.phone = v),
      RegisterIntent::PasswordChanged(v) => self.holder.update(|s| s.password = v),
      RegisterIntent::Submit => {
        if let Err(err) = self.submit().await {
          self.holder.update(|s| s.loading = false);
          self.holder.emit(RegisterEffect::ShowMessage(err.user_message()));
        }
      }
    }
  }
}
