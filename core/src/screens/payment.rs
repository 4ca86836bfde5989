// core/src/screens/payment.rs
use super::{Screen, StateHolder};
use crate::account::AccountRepository;
use crate::error::{EatzyError, Result};
use crate::format::CardExpiryMask;
use crate::models::PaymentCard;
use crate::session::Session;
use crate::validation::{is_valid_card_expiry, is_valid_card_number, is_valid_cvc};
use async_trait::async_trait;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentState {
  pub selected_id: Option<String>,
  pub form: PaymentCard,
  pub saving: bool,
}

impl PaymentState {
  /// Expiry as the user sees it, `MM/YY`.
  pub fn expiry_display(&self) -> String {
    CardExpiryMask::apply(&self.form.expiry).text
  }
}

#[derive(Debug, Clone)]
pub enum PaymentIntent {
  TitleChanged(String),
  CardNumberChanged(String),
  HolderNameChanged(String),
  ExpiryChanged(String),
  CvcChanged(String),
  Submit,
  ClearFields,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaymentEffect {
  Saved,
  ShowMessage(String),
}

pub struct PaymentScreen {
  holder: StateHolder<PaymentState, PaymentEffect>,
  session: Session,
  account: AccountRepository,
}

fn digits(input: &str, limit: usize) -> String {
  input.chars().filter(char::is_ascii_digit).take(limit).collect()
}

impl PaymentScreen {
  pub fn new(session: Session, account: AccountRepository, selected: Option<PaymentCard>) -> Self {
    let state = match selected {
      Some(card) => PaymentState {
        selected_id: Some(card.id.clone()),
        form: card,
        saving: false,
      },
      None => PaymentState::default(),
    };
    Self {
      holder: StateHolder::new(state),
      session,
      account,
    }
  }

  async fn submit(&self) -> Result<()> {
    let owner = self.session.owner_id()?;
    let PaymentState { selected_id, form, .. } = self.holder.state();
    if !is_valid_card_number(&form.card_number) {
      return Err(EatzyError::Validation("Card number must be 16 digits.".to_string()));
    }
    if !is_valid_card_expiry(&form.expiry) {
      return Err(EatzyError::Validation("Expiry date must be MM/YY.".to_string()));
    }
    if !is_valid_cvc(&form.cvc) {
      return Err(EatzyError::Validation("CVC must be 3 or 4 digits.".to_string()));
    }

    self.holder.update(|s| s.saving = true);
    match selected_id {
      Some(id) => self.account.update_payment(&id, &form, &owner).await?,
      None => {
        let id = self.account.add_payment(&form, &owner).await?;
        self.holder.update(|s| s.selected_id = Some(id));
      }
    }
    self.holder.update(|s| s.saving = false);
    self.holder.emit(PaymentEffect::Saved);
    Ok(())
  }
}

#[async_trait]
impl Screen for PaymentScreen {
  type State = PaymentState;
  type Intent = PaymentIntent;
  type Effect = PaymentEffect;

  fn holder(&self) -> &StateHolder<PaymentState, PaymentEffect> {
    &self.holder
  }

  async fn dispatch(&self, intent: PaymentIntent) {
    match intent {
      PaymentIntent::TitleChanged(v) => self.holder.update(|s| s.form.title = v),
      PaymentIntent::CardNumberChanged(v) => self.holder.update(|s| s.form.card_number = digits(&v, 16)),
      PaymentIntent::HolderNameChanged(v) => self.holder.update(|s| s.form.holder_name = v),
      PaymentIntent::ExpiryChanged(v) => self.holder.update(|s| s.form.expiry = digits(&v, 4)),
      PaymentIntent::CvcChanged(v) => self.holder.update(|s| s.form.cvc = digits(&v, 4)),
      PaymentIntent::ClearFields => self.holder.update(|s| {
        let id = s.form.id.clone();
        s.form = PaymentCard { id, ..PaymentCard::default() };
      }),
      PaymentIntent::Submit => {
        if let Err(err) = self.submit().await {
          self.holder.update(|s| s.saving = false);
          self.holder.emit(PaymentEffect::ShowMessage(err.user_message()));
        }
      }
    }
  }
}
