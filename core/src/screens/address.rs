// core/src/screens/address.rs
use super::{Screen, StateHolder};
use crate::account::AccountRepository;
use crate::error::{EatzyError, Result};
use crate::models::Location;
use crate::session::Session;
use async_trait::async_trait;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressState {
  /// Set when editing an existing location.
  pub selected_id: Option<String>,
  pub form: Location,
  pub saving: bool,
}

#[derive(Debug, Clone)]
pub enum AddressIntent {
  TitleChanged(String),
  CityChanged(String),
  DistrictChanged(String),
  CountryChanged(String),
  OpenAddressChanged(String),
  Submit,
  ClearFields,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AddressEffect {
  Saved,
  ShowMessage(String),
}

/// Add/edit form for a delivery location.
pub struct AddressScreen {
  holder: StateHolder<AddressState, AddressEffect>,
  session: Session,
  account: AccountRepository,
}

impl AddressScreen {
  pub fn new(session: Session, account: AccountRepository, selected: Option<Location>) -> Self {
    let state = match selected {
      Some(location) => AddressState {
        selected_id: Some(location.id.clone()),
        form: location,
        saving: false,
      },
      None => AddressState::default(),
    };
    Self {
      holder: StateHolder::new(state),
      session,
      account,
    }
  }

  async fn submit(&self) -> Result<()> {
    let owner = self.session.owner_id()?;
    let AddressState { selected_id, form, .. } = self.holder.state();
    if form.title.trim().is_empty() || form.open_address.trim().is_empty() {
      return Err(EatzyError::Validation("Title and address are required.".to_string()));
    }

    self.holder.update(|s| s.saving = true);
    match selected_id {
      Some(id) => self.account.update_location(&id, &form, &owner).await?,
      None => {
        let id = self.account.add_location(&form, &owner).await?;
        self.holder.update(|s| s.selected_id = Some(id));
      }
    }
    self.holder.update(|s| s.saving = false);
    self.holder.emit(AddressEffect::Saved);
    Ok(())
  }
}

#[async_trait]
impl Screen for AddressScreen {
  type State = AddressState;
  type Intent = AddressIntent;
  type Effect = AddressEffect;

  fn holder(&self) -> &StateHolder<AddressState, AddressEffect> {
    &self.holder
  }

  async fn dispatch(&self, intent: AddressIntent) {
    match intent {
      AddressIntent::TitleChanged(v) => self.holder.update(|s| s.form.title = v),
      AddressIntent::CityChanged(v) => self.holder.update(|s| s.form.city = v),
      AddressIntent::DistrictChanged(v) => self.holder.update(|s| s.form.district = v),
      AddressIntent::CountryChanged(v) => self.holder.update(|s| s.form.country = v),
      AddressIntent::OpenAddressChanged(v) => self.holder.update(|s| s.form.open_address = v),
      AddressIntent::ClearFields => self.holder.update(|s| {
        let id = s.form.id.clone();
        s.form = Location { id, ..Location::default() };
      }),
      AddressIntent::Submit => {
        if let Err(err) = self.submit().await {
          self.holder.update(|s| s.saving = false);
          self.holder.emit(AddressEffect::ShowMessage(err.user_message()));
        }
      }
    }
  }
}
