// core/src/account.rs

//! Account, profile, promotion, location and payment records on the cloud backend.

use crate::cloud::{AuthProvider, Document, DocumentStore, StoredDocument, LOCATIONS, OWNER_FIELD, PAYMENTS, PROMOTIONS, USERS};
use crate::error::{EatzyError, Result};
use crate::models::{Location, PaymentCard, Promotion, UserProfile};
use crate::promotion::PromotionLookup;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileDoc {
  full_name: String,
  user_name: String,
  #[serde(default)]
  phone: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromotionDoc {
  code: String,
  #[serde(default)]
  title: String,
  #[serde(deserialize_with = "percent")]
  discount: u8,
  user_name: String,
}

/// Discount arrives as a number or a numeric string.
fn percent<'de, D: Deserializer<'de>>(de: D) -> std::result::Result<u8, D::Error> {
  let value = Value::deserialize(de)?;
  let parsed = match &value {
    Value::Number(n) => n.as_u64(),
    Value::String(s) => s.trim().parse::<u64>().ok(),
    _ => None,
  };
  match parsed {
    Some(p) if p <= 100 => Ok(p as u8),
    _ => Err(serde::de::Error::custom(format!("discount out of range: {}", value))),
  }
}

#[derive(Debug, Serialize, Deserialize)]
struct LocationDoc {
  #[serde(default)]
  title: String,
  #[serde(default)]
  city: String,
  #[serde(default)]
  district: String,
  #[serde(default)]
  country: String,
  #[serde(rename = "openAdress", default)]
  open_address: String,
  #[serde(rename = "userName")]
  user_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct PaymentDoc {
  #[serde(default)]
  title: String,
  #[serde(rename = "cartNo", default)]
  card_number: String,
  #[serde(rename = "cartName", default)]
  holder_name: String,
  #[serde(rename = "cartDate", default)]
  expiry: String,
  #[serde(rename = "cartCVC", default)]
  cvc: String,
  #[serde(rename = "userName")]
  user_name: String,
}

fn decode<T: DeserializeOwned>(doc: &StoredDocument) -> Result<T> {
  serde_json::from_value(Value::Object(doc.data.clone()))
    .map_err(|e| EatzyError::MalformedResponse(format!("document {}: {}", doc.id, e)))
}

fn encode<T: Serialize>(value: &T) -> Result<Document> {
  match serde_json::to_value(value)? {
    Value::Object(map) => Ok(map),
    other => Err(EatzyError::Internal(format!("expected a JSON object, got {}", other))),
  }
}

#[derive(Clone)]
pub struct AccountRepository {
  auth: Arc<dyn AuthProvider>,
  docs: Arc<dyn DocumentStore>,
}

impl AccountRepository {
  pub fn new(auth: Arc<dyn AuthProvider>, docs: Arc<dyn DocumentStore>) -> Self {
    Self { auth, docs }
  }

  async fn load_profile(&self, uid: &str) -> Result<UserProfile> {
    let doc = self
      .docs
      .get(USERS, uid)
      .await?
      .ok_or_else(|| EatzyError::NotFound(format!("profile for uid {}", uid)))?;
    let profile: ProfileDoc = decode(&doc)?;
    Ok(UserProfile {
      id: doc.id,
      full_name: profile.full_name,
      username: profile.user_name,
      phone: profile.phone,
    })
  }

  /// Signs in with trimmed credentials and loads the profile.
  #[instrument(name = "AccountRepository::login", skip(self, password), err(Display))]
  pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile> {
    let uid = self.auth.sign_in(email.trim(), password.trim()).await?;
    let profile = self.load_profile(&uid).await?;
    info!(username = %profile.username, "Logged in.");
    Ok(profile)
  }

  #[instrument(name = "AccountRepository::register", skip(self, password, phone), err(Display))]
  pub async fn register(
    &self,
    email: &str,
    password: &str,
    full_name: &str,
    username: &str,
    phone: &str,
  ) -> Result<UserProfile> {
    let uid = self.auth.register(email.trim(), password).await?;
    let doc = encode(&ProfileDoc {
      full_name: full_name.to_string(),
      user_name: username.to_string(),
      phone: phone.to_string(),
    })?;
    self.docs.set(USERS, &uid, doc, false).await?;
    Ok(UserProfile {
      id: uid,
      full_name: full_name.to_string(),
      username: username.to_string(),
      phone: phone.to_string(),
    })
  }

  /// Profile of the account the backend already considers signed in.
  pub async fn current_user(&self) -> Result<Option<UserProfile>> {
    match self.auth.current_uid() {
      Some(uid) => self.load_profile(&uid).await.map(Some),
      None => Ok(None),
    }
  }

  pub async fn sign_out(&self) {
    self.auth.sign_out().await;
  }

  async fn owned(&self, collection: &str, owner: &str) -> Result<Vec<StoredDocument>> {
    self.docs.query_eq(collection, OWNER_FIELD, &Value::String(owner.to_string())).await
  }

  // --- Promotions ---

  pub async fn promotions(&self, owner: &str) -> Result<Vec<Promotion>> {
    self
      .owned(PROMOTIONS, owner)
      .await?
      .iter()
      .map(|doc| decode::<PromotionDoc>(doc).map(|p| promotion_from(doc, p)))
      .collect()
  }

  // --- Locations ---

  pub async fn locations(&self, owner: &str) -> Result<Vec<Location>> {
    self
      .owned(LOCATIONS, owner)
      .await?
      .iter()
      .map(|doc| {
        decode::<LocationDoc>(doc).map(|l| Location {
          id: doc.id.clone(),
          title: l.title,
          city: l.city,
          district: l.district,
          country: l.country,
          open_address: l.open_address,
        })
      })
      .collect()
  }

  fn location_doc(location: &Location, owner: &str) -> Result<Document> {
    encode(&LocationDoc {
      title: location.title.clone(),
      city: location.city.clone(),
      district: location.district.clone(),
      country: location.country.clone(),
      open_address: location.open_address.clone(),
      user_name: owner.to_string(),
    })
  }

  pub async fn add_location(&self, location: &Location, owner: &str) -> Result<String> {
    self.docs.add(LOCATIONS, Self::location_doc(location, owner)?).await
  }

  pub async fn update_location(&self, id: &str, location: &Location, owner: &str) -> Result<()> {
    self.docs.set(LOCATIONS, id, Self::location_doc(location, owner)?, true).await
  }

  pub async fn delete_location(&self, id: &str) -> Result<()> {
    self.docs.delete(LOCATIONS, id).await
  }

  // --- Payments ---

  pub async fn payments(&self, owner: &str) -> Result<Vec<PaymentCard>> {
    self
      .owned(PAYMENTS, owner)
      .await?
      .iter()
      .map(|doc| {
        decode::<PaymentDoc>(doc).map(|p| PaymentCard {
          id: doc.id.clone(),
          title: p.title,
          card_number: p.card_number,
          holder_name: p.holder_name,
          expiry: p.expiry,
          cvc: p.cvc,
        })
      })
      .collect()
  }

  fn payment_doc(card: &PaymentCard, owner: &str) -> Result<Document> {
    encode(&PaymentDoc {
      title: card.title.clone(),
      card_number: card.card_number.clone(),
      holder_name: card.holder_name.clone(),
      expiry: card.expiry.clone(),
      cvc: card.cvc.clone(),
      user_name: owner.to_string(),
    })
  }

  pub async fn add_payment(&self, card: &PaymentCard, owner: &str) -> Result<String> {
    self.docs.add(PAYMENTS, Self::payment_doc(card, owner)?).await
  }

  pub async fn update_payment(&self, id: &str, card: &PaymentCard, owner: &str) -> Result<()> {
    self.docs.set(PAYMENTS, id, Self::payment_doc(card, owner)?, true).await
  }

  pub async fn delete_payment(&self, id: &str) -> Result<()> {
    self.docs.delete(PAYMENTS, id).await
  }
}

fn promotion_from(doc: &StoredDocument, p: PromotionDoc) -> Promotion {
  Promotion {
    id: doc.id.clone(),
    code: p.code,
    title: p.title,
    discount: p.discount,
    owner: p.user_name,
  }
}

#[async_trait]
impl PromotionLookup for AccountRepository {
  /// Global lookup by code. The first matching document wins.
  async fn find_by_code(&self, code: &str) -> Result<Option<Promotion>> {
    let docs = self.docs.query_eq(PROMOTIONS, "code", &Value::String(code.to_string())).await?;
    if docs.len() > 1 {
      warn!(code, matches = docs.len(), "Promotion code is not unique, using the first match.");
    }
    match docs.first() {
      Some(doc) => Ok(Some(promotion_from(doc, decode(doc)?))),
      None => Ok(None),
    }
  }
}
