// core/src/cloud/memory.rs

//! `MemoryCloud`: an in-process auth + document backend.

use super::password::{hash_password, hasher, verify_password};
use super::{AuthProvider, Document, DocumentStore, StoredDocument, USERS};
use crate::error::{EatzyError, Result};
use argon2::Argon2;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, instrument, warn};
use uuid::Uuid;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone)]
struct Account {
  uid: String,
  password_hash: String,
}

pub struct MemoryCloud {
  argon: Argon2<'static>,
  accounts: RwLock<HashMap<String, Account>>,
  current_uid: RwLock<Option<String>>,
  // Vec keeps insertion order so "first match" queries are deterministic.
  collections: RwLock<HashMap<String, Vec<StoredDocument>>>,
}

/// Seed file layout.
#[derive(Debug, Deserialize)]
pub struct CloudSeed {
  #[serde(default)]
  pub users: Vec<SeedUser>,
  #[serde(default)]
  pub collections: HashMap<String, Vec<Document>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedUser {
  pub email: String,
  pub password: String,
  pub full_name: String,
  pub user_name: String,
  #[serde(default)]
  pub phone: String,
}

impl MemoryCloud {
  pub fn new() -> Self {
    Self::with_hasher(Argon2::default())
  }

  /// Cheap Argon2 parameters, for tests and local seeds.
  pub fn lightweight() -> Result<Self> {
    Ok(Self::with_hasher(hasher(Some((1024, 1)))?))
  }

  fn with_hasher(argon: Argon2<'static>) -> Self {
    Self {
      argon,
      accounts: RwLock::new(HashMap::new()),
      current_uid: RwLock::new(None),
      collections: RwLock::new(HashMap::new()),
    }
  }

  pub fn from_seed_file(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
      .map_err(|e| EatzyError::Config(format!("Cannot read cloud seed '{}': {}", path.display(), e)))?;
    Self::from_seed_json(&raw)
  }

  /// Loads users and documents from JSON. Users get a `Users` profile document keyed by uid.
  pub fn from_seed_json(raw: &str) -> Result<Self> {
    let seed: CloudSeed = serde_json::from_str(raw).map_err(|e| EatzyError::Config(format!("Invalid cloud seed: {}", e)))?;
    let cloud = Self::lightweight()?;

    for user in seed.users {
      let uid = cloud.create_account(&user.email, &user.password)?;
      let mut profile = Document::new();
      profile.insert("fullName".into(), Value::String(user.full_name));
      profile.insert("userName".into(), Value::String(user.user_name));
      profile.insert("phone".into(), Value::String(user.phone));
      cloud.put(USERS, &uid, profile, false);
    }

    for (collection, docs) in seed.collections {
      for mut doc in docs {
        let id = match doc.remove("id") {
          Some(Value::String(id)) => id,
          _ => Uuid::new_v4().to_string(),
        };
        cloud.put(&collection, &id, doc, false);
      }
    }

    info!(accounts = cloud.accounts.read().len(), "Cloud seed loaded.");
    Ok(cloud)
  }

  fn create_account(&self, email: &str, password: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    if !email.contains('@') {
      return Err(EatzyError::Auth("The email address is badly formatted.".to_string()));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
      return Err(EatzyError::Auth(format!(
        "Password should be at least {} characters.",
        MIN_PASSWORD_LEN
      )));
    }
    if self.accounts.read().contains_key(&email) {
      return Err(EatzyError::Auth("The email address is already in use by another account.".to_string()));
    }
    let password_hash = hash_password(&self.argon, password)?;
    let uid = Uuid::new_v4().simple().to_string();
    self.accounts.write().insert(
      email,
      Account {
        uid: uid.clone(),
        password_hash,
      },
    );
    Ok(uid)
  }

  fn put(&self, collection: &str, id: &str, doc: Document, merge: bool) {
    let mut collections = self.collections.write();
    let docs = collections.entry(collection.to_string()).or_default();
    match docs.iter_mut().find(|d| d.id == id) {
      Some(existing) if merge => existing.data.extend(doc),
      Some(existing) => existing.data = doc,
      None => docs.push(StoredDocument {
        id: id.to_string(),
        data: doc,
      }),
    }
  }

  pub fn document_count(&self, collection: &str) -> usize {
    self.collections.read().get(collection).map_or(0, Vec::len)
  }
}

impl Default for MemoryCloud {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl AuthProvider for MemoryCloud {
  #[instrument(name = "MemoryCloud::sign_in", skip(self, password), err(Display))]
  async fn sign_in(&self, email: &str, password: &str) -> Result<String> {
    let account = self.accounts.read().get(&email.trim().to_lowercase()).cloned();
    let Some(account) = account else {
      warn!("Sign-in for unknown account.");
      return Err(EatzyError::Auth("Invalid email or password.".to_string()));
    };
    if !verify_password(&self.argon, &account.password_hash, password)? {
      return Err(EatzyError::Auth("Invalid email or password.".to_string()));
    }
    *self.current_uid.write() = Some(account.uid.clone());
    Ok(account.uid)
  }

  #[instrument(name = "MemoryCloud::register", skip(self, password), err(Display))]
  async fn register(&self, email: &str, password: &str) -> Result<String> {
    let uid = self.create_account(email, password)?;
    *self.current_uid.write() = Some(uid.clone());
    Ok(uid)
  }

  fn current_uid(&self) -> Option<String> {
    self.current_uid.read().clone()
  }

  async fn sign_out(&self) {
    self.current_uid.write().take();
  }
}

#[async_trait]
impl DocumentStore for MemoryCloud {
  async fn query_eq(&self, collection: &str, field: &str, value: &Value) -> Result<Vec<StoredDocument>> {
    let collections = self.collections.read();
    Ok(
      collections
        .get(collection)
        .map(|docs| docs.iter().filter(|d| d.data.get(field) == Some(value)).cloned().collect())
        .unwrap_or_default(),
    )
  }

  async fn get(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>> {
    let collections = self.collections.read();
    Ok(collections.get(collection).and_then(|docs| docs.iter().find(|d| d.id == id).cloned()))
  }

  async fn add(&self, collection: &str, doc: Document) -> Result<String> {
    let id = Uuid::new_v4().simple().to_string();
    self.put(collection, &id, doc, false);
    Ok(id)
  }

  async fn set(&self, collection: &str, id: &str, doc: Document, merge: bool) -> Result<()> {
    self.put(collection, id, doc, merge);
    Ok(())
  }

  async fn delete(&self, collection: &str, id: &str) -> Result<()> {
    if let Some(docs) = self.collections.write().get_mut(collection) {
      docs.retain(|d| d.id != id);
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[tokio::test]
  async fn merge_keeps_untouched_fields() {
    let cloud = MemoryCloud::lightweight().unwrap();
    let mut doc = Document::new();
    doc.insert("title".into(), json!("Home"));
    doc.insert("city".into(), json!("Izmir"));
    let id = cloud.add("Locations", doc).await.unwrap();

    let mut patch = Document::new();
    patch.insert("title".into(), json!("Office"));
    cloud.set("Locations", &id, patch, true).await.unwrap();

    let stored = cloud.get("Locations", &id).await.unwrap().unwrap();
    assert_eq!(stored.data["title"], json!("Office"));
    assert_eq!(stored.data["city"], json!("Izmir"));
  }

  #[tokio::test]
  async fn seeded_users_can_sign_in() {
    let cloud = MemoryCloud::from_seed_json(
      r#"{"users":[{"email":"ayse@example.com","password":"Secret123","fullName":"Ayse Kaya","userName":"ayse_k"}],
          "collections":{"Promotions":[{"id":"p1","code":"WELCOME","title":"Welcome","discount":20,"userName":"ayse_k"}]}}"#,
    )
    .unwrap();

    let uid = cloud.sign_in("ayse@example.com", "Secret123").await.unwrap();
    assert_eq!(cloud.current_uid(), Some(uid.clone()));
    assert!(cloud.get(USERS, &uid).await.unwrap().is_some());
    assert_eq!(cloud.document_count("Promotions"), 1);
    assert!(matches!(
      cloud.sign_in("ayse@example.com", "wrong-pass").await,
      Err(EatzyError::Auth(_))
    ));
  }
}
