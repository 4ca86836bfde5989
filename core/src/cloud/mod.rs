// core/src/cloud/mod.rs

//! Auth and document backend abstractions.
//!
//! Documents are flat JSON objects grouped in named collections, queried by field equality
//! and written with whole-document set or merge. `MemoryCloud` is the in-process backend.

pub mod memory;
pub mod password;

use crate::error::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

pub use memory::MemoryCloud;

pub type Document = Map<String, Value>;

pub const USERS: &str = "Users";
pub const PROMOTIONS: &str = "Promotions";
pub const LOCATIONS: &str = "Locations";
pub const PAYMENTS: &str = "Payments";

/// Field holding the owner id on every per-user collection.
pub const OWNER_FIELD: &str = "userName";

#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
  pub id: String,
  pub data: Document,
}

/// Email/password authentication.
#[async_trait]
pub trait AuthProvider: Send + Sync {
  /// Returns the uid of the signed-in account.
  async fn sign_in(&self, email: &str, password: &str) -> Result<String>;

  /// Creates an account, signs it in and returns its uid.
  async fn register(&self, email: &str, password: &str) -> Result<String>;

  fn current_uid(&self) -> Option<String>;

  async fn sign_out(&self);
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
  /// Documents of `collection` whose `field` equals `value`, in insertion order.
  async fn query_eq(&self, collection: &str, field: &str, value: &Value) -> Result<Vec<StoredDocument>>;

  async fn get(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>>;

  /// Stores `doc` under a generated id and returns it.
  async fn add(&self, collection: &str, doc: Document) -> Result<String>;

  /// Writes `doc` under `id`. With `merge`, fields are merged into an existing document
  /// instead of replacing it.
  async fn set(&self, collection: &str, id: &str, doc: Document, merge: bool) -> Result<()>;

  async fn delete(&self, collection: &str, id: &str) -> Result<()>;
}
