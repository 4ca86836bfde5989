// core/src/models/location.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
  pub id: String,
  pub title: String,
  pub city: String,
  pub district: String,
  pub country: String,
  pub open_address: String,
}
