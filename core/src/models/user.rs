// core/src/models/user.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
  /// Auth uid.
  pub id: String,
  pub full_name: String,
  /// Owner id for every per-user record.
  pub username: String,
  pub phone: String,
}
