// core/src/session.rs

//! The signed-in user and the cart badge, shared by every screen controller.
//!
//! The application controller creates one `Session` and hands a clone to each controller
//! it constructs. Clones share state.

use crate::error::{EatzyError, Result};
use crate::models::UserProfile;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Default, Clone)]
pub struct SessionState {
  pub user: Option<UserProfile>,
  /// Total quantity across the cart, shown on the cart tab.
  pub cart_badge: u32,
}

#[derive(Debug, Clone, Default)]
pub struct Session(Arc<RwLock<SessionState>>);

impl Session {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn signed_in(user: UserProfile) -> Self {
    let session = Self::new();
    session.sign_in(user);
    session
  }

  pub fn sign_in(&self, user: UserProfile) {
    info!(username = %user.username, "Session signed in.");
    self.0.write().user = Some(user);
  }

  /// Clears the user and resets the badge.
  pub fn sign_out(&self) {
    let mut state = self.0.write();
    if let Some(user) = state.user.take() {
      info!(username = %user.username, "Session signed out.");
    }
    state.cart_badge = 0;
  }

  pub fn current_user(&self) -> Option<UserProfile> {
    self.0.read().user.clone()
  }

  pub fn is_signed_in(&self) -> bool {
    self.0.read().user.is_some()
  }

  /// Username of the signed-in user, the owner id of every per-user record.
  pub fn owner_id(&self) -> Result<String> {
    self
      .0
      .read()
      .user
      .as_ref()
      .map(|u| u.username.clone())
      .ok_or(EatzyError::NotSignedIn)
  }

  pub fn cart_badge(&self) -> u32 {
    self.0.read().cart_badge
  }

  pub fn set_cart_badge(&self, count: u32) {
    self.0.write().cart_badge = count;
  }

  pub fn snapshot(&self) -> SessionState {
    self.0.read().clone()
  }
}
