// core/src/cloud/password.rs

//! Password hashing for the in-process auth backend.

use crate::error::EatzyError;
use argon2::{
  password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
  Algorithm, Argon2, Params, Version,
};
use tracing::{debug, error, instrument};

/// Builds an Argon2id hasher. `None` uses the library defaults.
pub fn hasher(params: Option<(u32, u32)>) -> Result<Argon2<'static>, EatzyError> {
  match params {
    None => Ok(Argon2::default()),
    Some((m_cost, t_cost)) => {
      let params = Params::new(m_cost, t_cost, 1, None)
        .map_err(|e| EatzyError::Config(format!("Invalid Argon2 parameters: {}", e)))?;
      Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
  }
}

#[instrument(name = "password::hash_password", skip_all, err(Display))]
pub fn hash_password(argon: &Argon2<'_>, password: &str) -> Result<String, EatzyError> {
  if password.is_empty() {
    return Err(EatzyError::Validation("Password cannot be empty.".to_string()));
  }
  let salt = SaltString::generate(&mut OsRng);
  argon
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|e| {
      error!(error = %e, "Argon2 password hashing failed.");
      EatzyError::Internal(format!("Password hashing failed: {}", e))
    })
}

/// `Ok(false)` on a plain mismatch; `Err` only when the stored hash is unusable.
#[instrument(name = "password::verify_password", skip_all, err(Display))]
pub fn verify_password(argon: &Argon2<'_>, stored_hash: &str, provided: &str) -> Result<bool, EatzyError> {
  let parsed = PasswordHash::new(stored_hash).map_err(|e| {
    error!(error = %e, "Stored password hash is unreadable.");
    EatzyError::Internal(format!("Invalid stored password hash: {}", e))
  })?;

  match argon.verify_password(provided.as_bytes(), &parsed) {
    Ok(()) => Ok(true),
    Err(argon2::password_hash::Error::Password) => {
      debug!("Password mismatch.");
      Ok(false)
    }
    Err(e) => Err(EatzyError::Internal(format!("Password verification failed: {}", e))),
  }
}
