// app/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use eatzy::remote::http::DEFAULT_BASE_URL;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_FAVORITES_DB_URL: &str = "sqlite://eatzy_favorites.db";

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub api_base_url: String,
  pub favorites_db_url: String,
  /// JSON seed for the in-process cloud backend.
  pub cloud_seed: Option<PathBuf>,
  /// No client-side timeout when unset.
  pub http_timeout: Option<Duration>,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| env::var(var_name).ok().filter(|v| !v.trim().is_empty());

    let api_base_url = get_env("EATZY_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
      return Err(AppError::Config(format!(
        "EATZY_API_BASE_URL must be an http(s) URL, got '{}'",
        api_base_url
      )));
    }
    let favorites_db_url = get_env("EATZY_FAVORITES_DB_URL").unwrap_or_else(|| DEFAULT_FAVORITES_DB_URL.to_string());
    let cloud_seed = get_env("EATZY_CLOUD_SEED").map(PathBuf::from);
    let http_timeout = get_env("EATZY_HTTP_TIMEOUT_SECS")
      .map(|raw| {
        raw
          .trim()
          .parse::<u64>()
          .map(Duration::from_secs)
          .map_err(|e| AppError::Config(format!("Invalid EATZY_HTTP_TIMEOUT_SECS: {}", e)))
      })
      .transpose()?;

    tracing::info!(api = %api_base_url, favorites = %favorites_db_url, "Application configuration loaded.");

    Ok(Self {
      api_base_url,
      favorites_db_url,
      cloud_seed,
      http_timeout,
    })
  }
}
