// app/src/state.rs

use crate::config::AppConfig;
use crate::errors::Result;
use eatzy::account::AccountRepository;
use eatzy::cart::CartRepository;
use eatzy::catalog::CatalogRepository;
use eatzy::cloud::MemoryCloud;
use eatzy::remote::{FoodApi, HttpFoodApi};
use eatzy::store::FavoriteStore;
use eatzy::Session;
use std::sync::Arc;

/// Everything a screen controller needs, built once per process.
#[derive(Clone)]
pub struct AppState {
  pub config: Arc<AppConfig>,
  pub session: Session,
  pub cart: CartRepository,
  pub catalog: CatalogRepository,
  pub account: AccountRepository,
}

impl AppState {
  pub async fn build(config: Arc<AppConfig>) -> Result<Self> {
    let api: Arc<dyn FoodApi> = match config.http_timeout {
      Some(timeout) => Arc::new(HttpFoodApi::with_timeout(&config.api_base_url, timeout)?),
      None => Arc::new(HttpFoodApi::new(&config.api_base_url)),
    };

    let cloud = Arc::new(match &config.cloud_seed {
      Some(path) => MemoryCloud::from_seed_file(path)?,
      None => MemoryCloud::new(),
    });
    let favorites = FavoriteStore::connect(&config.favorites_db_url).await?;

    Ok(Self {
      session: Session::new(),
      cart: CartRepository::new(api.clone()),
      catalog: CatalogRepository::new(api, favorites),
      account: AccountRepository::new(cloud.clone(), cloud),
      config,
    })
  }
}
