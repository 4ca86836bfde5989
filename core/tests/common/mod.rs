// core/tests/common/mod.rs
#![allow(dead_code)] // Each test binary uses a different slice of these helpers.

use async_trait::async_trait;
use eatzy::account::AccountRepository;
use eatzy::cloud::MemoryCloud;
use eatzy::models::{CartLineItem, CatalogItem, UserProfile};
use eatzy::remote::FoodApi;
use eatzy::{EatzyError, Result, Session};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::Level;

// --- Tracing ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Recording fake of the remote food/cart service ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
  ListCatalog,
  ListCart,
  Add { name: String, quantity: u32 },
  Remove { line_id: i64 },
}

#[derive(Default)]
struct FakeBackend {
  catalog: Vec<CatalogItem>,
  carts: HashMap<String, Vec<CartLineItem>>,
  next_line_id: i64,
  calls: Vec<ApiCall>,
  failing_removes: HashSet<i64>,
  fail_listing: bool,
}

/// In-memory stand-in for the remote service. Every call is logged in order.
#[derive(Default)]
pub struct RecordingFoodApi {
  inner: Mutex<FakeBackend>,
}

impl RecordingFoodApi {
  pub fn new() -> Arc<Self> {
    let api = Self::default();
    {
      let mut inner = api.inner.lock();
      inner.catalog = sample_catalog();
      inner.next_line_id = 100;
    }
    Arc::new(api)
  }

  /// Puts a line straight into the owner's cart without logging a call. Returns its id.
  pub fn seed_line(&self, owner: &str, name: &str, unit_price: f64, quantity: u32) -> i64 {
    let mut inner = self.inner.lock();
    inner.next_line_id += 1;
    let id = inner.next_line_id;
    inner.carts.entry(owner.to_string()).or_default().push(CartLineItem {
      id,
      name: name.to_string(),
      image: format!("{}.png", name.to_lowercase()),
      unit_price,
      quantity,
    });
    id
  }

  pub fn fail_remove_of(&self, line_id: i64) {
    self.inner.lock().failing_removes.insert(line_id);
  }

  pub fn fail_listing(&self, fail: bool) {
    self.inner.lock().fail_listing = fail;
  }

  pub fn calls(&self) -> Vec<ApiCall> {
    self.inner.lock().calls.clone()
  }

  /// Calls that changed the cart, in order.
  pub fn mutations(&self) -> Vec<ApiCall> {
    self
      .calls()
      .into_iter()
      .filter(|c| matches!(c, ApiCall::Add { .. } | ApiCall::Remove { .. }))
      .collect()
  }

  pub fn clear_log(&self) {
    self.inner.lock().calls.clear();
  }

  pub fn cart_of(&self, owner: &str) -> Vec<CartLineItem> {
    self.inner.lock().carts.get(owner).cloned().unwrap_or_default()
  }
}

#[async_trait]
impl FoodApi for RecordingFoodApi {
  async fn list_catalog(&self) -> Result<Vec<CatalogItem>> {
    let mut inner = self.inner.lock();
    inner.calls.push(ApiCall::ListCatalog);
    Ok(inner.catalog.clone())
  }

  async fn add_to_cart(&self, item: &CartLineItem, quantity: u32, owner: &str) -> Result<()> {
    let mut inner = self.inner.lock();
    inner.calls.push(ApiCall::Add {
      name: item.name.clone(),
      quantity,
    });
    inner.next_line_id += 1;
    let id = inner.next_line_id;
    inner.carts.entry(owner.to_string()).or_default().push(CartLineItem {
      id,
      quantity,
      ..item.clone()
    });
    Ok(())
  }

  async fn list_cart(&self, owner: &str) -> Result<Vec<CartLineItem>> {
    let mut inner = self.inner.lock();
    inner.calls.push(ApiCall::ListCart);
    if inner.fail_listing {
      return Err(EatzyError::Remote("listing unavailable".to_string()));
    }
    Ok(inner.carts.get(owner).cloned().unwrap_or_default())
  }

  async fn remove_from_cart(&self, line_id: i64, owner: &str) -> Result<()> {
    let mut inner = self.inner.lock();
    inner.calls.push(ApiCall::Remove { line_id });
    if inner.failing_removes.contains(&line_id) {
      return Err(EatzyError::Remote(format!("cannot delete line {}", line_id)));
    }
    if let Some(lines) = inner.carts.get_mut(owner) {
      lines.retain(|l| l.id != line_id);
    }
    Ok(())
  }
}

// --- Fixtures ---

pub const OWNER: &str = "hungry_hippo";
pub const OWNER_EMAIL: &str = "hippo@eatzy.test";
pub const OWNER_PASSWORD: &str = "Passw0rdOk";

pub fn sample_catalog() -> Vec<CatalogItem> {
  [(1, "Ayran", 30.0), (2, "Burger", 120.0), (3, "Kebab", 150.0), (4, "Baklava", 80.5)]
    .into_iter()
    .map(|(id, name, price)| CatalogItem {
      id,
      name: name.to_string(),
      image: format!("{}.png", name.to_lowercase()),
      price,
      is_favorite: false,
      rating: 0.0,
    })
    .collect()
}

pub fn profile(username: &str) -> UserProfile {
  UserProfile {
    id: format!("uid-{}", username),
    full_name: "Hungry Hippo".to_string(),
    username: username.to_string(),
    phone: "5321234567".to_string(),
  }
}

pub fn signed_in_session() -> Session {
  Session::signed_in(profile(OWNER))
}

/// A cloud with one account for `OWNER`, two promotions and one card.
pub fn seeded_cloud() -> Arc<MemoryCloud> {
  let seed = serde_json::json!({
    "users": [{
      "email": OWNER_EMAIL,
      "password": OWNER_PASSWORD,
      "fullName": "Hungry Hippo",
      "userName": OWNER,
      "phone": "5321234567"
    }],
    "collections": {
      "Promotions": [
        { "id": "promo-mine", "code": "SAVE20", "title": "Twenty off", "discount": "20", "userName": OWNER },
        { "id": "promo-theirs", "code": "THEIRS10", "title": "Not yours", "discount": 10, "userName": "someone_else" }
      ],
      "Payments": [
        { "id": "card-1", "title": "Work", "cartNo": "4111111111111111", "cartName": "Hungry Hippo",
          "cartDate": "1228", "cartCVC": "123", "userName": OWNER }
      ]
    }
  });
  Arc::new(MemoryCloud::from_seed_json(&seed.to_string()).expect("seed must load"))
}

pub fn account_over(cloud: &Arc<MemoryCloud>) -> AccountRepository {
  AccountRepository::new(cloud.clone(), cloud.clone())
}
