// core/tests/promotion_tests.rs
mod common;

use async_trait::async_trait;
use common::*;
use eatzy::models::Promotion;
use eatzy::promotion::{PromotionLookup, PromotionSession};
use eatzy::{EatzyError, Result};
use serial_test::serial;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Lookup over a fixed list that counts how often it is asked.
struct CountingLookup {
  promotions: Vec<Promotion>,
  lookups: AtomicUsize,
}

impl CountingLookup {
  fn new(promotions: Vec<Promotion>) -> Arc<Self> {
    Arc::new(Self {
      promotions,
      lookups: AtomicUsize::new(0),
    })
  }

  fn lookups(&self) -> usize {
    self.lookups.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl PromotionLookup for CountingLookup {
  async fn find_by_code(&self, code: &str) -> Result<Option<Promotion>> {
    self.lookups.fetch_add(1, Ordering::SeqCst);
    Ok(self.promotions.iter().find(|p| p.code == code).cloned())
  }
}

fn promo(code: &str, discount: u8, owner: &str) -> Promotion {
  Promotion {
    id: format!("id-{}", code),
    code: code.to_string(),
    title: format!("{}% off", discount),
    discount,
    owner: owner.to_string(),
  }
}

#[tokio::test]
#[serial]
async fn owned_code_discounts_the_subtotal() {
  setup_tracing();
  let lookup = CountingLookup::new(vec![promo("SAVE20", 20, OWNER)]);
  let session = PromotionSession::new(lookup.clone());

  let discounted = session.apply("SAVE20", 100, OWNER).await.unwrap();

  assert_eq!(discounted, 80);
  assert_eq!(session.applied_count().await, 1);
  assert_eq!(session.applied_discount().await, Some(20));
  // Later subtotals get the same cut.
  assert_eq!(session.discount(250).await, 200);
}

#[tokio::test]
#[serial]
async fn discount_rounds_down_to_whole_units() {
  setup_tracing();
  let lookup = CountingLookup::new(vec![promo("TEN", 10, OWNER)]);
  let session = PromotionSession::new(lookup);

  assert_eq!(session.apply("TEN", 99, OWNER).await.unwrap(), 89);
}

#[tokio::test]
#[serial]
async fn code_is_trimmed_before_lookup() {
  setup_tracing();
  let lookup = CountingLookup::new(vec![promo("SAVE20", 20, OWNER)]);
  let session = PromotionSession::new(lookup);

  assert_eq!(session.apply("  SAVE20 ", 250, OWNER).await.unwrap(), 200);
}

#[tokio::test]
#[serial]
async fn empty_cart_is_rejected_without_a_lookup() {
  setup_tracing();
  let lookup = CountingLookup::new(vec![promo("SAVE20", 20, OWNER)]);
  let session = PromotionSession::new(lookup.clone());

  let err = session.apply("SAVE20", 0, OWNER).await.unwrap_err();

  assert!(matches!(err, EatzyError::CartEmpty));
  assert_eq!(err.user_message(), "cart is empty");
  assert_eq!(lookup.lookups(), 0);
  assert_eq!(session.applied_count().await, 0);
}

#[tokio::test]
#[serial]
async fn second_code_is_rejected_and_the_counter_holds() {
  setup_tracing();
  let lookup = CountingLookup::new(vec![promo("SAVE20", 20, OWNER), promo("TEN", 10, OWNER)]);
  let session = PromotionSession::new(lookup.clone());

  session.apply("SAVE20", 100, OWNER).await.unwrap();
  let err = session.apply("TEN", 80, OWNER).await.unwrap_err();

  assert!(matches!(err, EatzyError::PromotionAlreadyApplied));
  assert_eq!(err.user_message(), "only one promotion code allowed");
  assert_eq!(lookup.lookups(), 1);
  assert_eq!(session.applied_count().await, 1);
}

#[tokio::test]
#[serial]
async fn unknown_code_is_not_found() {
  setup_tracing();
  let lookup = CountingLookup::new(vec![promo("SAVE20", 20, OWNER)]);
  let session = PromotionSession::new(lookup);

  let err = session.apply("NOPE", 100, OWNER).await.unwrap_err();

  assert!(matches!(err, EatzyError::PromotionNotFound));
  assert_eq!(session.applied_count().await, 0);
}

#[tokio::test]
#[serial]
async fn someone_elses_code_is_refused() {
  setup_tracing();
  let lookup = CountingLookup::new(vec![promo("THEIRS10", 10, "someone_else")]);
  let session = PromotionSession::new(lookup);

  let err = session.apply("THEIRS10", 100, OWNER).await.unwrap_err();

  assert!(matches!(err, EatzyError::PromotionNotOwned));
  assert_eq!(err.user_message(), "promotion found but does not belong to you");
  // A failed attempt does not use up the one allowed code.
  assert_eq!(session.applied_count().await, 0);
  assert_eq!(session.discount(100).await, 100);
}

#[tokio::test]
#[serial]
async fn account_repository_resolves_codes_from_cloud_documents() {
  setup_tracing();
  let cloud = seeded_cloud();
  let session = PromotionSession::new(Arc::new(account_over(&cloud)));

  let err = session.apply("THEIRS10", 100, OWNER).await.unwrap_err();
  assert!(matches!(err, EatzyError::PromotionNotOwned));

  // Discount stored as a string in the seed.
  assert_eq!(session.apply("SAVE20", 150, OWNER).await.unwrap(), 120);
}
