// core/tests/cart_reconciliation_tests.rs
mod common;

use common::*;
use eatzy::cart::{CartRepository, RemoteCall};
use eatzy::models::CartLineItem;
use eatzy::EatzyError;
use serial_test::serial;

fn line_of(api: &RecordingFoodApi, name: &str) -> CartLineItem {
  api
    .cart_of(OWNER)
    .into_iter()
    .find(|l| l.name == name)
    .expect("line should be in the cart")
}

#[tokio::test]
#[serial]
async fn increase_replaces_the_line_with_one_more() {
  setup_tracing();
  let api = RecordingFoodApi::new();
  let burger_id = api.seed_line(OWNER, "Burger", 120.0, 2);
  let repo = CartRepository::new(api.clone());

  let displayed = line_of(&api, "Burger");
  let outcome = repo.increase(&displayed, OWNER).await.unwrap();

  assert_eq!(
    api.mutations(),
    vec![
      ApiCall::Remove { line_id: burger_id },
      ApiCall::Add {
        name: "Burger".to_string(),
        quantity: 3
      },
    ]
  );
  assert_eq!(outcome.quantity, Some(3));
  assert_eq!(
    outcome.calls,
    vec![RemoteCall::Remove { line_id: burger_id }, RemoteCall::Add { quantity: 3 }]
  );
  let cart = api.cart_of(OWNER);
  assert_eq!(cart.len(), 1);
  assert_eq!(cart[0].quantity, 3);
}

#[tokio::test]
#[serial]
async fn increase_uses_the_remote_quantity_over_a_stale_display() {
  setup_tracing();
  let api = RecordingFoodApi::new();
  api.seed_line(OWNER, "Kebab", 150.0, 4);
  let repo = CartRepository::new(api.clone());

  let stale = line_of(&api, "Kebab").with_quantity(1);
  let outcome = repo.increase(&stale, OWNER).await.unwrap();

  assert_eq!(outcome.quantity, Some(5));
}

#[tokio::test]
#[serial]
async fn adding_the_same_food_merges_into_one_line() {
  setup_tracing();
  let api = RecordingFoodApi::new();
  let repo = CartRepository::new(api.clone());
  let kebab = sample_catalog().into_iter().find(|f| f.name == "Kebab").unwrap();

  repo.add(&kebab.to_line_item(2), OWNER).await.unwrap();
  let first_id = line_of(&api, "Kebab").id;
  let outcome = repo.add(&kebab.to_line_item(1), OWNER).await.unwrap();

  assert_eq!(outcome.calls, vec![RemoteCall::Remove { line_id: first_id }, RemoteCall::Add { quantity: 3 }]);
  let cart = api.cart_of(OWNER);
  assert_eq!(cart.len(), 1);
  assert_eq!(cart[0].quantity, 3);
}

#[tokio::test]
#[serial]
async fn add_then_remove_leaves_an_empty_cart() {
  setup_tracing();
  let api = RecordingFoodApi::new();
  let repo = CartRepository::new(api.clone());
  let ayran = sample_catalog().into_iter().find(|f| f.name == "Ayran").unwrap();

  repo.add(&ayran.to_line_item(1), OWNER).await.unwrap();
  let outcome = repo.remove(&line_of(&api, "Ayran"), OWNER).await.unwrap();

  assert_eq!(outcome.quantity, None);
  assert!(api.cart_of(OWNER).is_empty());
}

#[tokio::test]
#[serial]
async fn decrease_from_one_only_removes() {
  setup_tracing();
  let api = RecordingFoodApi::new();
  let id = api.seed_line(OWNER, "Baklava", 80.5, 1);
  let repo = CartRepository::new(api.clone());

  let outcome = repo.decrease(&line_of(&api, "Baklava"), OWNER).await.unwrap();

  assert_eq!(api.mutations(), vec![ApiCall::Remove { line_id: id }]);
  assert_eq!(outcome.quantity, None);
  assert!(api.cart_of(OWNER).is_empty());
}

#[tokio::test]
#[serial]
async fn decrease_from_three_leaves_two() {
  setup_tracing();
  let api = RecordingFoodApi::new();
  api.seed_line(OWNER, "Burger", 120.0, 3);
  let repo = CartRepository::new(api.clone());

  let outcome = repo.decrease(&line_of(&api, "Burger"), OWNER).await.unwrap();

  assert_eq!(outcome.quantity, Some(2));
  assert_eq!(line_of(&api, "Burger").quantity, 2);
}

#[tokio::test]
#[serial]
async fn remove_entirely_deletes_duplicate_lines() {
  setup_tracing();
  let api = RecordingFoodApi::new();
  let first = api.seed_line(OWNER, "Ayran", 30.0, 1);
  let second = api.seed_line(OWNER, "Ayran", 30.0, 2);
  api.seed_line(OWNER, "Kebab", 150.0, 1);
  let repo = CartRepository::new(api.clone());

  repo.remove(&line_of(&api, "Ayran"), OWNER).await.unwrap();

  assert_eq!(
    api.mutations(),
    vec![ApiCall::Remove { line_id: first }, ApiCall::Remove { line_id: second }]
  );
  let names: Vec<String> = api.cart_of(OWNER).into_iter().map(|l| l.name).collect();
  assert_eq!(names, vec!["Kebab"]);
}

#[tokio::test]
#[serial]
async fn mutations_require_an_owner() {
  setup_tracing();
  let api = RecordingFoodApi::new();
  let repo = CartRepository::new(api.clone());
  let item = sample_catalog()[0].to_line_item(1);

  let err = repo.add(&item, "").await.unwrap_err();

  assert!(matches!(err, EatzyError::NotSignedIn));
  assert!(api.calls().is_empty());
}

#[tokio::test]
#[serial]
async fn concurrent_increases_for_one_owner_do_not_lose_updates() {
  setup_tracing();
  let api = RecordingFoodApi::new();
  api.seed_line(OWNER, "Burger", 120.0, 2);
  let repo = CartRepository::new(api.clone());
  let displayed = line_of(&api, "Burger");

  let (a, b) = tokio::join!(repo.increase(&displayed, OWNER), repo.increase(&displayed, OWNER));
  a.unwrap();
  b.unwrap();

  let cart = api.cart_of(OWNER);
  assert_eq!(cart.len(), 1);
  assert_eq!(cart[0].quantity, 4);
  // The per-owner lock is dropped once nobody waits on it.
  assert_eq!(repo.busy_owners(), 0);
}

#[tokio::test]
#[serial]
async fn clear_deletes_every_displayed_line() {
  setup_tracing();
  let api = RecordingFoodApi::new();
  api.seed_line(OWNER, "Burger", 120.0, 2);
  api.seed_line(OWNER, "Ayran", 30.0, 1);
  let repo = CartRepository::new(api.clone());

  let lines = repo.list(OWNER).await.unwrap();
  let deleted = repo.clear(&lines, OWNER).await.unwrap();

  assert_eq!(deleted, 2);
  assert!(api.cart_of(OWNER).is_empty());
}

#[tokio::test]
#[serial]
async fn clear_reports_partial_failure_after_trying_every_line() {
  setup_tracing();
  let api = RecordingFoodApi::new();
  let stuck = api.seed_line(OWNER, "Burger", 120.0, 2);
  let other = api.seed_line(OWNER, "Ayran", 30.0, 1);
  api.fail_remove_of(stuck);
  let repo = CartRepository::new(api.clone());

  let lines = repo.list(OWNER).await.unwrap();
  let err = repo.clear(&lines, OWNER).await.unwrap_err();

  match err {
    EatzyError::ClearCartIncomplete { deleted, expected } => {
      assert_eq!(deleted, 1);
      assert_eq!(expected, 2);
    }
    other => panic!("expected ClearCartIncomplete, got {:?}", other),
  }
  assert_eq!(
    api.mutations(),
    vec![ApiCall::Remove { line_id: stuck }, ApiCall::Remove { line_id: other }]
  );
  assert_eq!(api.cart_of(OWNER).len(), 1);
}

#[tokio::test]
#[serial]
async fn subtotal_uses_whole_unit_prices_and_updates_the_badge() {
  setup_tracing();
  let api = RecordingFoodApi::new();
  api.seed_line(OWNER, "Burger", 120.0, 2);
  api.seed_line(OWNER, "Baklava", 80.5, 1);
  let repo = CartRepository::new(api.clone());
  let session = signed_in_session();

  let subtotal = repo.subtotal(OWNER, &session).await;

  assert_eq!(subtotal, 320);
  assert_eq!(session.cart_badge(), 3);
}

#[tokio::test]
#[serial]
async fn subtotal_reads_zero_when_the_cart_is_unavailable() {
  setup_tracing();
  let api = RecordingFoodApi::new();
  api.seed_line(OWNER, "Burger", 120.0, 2);
  api.fail_listing(true);
  let repo = CartRepository::new(api.clone());

  assert_eq!(repo.subtotal(OWNER, &signed_in_session()).await, 0);
}

#[tokio::test]
#[serial]
async fn failed_cart_fetch_is_returned_and_nothing_is_changed() {
  setup_tracing();
  let api = RecordingFoodApi::new();
  api.seed_line(OWNER, "Burger", 120.0, 2);
  let repo = CartRepository::new(api.clone());
  let displayed = line_of(&api, "Burger");
  let kebab = sample_catalog().into_iter().find(|f| f.name == "Kebab").unwrap();
  api.fail_listing(true);

  for result in [
    repo.increase(&displayed, OWNER).await,
    repo.decrease(&displayed, OWNER).await,
    repo.add(&kebab.to_line_item(1), OWNER).await,
    repo.remove(&displayed, OWNER).await,
  ] {
    match result {
      Err(EatzyError::Remote(message)) => assert_eq!(message, "listing unavailable"),
      other => panic!("expected the listing error, got {:?}", other),
    }
  }

  assert!(api.mutations().is_empty());
  assert_eq!(api.cart_of(OWNER), vec![displayed]);
  assert_eq!(repo.busy_owners(), 0);
}
