// core/src/remote/http.rs

//! `FoodApi` over HTTP with form-encoded requests.

use super::dto::{AckResponse, AddToCartForm, CartListResponse, FoodListResponse, OwnerForm, RemoveFromCartForm};
use super::FoodApi;
use crate::error::{EatzyError, Result};
use crate::models::{CartLineItem, CatalogItem};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, instrument, warn};

const LIST_FOODS: &str = "tumYemekleriGetir.php";
const ADD_TO_CART: &str = "sepeteYemekEkle.php";
const LIST_CART: &str = "sepettekiYemekleriGetir.php";
const REMOVE_FROM_CART: &str = "sepettenYemekSil.php";

pub const DEFAULT_BASE_URL: &str = "http://kasimadalan.pe.hu/yemekler/";

#[derive(Debug, Clone)]
pub struct HttpFoodApi {
  client: Client,
  base_url: String,
}

impl HttpFoodApi {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self::with_client(base_url, Client::new())
  }

  /// Builds a client with a request timeout. Without one, reqwest's defaults apply.
  pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
    let client = Client::builder().timeout(timeout).build()?;
    Ok(Self::with_client(base_url, client))
  }

  pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
    let mut base_url = base_url.into();
    if !base_url.ends_with('/') {
      base_url.push('/');
    }
    Self { client, base_url }
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  fn url(&self, endpoint: &str) -> String {
    format!("{}{}", self.base_url, endpoint)
  }

  async fn checked_body(resp: Response, endpoint: &str) -> Result<String> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
      return Err(EatzyError::Remote(format!("{} returned {}: {}", endpoint, status, body.trim())));
    }
    Ok(body)
  }

  fn note_success_flag(endpoint: &str, success: Option<i64>) {
    // Advisory only.
    if success == Some(0) {
      warn!(endpoint, "Remote reported success=0.");
    }
  }
}

#[async_trait]
impl FoodApi for HttpFoodApi {
  #[instrument(name = "HttpFoodApi::list_catalog", skip(self), err(Display))]
  async fn list_catalog(&self) -> Result<Vec<CatalogItem>> {
    let resp = self.client.get(self.url(LIST_FOODS)).send().await?;
    let body = Self::checked_body(resp, LIST_FOODS).await?;
    let parsed: FoodListResponse = serde_json::from_str(&body)?;
    Self::note_success_flag(LIST_FOODS, parsed.success);
    debug!(count = parsed.foods.len(), "Catalog fetched.");
    Ok(parsed.foods.into_iter().map(CatalogItem::from).collect())
  }

  #[instrument(name = "HttpFoodApi::add_to_cart", skip(self, item), fields(name = %item.name), err(Display))]
  async fn add_to_cart(&self, item: &CartLineItem, quantity: u32, owner: &str) -> Result<()> {
    let form = AddToCartForm {
      yemek_adi: &item.name,
      yemek_resim_adi: &item.image,
      yemek_fiyat: item.whole_unit_price(),
      yemek_siparis_adet: quantity,
      kullanici_adi: owner,
    };
    let resp = self.client.post(self.url(ADD_TO_CART)).form(&form).send().await?;
    let body = Self::checked_body(resp, ADD_TO_CART).await?;
    if let Ok(ack) = serde_json::from_str::<AckResponse>(&body) {
      Self::note_success_flag(ADD_TO_CART, ack.success);
      if let Some(message) = ack.message {
        debug!(%message, "Add acknowledged.");
      }
    }
    Ok(())
  }

  #[instrument(name = "HttpFoodApi::list_cart", skip(self), err(Display))]
  async fn list_cart(&self, owner: &str) -> Result<Vec<CartLineItem>> {
    let form = OwnerForm { kullanici_adi: owner };
    let resp = self.client.post(self.url(LIST_CART)).form(&form).send().await?;
    let body = Self::checked_body(resp, LIST_CART).await?;

    // The service answers an empty cart with an empty body instead of an empty list.
    if body.trim().is_empty() {
      debug!("Empty body for cart listing, treating as an empty cart.");
      return Ok(Vec::new());
    }
    let parsed: CartListResponse = match serde_json::from_str(&body) {
      Ok(parsed) => parsed,
      Err(e) if e.is_eof() => {
        debug!(error = %e, "Cart listing ended early, treating as an empty cart.");
        return Ok(Vec::new());
      }
      Err(e) => return Err(e.into()),
    };
    Self::note_success_flag(LIST_CART, parsed.success);
    parsed.lines.into_iter().map(CartLineItem::try_from).collect()
  }

  #[instrument(name = "HttpFoodApi::remove_from_cart", skip(self), err(Display))]
  async fn remove_from_cart(&self, line_id: i64, owner: &str) -> Result<()> {
    let form = RemoveFromCartForm {
      sepet_yemek_id: line_id,
      kullanici_adi: owner,
    };
    let resp = self.client.post(self.url(REMOVE_FROM_CART)).form(&form).send().await?;
    let body = Self::checked_body(resp, REMOVE_FROM_CART).await?;
    if let Ok(ack) = serde_json::from_str::<AckResponse>(&body) {
      Self::note_success_flag(REMOVE_FROM_CART, ack.success);
    }
    Ok(())
  }
}
