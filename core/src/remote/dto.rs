// core/src/remote/dto.rs

//! Wire shapes of the remote food/cart API.

use crate::error::EatzyError;
use crate::models::{CartLineItem, CatalogItem};
use serde::{Deserialize, Deserializer, Serialize};

/// The service sends numbers as strings most of the time and as numbers sometimes.
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient {
  Int(i64),
  Float(f64),
  Text(String),
}

impl Lenient {
  fn into_i64<E: serde::de::Error>(self) -> Result<i64, E> {
    match self {
      Lenient::Int(v) => Ok(v),
      Lenient::Float(v) => Ok(v as i64),
      Lenient::Text(s) => s.trim().parse::<i64>().map_err(E::custom),
    }
  }
}

fn lenient_i64<'de, D: Deserializer<'de>>(de: D) -> Result<i64, D::Error> {
  Lenient::deserialize(de)?.into_i64()
}

/// Missing and `null` both read as absent.
fn lenient_opt_i64<'de, D: Deserializer<'de>>(de: D) -> Result<Option<i64>, D::Error> {
  Option::<Lenient>::deserialize(de)?.map(Lenient::into_i64).transpose()
}

/// Lists the service sends as `null` read as empty.
fn null_as_empty<'de, D, T>(de: D) -> Result<Vec<T>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  Ok(Option::<Vec<T>>::deserialize(de)?.unwrap_or_default())
}

fn lenient_f64<'de, D: Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
  match Lenient::deserialize(de)? {
    Lenient::Int(v) => Ok(v as f64),
    Lenient::Float(v) => Ok(v),
    Lenient::Text(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
  }
}

#[derive(Debug, Deserialize)]
pub struct FoodDto {
  #[serde(rename = "yemek_id", deserialize_with = "lenient_i64")]
  pub id: i64,
  #[serde(rename = "yemek_adi")]
  pub name: String,
  #[serde(rename = "yemek_resim_adi")]
  pub image: String,
  #[serde(rename = "yemek_fiyat", deserialize_with = "lenient_f64")]
  pub price: f64,
}

impl From<FoodDto> for CatalogItem {
  fn from(dto: FoodDto) -> Self {
    CatalogItem {
      id: dto.id,
      name: dto.name,
      image: dto.image,
      price: dto.price,
      is_favorite: false,
      rating: 0.0,
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct FoodListResponse {
  #[serde(rename = "yemekler", default, deserialize_with = "null_as_empty")]
  pub foods: Vec<FoodDto>,
  #[serde(default, deserialize_with = "lenient_opt_i64")]
  pub success: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CartDto {
  #[serde(rename = "sepet_yemek_id", deserialize_with = "lenient_i64")]
  pub id: i64,
  #[serde(rename = "yemek_adi")]
  pub name: String,
  #[serde(rename = "yemek_resim_adi")]
  pub image: String,
  #[serde(rename = "yemek_fiyat", deserialize_with = "lenient_f64")]
  pub price: f64,
  #[serde(rename = "yemek_siparis_adet", deserialize_with = "lenient_i64")]
  pub count: i64,
  #[serde(rename = "kullanici_adi", default)]
  pub owner: String,
}

/// A line the service reports with a count below 1 is rejected, not shown as empty.
impl TryFrom<CartDto> for CartLineItem {
  type Error = EatzyError;

  fn try_from(dto: CartDto) -> Result<Self, Self::Error> {
    let quantity = u32::try_from(dto.count)
      .ok()
      .filter(|q| *q >= 1)
      .ok_or_else(|| EatzyError::MalformedResponse(format!("cart line {} has count {}", dto.id, dto.count)))?;
    Ok(CartLineItem {
      id: dto.id,
      name: dto.name,
      image: dto.image,
      unit_price: dto.price,
      quantity,
    })
  }
}

#[derive(Debug, Deserialize)]
pub struct CartListResponse {
  #[serde(rename = "sepet_yemekler", default, deserialize_with = "null_as_empty")]
  pub lines: Vec<CartDto>,
  #[serde(default, deserialize_with = "lenient_opt_i64")]
  pub success: Option<i64>,
}

/// Envelope of the add and delete endpoints.
#[derive(Debug, Deserialize)]
pub struct AckResponse {
  #[serde(default, deserialize_with = "lenient_opt_i64")]
  pub success: Option<i64>,
  #[serde(default)]
  pub message: Option<String>,
}

/// Form body of `sepeteYemekEkle.php`.
#[derive(Debug, Serialize)]
pub struct AddToCartForm<'a> {
  pub yemek_adi: &'a str,
  pub yemek_resim_adi: &'a str,
  pub yemek_fiyat: i64,
  pub yemek_siparis_adet: u32,
  pub kullanici_adi: &'a str,
}

/// Form body of `sepettekiYemekleriGetir.php`.
#[derive(Debug, Serialize)]
pub struct OwnerForm<'a> {
  pub kullanici_adi: &'a str,
}

/// Form body of `sepettenYemekSil.php`.
#[derive(Debug, Serialize)]
pub struct RemoveFromCartForm<'a> {
  pub sepet_yemek_id: i64,
  pub kullanici_adi: &'a str,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cart_lines_accept_string_numbers() {
    let body = r#"{"sepet_yemekler":[{"sepet_yemek_id":"7","yemek_adi":"Burger","yemek_resim_adi":"burger.png","yemek_fiyat":"120","yemek_siparis_adet":"2","kullanici_adi":"ayse_k"}],"success":1}"#;
    let parsed: CartListResponse = serde_json::from_str(body).unwrap();
    let line = CartLineItem::try_from(parsed.lines.into_iter().next().unwrap()).unwrap();
    assert_eq!(line.id, 7);
    assert_eq!(line.quantity, 2);
    assert_eq!(line.line_total(), 240);
    assert_eq!(parsed.success, Some(1));
  }

  #[test]
  fn foods_accept_numeric_prices() {
    let body = r#"{"yemekler":[{"yemek_id":1,"yemek_adi":"Ayran","yemek_resim_adi":"ayran.png","yemek_fiyat":25}],"success":"1"}"#;
    let parsed: FoodListResponse = serde_json::from_str(body).unwrap();
    let item: CatalogItem = parsed.foods.into_iter().next().map(Into::into).unwrap();
    assert_eq!(item.name, "Ayran");
    assert_eq!(item.price, 25.0);
    assert!(!item.is_favorite);
  }

  #[test]
  fn null_lists_and_flags_read_as_absent() {
    let parsed: CartListResponse = serde_json::from_str(r#"{"sepet_yemekler":null,"success":null}"#).unwrap();
    assert!(parsed.lines.is_empty());
    assert_eq!(parsed.success, None);

    let parsed: FoodListResponse = serde_json::from_str(r#"{"yemekler":null}"#).unwrap();
    assert!(parsed.foods.is_empty());
    assert_eq!(parsed.success, None);
  }

  #[test]
  fn cart_line_without_a_positive_count_is_rejected() {
    for count in ["0", "-2", "99999999999"] {
      let body = format!(
        r#"{{"sepet_yemekler":[{{"sepet_yemek_id":"7","yemek_adi":"Burger","yemek_resim_adi":"burger.png","yemek_fiyat":"120","yemek_siparis_adet":"{}"}}]}}"#,
        count
      );
      let parsed: CartListResponse = serde_json::from_str(&body).unwrap();
      let dto = parsed.lines.into_iter().next().unwrap();
      let err = CartLineItem::try_from(dto).unwrap_err();
      assert!(matches!(err, EatzyError::MalformedResponse(_)), "count {}", count);
    }
  }
}
