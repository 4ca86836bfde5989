// core/src/models/payment.rs
use serde::{Deserialize, Serialize};

/// A saved payment card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCard {
  pub id: String,
  pub title: String,
  pub card_number: String,
  pub holder_name: String,
  pub expiry: String,
  pub cvc: String,
}

impl PaymentCard {
  /// Last four digits, for display.
  pub fn masked_number(&self) -> String {
    let digits: Vec<char> = self.card_number.chars().collect();
    let tail: String = digits.iter().skip(digits.len().saturating_sub(4)).collect();
    format!("**** {}", tail)
  }
}
