// core/src/format.rs

//! Input masks for the phone and card-expiry fields.
//!
//! A mask turns the raw digits a user typed into display text, and maps cursor offsets
//! between the two so the caret stays where the user expects.

/// Cursor mapping between raw and masked text.
pub trait OffsetMapping {
  fn original_to_transformed(&self, offset: usize) -> usize;
  fn transformed_to_original(&self, offset: usize) -> usize;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Masked<M> {
  pub text: String,
  pub mapping: M,
}

/// `5321234567` → `0(532) 123 45 67`. The leading zero is supplied by the mask; input beyond 11 characters is ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhoneNumberMask;

impl PhoneNumberMask {
  const MAX_LEN: usize = 11;

  pub fn apply(raw: &str) -> Masked<Self> {
    let mut text = String::new();
    for (i, c) in raw.chars().take(Self::MAX_LEN).enumerate() {
      match i {
        0 => text.push_str("0("),
        3 => text.push_str(") "),
        6 | 8 => text.push(' '),
        _ => {}
      }
      text.push(c);
    }
    Masked { text, mapping: Self }
  }
}

impl OffsetMapping for PhoneNumberMask {
  fn original_to_transformed(&self, offset: usize) -> usize {
    match offset {
      0 => 0,
      1..=3 => offset + 2,
      4..=6 => offset + 4,
      7..=8 => offset + 5,
      _ => offset + 6,
    }
  }

  fn transformed_to_original(&self, offset: usize) -> usize {
    match offset {
      0 | 1 => 0,
      2..=5 => offset - 2,
      6..=10 => offset - 4,
      11..=12 => offset - 5,
      _ => offset - 6,
    }
  }
}

/// `1226` → `12/26`. Input beyond 5 characters is ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardExpiryMask;

impl CardExpiryMask {
  const MAX_LEN: usize = 5;

  pub fn apply(raw: &str) -> Masked<Self> {
    let mut text = String::new();
    for (i, c) in raw.chars().take(Self::MAX_LEN).enumerate() {
      if i == 2 {
        text.push('/');
      }
      text.push(c);
    }
    Masked { text, mapping: Self }
  }
}

impl OffsetMapping for CardExpiryMask {
  fn original_to_transformed(&self, offset: usize) -> usize {
    if offset <= 2 {
      offset
    } else {
      offset + 1
    }
  }

  fn transformed_to_original(&self, offset: usize) -> usize {
    if offset <= 2 {
      offset
    } else {
      offset - 1
    }
  }
}
