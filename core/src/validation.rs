// core/src/validation.rs

//! Form field predicates. Every predicate is false for empty input.

use once_cell::sync::Lazy;
use regex::Regex;

type Pattern = Lazy<Option<Regex>>;

fn compile(pattern: &str) -> Option<Regex> {
  Regex::new(pattern).ok()
}

fn matches(pattern: &Pattern, input: &str) -> bool {
  !input.is_empty() && pattern.as_ref().map_or(false, |re| re.is_match(input))
}

static EMAIL: Pattern = Lazy::new(|| compile(r"^[A-Za-z]\S*@\S+\.\S+$"));
static PHONE: Pattern =
  Lazy::new(|| compile(r"^[0\s]?\s?\(?5[0-9]{2}\)?\s?[0-9]{3}\s?[0-9]{2}\s?[0-9]{2}$"));
static FULL_NAME: Pattern = Lazy::new(|| compile(r"^[a-zA-Z]+(?:\s[a-zA-Z]+)+$"));
static CARD_NUMBER: Pattern = Lazy::new(|| compile(r"^[0-9]{16}$"));
static CARD_EXPIRY: Pattern = Lazy::new(|| compile(r"^(0[1-9]|1[0-2])/?(2[4-9]|[3-9][0-9])$"));
static CVC: Pattern = Lazy::new(|| compile(r"^[0-9]{3,4}$"));

const MIN_PASSWORD_LEN: usize = 8;
const MIN_USERNAME_LEN: usize = 6;

pub fn is_valid_email(input: &str) -> bool {
  matches(&EMAIL, input)
}

/// At least 8 characters, no whitespace, with a digit, a lowercase and an uppercase letter.
pub fn is_valid_password(input: &str) -> bool {
  input.chars().count() >= MIN_PASSWORD_LEN
    && !input.chars().any(char::is_whitespace)
    && input.chars().any(|c| c.is_ascii_digit())
    && input.chars().any(|c| c.is_ascii_lowercase())
    && input.chars().any(|c| c.is_ascii_uppercase())
}

/// Turkish mobile numbers: `05xx xxx xx xx`, with optional spaces and parentheses.
pub fn is_valid_phone(input: &str) -> bool {
  matches(&PHONE, input)
}

pub fn is_valid_full_name(input: &str) -> bool {
  matches(&FULL_NAME, input)
}

pub fn is_valid_username(input: &str) -> bool {
  input.chars().count() >= MIN_USERNAME_LEN
}

pub fn is_valid_card_number(input: &str) -> bool {
  matches(&CARD_NUMBER, input)
}

/// `MM/YY` or `MMYY`, years 24 to 99.
pub fn is_valid_card_expiry(input: &str) -> bool {
  matches(&CARD_EXPIRY, input)
}

pub fn is_valid_cvc(input: &str) -> bool {
  matches(&CVC, input)
}
