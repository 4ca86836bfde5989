// core/tests/validation_format_tests.rs
use eatzy::format::{CardExpiryMask, OffsetMapping, PhoneNumberMask};
use eatzy::validation::*;

#[test]
fn email_needs_a_leading_letter_and_a_dotted_domain() {
  assert!(is_valid_email("hippo@eatzy.test"));
  assert!(is_valid_email("a.b-c@mail.co.uk"));
  assert!(!is_valid_email(""));
  assert!(!is_valid_email("1hippo@eatzy.test"));
  assert!(!is_valid_email("hippo@eatzy"));
  assert!(!is_valid_email("hip po@eatzy.test"));
}

#[test]
fn password_needs_length_digit_and_both_cases() {
  assert!(is_valid_password("Passw0rdOk"));
  assert!(!is_valid_password("Pa0rd"));
  assert!(!is_valid_password("password1"));
  assert!(!is_valid_password("PASSWORD1"));
  assert!(!is_valid_password("Password"));
  assert!(!is_valid_password("Pass w0rd"));
}

#[test]
fn phone_accepts_turkish_mobile_layouts() {
  assert!(is_valid_phone("5321234567"));
  assert!(is_valid_phone("05321234567"));
  assert!(is_valid_phone("0 (532) 123 45 67"));
  assert!(!is_valid_phone("4321234567"));
  assert!(!is_valid_phone("532123456"));
  assert!(!is_valid_phone(""));
}

#[test]
fn names_and_usernames() {
  assert!(is_valid_full_name("Hungry Hippo"));
  assert!(is_valid_full_name("Ada Byron King"));
  assert!(!is_valid_full_name("Hippo"));
  assert!(!is_valid_full_name("Hungry  Hippo"));
  assert!(is_valid_username("hippo1"));
  assert!(!is_valid_username("hippo"));
}

#[test]
fn card_fields() {
  assert!(is_valid_card_number("4111111111111111"));
  assert!(!is_valid_card_number("4111 1111 1111 1111"));
  assert!(is_valid_card_expiry("12/26"));
  assert!(is_valid_card_expiry("0130"));
  assert!(!is_valid_card_expiry("13/26"));
  assert!(!is_valid_card_expiry("12/23"));
  assert!(is_valid_cvc("123"));
  assert!(is_valid_cvc("1234"));
  assert!(!is_valid_cvc("12"));
}

#[test]
fn phone_mask_formats_and_maps_offsets() {
  let masked = PhoneNumberMask::apply("5321234567");
  assert_eq!(masked.text, "0(532) 123 45 67");
  assert_eq!(PhoneNumberMask::apply("532").text, "0(532");
  assert_eq!(PhoneNumberMask::apply("").text, "");

  let m = masked.mapping;
  assert_eq!(m.original_to_transformed(0), 0);
  assert_eq!(m.original_to_transformed(3), 5);
  assert_eq!(m.original_to_transformed(6), 10);
  assert_eq!(m.original_to_transformed(10), 16);
  assert_eq!(m.transformed_to_original(1), 0);
  assert_eq!(m.transformed_to_original(5), 3);
  assert_eq!(m.transformed_to_original(16), 10);
}

#[test]
fn expiry_mask_inserts_a_slash() {
  let masked = CardExpiryMask::apply("1226");
  assert_eq!(masked.text, "12/26");
  assert_eq!(CardExpiryMask::apply("1").text, "1");

  let m = masked.mapping;
  assert_eq!(m.original_to_transformed(2), 2);
  assert_eq!(m.original_to_transformed(4), 5);
  assert_eq!(m.transformed_to_original(5), 4);
}
