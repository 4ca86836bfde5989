// core/tests/http_client_tests.rs
mod common;

use common::*;
use eatzy::models::CartLineItem;
use eatzy::remote::{FoodApi, HttpFoodApi};
use eatzy::EatzyError;
use serial_test::serial;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serves exactly one HTTP request with the given status line and body.
/// The handle resolves to the raw request the client sent.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let base_url = format!("http://{}/yemekler/", listener.local_addr().unwrap());

  let handle = tokio::spawn(async move {
    let (mut socket, _) = listener.accept().await.unwrap();
    let mut raw = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
      let n = socket.read(&mut buf).await.unwrap();
      if n == 0 {
        break;
      }
      raw.extend_from_slice(&buf[..n]);
      if request_complete(&raw) {
        break;
      }
    }
    let response = format!(
      "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
      status,
      body.len(),
      body
    );
    socket.write_all(response.as_bytes()).await.unwrap();
    socket.shutdown().await.ok();
    String::from_utf8_lossy(&raw).into_owned()
  });

  (base_url, handle)
}

fn request_complete(raw: &[u8]) -> bool {
  let text = String::from_utf8_lossy(raw);
  let Some(header_end) = text.find("\r\n\r\n") else {
    return false;
  };
  let content_length = text[..header_end]
    .lines()
    .find_map(|l| {
      let (name, value) = l.split_once(':')?;
      name.eq_ignore_ascii_case("content-length").then(|| value.trim().parse::<usize>().ok())?
    })
    .unwrap_or(0);
  raw.len() >= header_end + 4 + content_length
}

#[tokio::test]
#[serial]
async fn empty_cart_body_reads_as_an_empty_cart() {
  setup_tracing();
  let (base_url, server) = serve_once("200 OK", "").await;
  let api = HttpFoodApi::new(base_url);

  let lines = api.list_cart(OWNER).await.unwrap();
  let request = server.await.unwrap();

  assert!(lines.is_empty());
  assert!(request.starts_with("POST /yemekler/sepettekiYemekleriGetir.php"));
  assert!(request.contains("kullanici_adi=hungry_hippo"));
}

#[tokio::test]
#[serial]
async fn cart_lines_are_decoded_from_string_numbers() {
  setup_tracing();
  let body = r#"{"sepet_yemekler":[{"sepet_yemek_id":"7","yemek_adi":"Burger","yemek_resim_adi":"burger.png","yemek_fiyat":"120","yemek_siparis_adet":"2","kullanici_adi":"hungry_hippo"}],"success":1}"#;
  let (base_url, server) = serve_once("200 OK", body).await;
  let api = HttpFoodApi::new(base_url);

  let lines = api.list_cart(OWNER).await.unwrap();
  server.await.unwrap();

  assert_eq!(
    lines,
    vec![CartLineItem {
      id: 7,
      name: "Burger".to_string(),
      image: "burger.png".to_string(),
      unit_price: 120.0,
      quantity: 2,
    }]
  );
}

#[tokio::test]
#[serial]
async fn malformed_catalog_is_an_error() {
  setup_tracing();
  let (base_url, server) = serve_once("200 OK", "<html>maintenance</html>").await;
  let api = HttpFoodApi::new(base_url);

  let err = api.list_catalog().await.unwrap_err();
  let request = server.await.unwrap();

  assert!(matches!(err, EatzyError::MalformedResponse(_)));
  assert!(request.starts_with("GET /yemekler/tumYemekleriGetir.php"));
}

#[tokio::test]
#[serial]
async fn add_to_cart_posts_whole_unit_price_and_quantity() {
  setup_tracing();
  let (base_url, server) = serve_once("200 OK", r#"{"success":1,"message":"ok"}"#).await;
  let api = HttpFoodApi::new(base_url);
  let item = CartLineItem::unpersisted("Baklava", "baklava.png", 80.5, 1);

  api.add_to_cart(&item, 3, OWNER).await.unwrap();
  let request = server.await.unwrap();

  assert!(request.starts_with("POST /yemekler/sepeteYemekEkle.php"));
  assert!(request.contains("application/x-www-form-urlencoded"));
  assert!(request.contains("yemek_adi=Baklava"));
  assert!(request.contains("yemek_resim_adi=baklava.png"));
  assert!(request.contains("yemek_fiyat=80"));
  assert!(request.contains("yemek_siparis_adet=3"));
  assert!(request.contains("kullanici_adi=hungry_hippo"));
}

#[tokio::test]
#[serial]
async fn remove_posts_the_line_id() {
  setup_tracing();
  let (base_url, server) = serve_once("200 OK", r#"{"success":"1"}"#).await;
  let api = HttpFoodApi::new(base_url);

  api.remove_from_cart(42, OWNER).await.unwrap();
  let request = server.await.unwrap();

  assert!(request.starts_with("POST /yemekler/sepettenYemekSil.php"));
  assert!(request.contains("sepet_yemek_id=42"));
}

#[tokio::test]
#[serial]
async fn server_error_status_is_a_remote_error() {
  setup_tracing();
  let (base_url, server) = serve_once("500 Internal Server Error", "boom").await;
  let api = HttpFoodApi::new(base_url);

  let err = api.remove_from_cart(1, OWNER).await.unwrap_err();
  server.await.unwrap();

  match err {
    EatzyError::Remote(message) => assert!(message.contains("500")),
    other => panic!("expected Remote, got {:?}", other),
  }
}

#[test]
fn base_url_gets_a_trailing_slash() {
  let api = HttpFoodApi::new("http://localhost:9000/yemekler");
  assert_eq!(api.base_url(), "http://localhost:9000/yemekler/");
}
