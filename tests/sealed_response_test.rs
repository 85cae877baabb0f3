use aes_gcm::aead::{Aead, Payload};
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD as B64, Engine as _};
use cafe_scout::{AppConfig, AppState};
use httpmock::prelude::*;
use rsa::pkcs8::EncodePublicKey;
use rsa::sha2::Sha256;
use rsa::{Oaep, RsaPrivateKey};
use serde_json::{json, Value};
use std::io::Write;

fn test_config(places_base: String, key_path: std::path::PathBuf) -> AppConfig {
    AppConfig {
        port: 0,
        google_api_key: "test-key".to_string(),
        decrypt_api: "http://localhost:1/api/decrypt".to_string(),
        places_api_base: places_base,
        public_key_path: Some(key_path),
        search_radius_m: 2000,
        concurrent_requests: 5,
        request_timeout_seconds: 2,
        verbose: false,
    }
}

async fn spawn_app(config: AppConfig) -> String {
    let state = AppState::new(config).unwrap();
    let app = cafe_scout::router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn open_envelope(private_key: &RsaPrivateKey, envelope: &Value) -> Vec<u8> {
    let segment = |name: &str| B64.decode(envelope[name].as_str().unwrap()).unwrap();

    let cek = private_key
        .decrypt(Oaep::new::<Sha256>(), &segment("encrypted_key"))
        .unwrap();

    let mut sealed = segment("ciphertext");
    sealed.extend_from_slice(&segment("tag"));

    let cipher = Aes256Gcm::new_from_slice(&cek).unwrap();
    cipher
        .decrypt(
            Nonce::from_slice(&segment("iv")),
            Payload {
                msg: &sealed,
                aad: envelope["protected"].as_str().unwrap().as_bytes(),
            },
        )
        .unwrap()
}

fn mock_places(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET).path("/nearbysearch/json");
        then.status(200)
            .json_body(json!({"results": [{"place_id": "a"}]}));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/details/json")
            .query_param("place_id", "a");
        then.status(200).json_body(json!({
            "result": {
                "name": "老樹咖啡",
                "rating": 4.7,
                "formatted_address": "台北市老樹路 5 號",
                "opening_hours": {"weekday_text": vec!["星期一: 08:00 – 22:00"; 7]},
                "geometry": {"location": {"lat": 25.0, "lng": 121.501}}
            }
        }));
    });
}

#[tokio::test]
async fn test_sealed_response_matches_plain_response() {
    let private_key = RsaPrivateKey::new(&mut rand::thread_rng(), 2048).unwrap();
    let pem = private_key
        .to_public_key()
        .to_public_key_pem(rsa::pkcs8::LineEnding::LF)
        .unwrap();
    let mut key_file = tempfile::NamedTempFile::new().unwrap();
    key_file.write_all(pem.as_bytes()).unwrap();

    let server = MockServer::start();
    mock_places(&server);

    let base = spawn_app(test_config(
        server.base_url(),
        key_file.path().to_path_buf(),
    ))
    .await;

    let query = json!({"latitude": 25.0, "longitude": 121.5, "currentTime": "10:00"});
    let client = reqwest::Client::new();

    let sealed: Value = client
        .post(format!("{}/api/nearby-cafes-open-3hr/sealed", base))
        .json(&query)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // 五段信封，各段都有值
    for field in ["protected", "encrypted_key", "iv", "ciphertext", "tag"] {
        assert!(sealed[field].is_string(), "missing segment {}", field);
        assert!(!sealed[field].as_str().unwrap().is_empty());
    }

    let plain: Value = client
        .post(format!("{}/api/nearby-cafes-open-3hr", base))
        .json(&query)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // 解開信封後的明文必須與明文端點的回應一致
    let opened = open_envelope(&private_key, &sealed);
    let opened: Value = serde_json::from_slice(&opened).unwrap();
    assert_eq!(opened, plain);
    assert_eq!(opened["data"][0]["name"], "老樹咖啡");
}

#[tokio::test]
async fn test_sealed_endpoint_still_validates_input() {
    let private_key = RsaPrivateKey::new(&mut rand::thread_rng(), 2048).unwrap();
    let pem = private_key
        .to_public_key()
        .to_public_key_pem(rsa::pkcs8::LineEnding::LF)
        .unwrap();
    let mut key_file = tempfile::NamedTempFile::new().unwrap();
    key_file.write_all(pem.as_bytes()).unwrap();

    let server = MockServer::start();
    let base = spawn_app(test_config(
        server.base_url(),
        key_file.path().to_path_buf(),
    ))
    .await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/nearby-cafes-open-3hr/sealed", base))
        .json(&json!({"currentTime": "10:00"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["latitude"], "缺少 latitude");
    assert_eq!(body["longitude"], "缺少 longitude");
}
