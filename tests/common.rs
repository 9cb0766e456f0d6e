#![allow(dead_code)]

use mockito::{Matcher, Mock, ServerGuard};
use serde_json::json;
use storefront::config::{parse_config, ConfigV1};

/// Config pointing at `server`, with the given `session.storage` YAML block.
pub fn config_for(server: &ServerGuard, storage: &str) -> ConfigV1 {
    let yaml = format!(
        r#"
version: "1.0.0"
api:
  base_url: "{url}"
  pictures_url: "{url}/pictures"
  timeout_in_ms: 5000
logging:
  level: "debug"
  format: "json"
session:
  storage:
{storage}
"#,
        url = server.url(),
        storage = storage
    );
    parse_config(&yaml).expect("test config should parse")
}

pub fn memory_storage() -> &'static str {
    "    type: memory"
}

pub fn file_storage(path: &std::path::Path) -> String {
    format!("    type: file\n    path: \"{}\"", path.display())
}

pub fn profile_json(id: &str, role: &str, role_id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "email": "buyer@example.com",
        "fio": "Орлова Ирина",
        "phone_number": "+79031112233",
        "role": role,
        "role_id": role_id
    })
}

/// Login that hands out `access=<token>`.
pub async fn mock_login(server: &mut ServerGuard, token: &str) -> Mock {
    server
        .mock("POST", "/auth/login")
        .with_status(200)
        .with_header("set-cookie", &format!("access={}; Path=/", token))
        .with_body(r#"{"status": "success"}"#)
        .create_async()
        .await
}

/// Profile endpoint answering only for requests carrying `access=<token>`.
pub async fn mock_profile(server: &mut ServerGuard, token: &str, profile: serde_json::Value) -> Mock {
    server
        .mock("GET", "/user/me")
        .match_header("cookie", Matcher::Regex(format!("access={}", token)))
        .with_status(200)
        .with_body(json!({"status": "success", "data": profile}).to_string())
        .create_async()
        .await
}

/// `path` rejects `access=<token>` with 401.
pub async fn mock_expired(server: &mut ServerGuard, method: &str, path: &str, token: &str) -> Mock {
    server
        .mock(method, path)
        .match_header("cookie", Matcher::Regex(format!("access={}", token)))
        .with_status(401)
        .with_body(r#"{"status": "error", "message": "token expired"}"#)
        .create_async()
        .await
}

/// `path` answers `body` for requests carrying `access=<token>`.
pub async fn mock_ok(
    server: &mut ServerGuard,
    method: &str,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Mock {
    server
        .mock(method, path)
        .match_header("cookie", Matcher::Regex(format!("access={}", token)))
        .with_status(200)
        .with_body(body.to_string())
        .create_async()
        .await
}
