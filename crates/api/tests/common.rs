//! Shared harness for the HTTP integration tests.
//!
//! Each harness owns a wiremock server, an in-memory credential store and a
//! recording navigator, so tests can assert on stored keys and redirects.

use api::{ApiClient, MemoryNavigator};
use loandesk_core::{ApiConfig, MemoryStore, Role, Session, SessionStore};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PREFIX: &str = "/api/v1";

#[allow(dead_code)]
pub struct Harness {
  pub server: MockServer,
  pub store: Arc<MemoryStore>,
  pub session: SessionStore,
  pub navigator: Arc<MemoryNavigator>,
  pub api: ApiClient,
}

#[allow(dead_code)]
impl Harness {
  pub async fn new(route: &str) -> Self {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryStore::new());
    let session = SessionStore::new(store.clone());
    let navigator = Arc::new(MemoryNavigator::new(route));
    let config = ApiConfig {
      base_url: server.uri(),
      prefix: PREFIX.to_string(),
      request_timeout_secs: Some(5),
    };
    let api = ApiClient::new(&config, session.clone(), navigator.clone()).expect("client");

    Self {
      server,
      store,
      session,
      navigator,
      api,
    }
  }

  /// Harness with a stored session for `role`
  pub async fn logged_in(role: Role, route: &str) -> Self {
    let harness = Self::new(route).await;
    harness
      .session
      .save(&Session {
        access_token: "access-old".to_string(),
        refresh_token: "refresh-old".to_string(),
        role,
        user: None,
      })
      .expect("save session");
    harness
  }

  /// `GET {PREFIX}{route}` answers 401 for the old token and `body` for the new one
  pub async fn mount_expiring(&self, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
      .and(path(format!("{}{}", PREFIX, route)))
      .and(header("Authorization", "Bearer access-old"))
      .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "jwt expired"})))
      .mount(&self.server)
      .await;
    Mock::given(method("GET"))
      .and(path(format!("{}{}", PREFIX, route)))
      .and(header("Authorization", "Bearer access-new"))
      .respond_with(ResponseTemplate::new(200).set_body_json(body))
      .mount(&self.server)
      .await;
  }

  /// Refresh endpoint for `segment` that succeeds, expected `times` times
  pub async fn mount_refresh(&self, segment: &str, times: u64) {
    Mock::given(method("POST"))
      .and(path(format!("{}/{}/refresh-token", PREFIX, segment)))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "accessToken": "access-new",
        "refreshToken": "refresh-new"
      })))
      .expect(times)
      .mount(&self.server)
      .await;
  }
}

#[allow(dead_code)]
pub fn client_json(id: &str) -> serde_json::Value {
  json!({
    "id": id,
    "firstName": "Ada",
    "lastName": "Obi",
    "email": "ada@example.com",
    "phone": "08012345678",
    "address": "12 Marina Road",
    "nationalId": "NIN12345",
    "dateOfBirth": "1990-04-12",
    "loan": {
      "principal": 100000.0,
      "interestRate": 10.0,
      "durationMonths": 12,
      "startDate": "2024-01-15"
    },
    "status": "active"
  })
}
