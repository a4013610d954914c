use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::ApiError;

/// Percent-encode `id` as a single path segment. Reserved characters such as
/// `/`, `?` and `#` are escaped; empty, `.` and `..` ids are rejected.
pub(crate) fn path_segment(id: &str) -> Result<String, ApiError> {
  if matches!(id.trim(), "" | "." | "..") {
    return Err(ApiError::InvalidId(id.to_string()));
  }
  let mut url = Url::parse("http://localhost/").map_err(|_| ApiError::InvalidId(id.to_string()))?;
  url
    .path_segments_mut()
    .map_err(|_| ApiError::InvalidId(id.to_string()))?
    .pop_if_empty()
    .push(id);
  Ok(url.path().trim_start_matches('/').to_string())
}

/// A request against the API root, replayable after a token refresh
#[derive(Debug, Clone)]
pub struct ApiRequest {
  pub method: Method,
  pub path: String,
  pub query: Vec<(String, String)>,
  pub body: Option<serde_json::Value>,
  /// Set once the request has been replayed with a refreshed token
  pub retried: bool,
}

impl ApiRequest {
  pub fn new(method: Method, path: impl Into<String>) -> Self {
    Self {
      method,
      path: path.into(),
      query: Vec::new(),
      body: None,
      retried: false,
    }
  }

  pub fn get(path: impl Into<String>) -> Self {
    Self::new(Method::GET, path)
  }

  pub fn post(path: impl Into<String>) -> Self {
    Self::new(Method::POST, path)
  }

  pub fn put(path: impl Into<String>) -> Self {
    Self::new(Method::PUT, path)
  }

  pub fn delete(path: impl Into<String>) -> Self {
    Self::new(Method::DELETE, path)
  }

  pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
    let value = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    self.body = Some(value);
    Ok(self)
  }

  pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.query.push((key.into(), value.into()));
    self
  }
}

/// Standard success wrapper: `{ "data": ..., "message": ... }`
#[derive(Debug, Deserialize)]
struct Envelope<T> {
  data: T,
  #[serde(default)]
  message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
  #[serde(default)]
  message: Option<String>,
  #[serde(default)]
  error: Option<String>,
}

/// A record returned by a write, plus the server's confirmation text
#[derive(Debug, Clone, PartialEq)]
pub struct Saved<T> {
  pub record: T,
  pub message: Option<String>,
}

/// Buffered response body
#[derive(Debug, Clone)]
pub struct ApiResponse {
  pub status: StatusCode,
  pub body: String,
}

impl ApiResponse {
  /// Decode the payload, unwrapping the `data` envelope when present
  pub fn data<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
    self.saved().map(|saved| saved.record)
  }

  pub fn saved<T: DeserializeOwned>(&self) -> Result<Saved<T>, ApiError> {
    if let Ok(envelope) = serde_json::from_str::<Envelope<T>>(&self.body) {
      return Ok(Saved {
        record: envelope.data,
        message: envelope.message,
      });
    }
    serde_json::from_str::<T>(&self.body)
      .map(|record| Saved { record, message: None })
      .map_err(|e| ApiError::Decode(e.to_string()))
  }

  /// Server-supplied message, if the body carries one
  pub fn message(&self) -> Option<String> {
    error_message(&self.body)
  }
}

/// Pull a human-readable message out of an error body
pub(crate) fn error_message(body: &str) -> Option<String> {
  let parsed: MessageBody = serde_json::from_str(body).ok()?;
  parsed.message.or(parsed.error).filter(|m| !m.trim().is_empty())
}

/// Message for a failed response, falling back to the status text
pub(crate) fn failure_message(status: StatusCode, body: &str) -> String {
  error_message(body).unwrap_or_else(|| match status.canonical_reason() {
    Some(reason) => reason.to_string(),
    None => format!("Request failed with status {}", status.as_u16()),
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_path_segment_escapes_reserved_characters() {
    assert_eq!(path_segment("64f1c2").unwrap(), "64f1c2");
    assert_eq!(path_segment("a/b").unwrap(), "a%2Fb");
    assert_eq!(path_segment("x?admin=1#top").unwrap(), "x%3Fadmin=1%23top");
  }

  #[test]
  fn test_path_segment_rejects_empty_and_dot_ids() {
    for id in ["", "  ", ".", ".."] {
      assert!(matches!(path_segment(id), Err(ApiError::InvalidId(_))), "{:?}", id);
    }
  }

  #[derive(Debug, Deserialize, PartialEq)]
  struct Item {
    id: String,
  }

  fn response(body: &str) -> ApiResponse {
    ApiResponse {
      status: StatusCode::OK,
      body: body.to_string(),
    }
  }

  #[test]
  fn test_enveloped_data() {
    let saved: Saved<Item> = response(r#"{"data":{"id":"c1"},"message":"Client created"}"#)
      .saved()
      .unwrap();
    assert_eq!(saved.record, Item { id: "c1".to_string() });
    assert_eq!(saved.message.as_deref(), Some("Client created"));
  }

  #[test]
  fn test_bare_data() {
    let item: Item = response(r#"{"id":"c2"}"#).data().unwrap();
    assert_eq!(item.id, "c2");
  }

  #[test]
  fn test_undecodable_body() {
    let result: Result<Item, _> = response("<html>").data();
    assert!(matches!(result, Err(ApiError::Decode(_))));
  }

  #[test]
  fn test_failure_message() {
    assert_eq!(
      failure_message(StatusCode::BAD_REQUEST, r#"{"message":"Email is taken"}"#),
      "Email is taken"
    );
    assert_eq!(
      failure_message(StatusCode::NOT_FOUND, r#"{"error":"No such client"}"#),
      "No such client"
    );
    assert_eq!(failure_message(StatusCode::BAD_GATEWAY, ""), "Bad Gateway");
  }

  #[test]
  fn test_request_builders() {
    let request = ApiRequest::get("/reports/performance")
      .query("from", "2024-01-01")
      .query("to", "2024-03-31");
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.query.len(), 2);
    assert!(!request.retried);

    let request = ApiRequest::post("/clients").json(&serde_json::json!({"a": 1})).unwrap();
    assert_eq!(request.body, Some(serde_json::json!({"a": 1})));
  }
}
