//! Bearer-authenticated HTTP client with one-shot token refresh.
//!
//! Every request reads the access token from the session store at send time.
//! A 401 triggers a single refresh against the role-specific endpoint and a
//! single replay. Any further 401, or a failed refresh, wipes the session and
//! sends the user to the login screen (unless they are already on one).
//! Other failures are logged and handed back to the caller untouched.

use loandesk_core::{ApiConfig, Role, Section, SessionStore, TokenPair};
use reqwest::StatusCode;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::navigator::{LOGIN_ROUTE, Navigator, is_auth_route};
use crate::request::{ApiRequest, ApiResponse, failure_message};
use crate::ApiError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
  refresh_token: &'a str,
}

#[derive(Clone)]
pub struct ApiClient {
  http: reqwest::Client,
  root_url: String,
  session: SessionStore,
  navigator: Arc<dyn Navigator>,
}

impl std::fmt::Debug for ApiClient {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ApiClient").field("root_url", &self.root_url).finish()
  }
}

impl ApiClient {
  pub fn new(config: &ApiConfig, session: SessionStore, navigator: Arc<dyn Navigator>) -> Result<Self, ApiError> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = config.request_timeout() {
      builder = builder.timeout(timeout);
    }
    let http = builder.build()?;

    Ok(Self {
      http,
      root_url: config.root_url(),
      session,
      navigator,
    })
  }

  pub fn session(&self) -> &SessionStore {
    &self.session
  }

  pub fn navigator(&self) -> &Arc<dyn Navigator> {
    &self.navigator
  }

  pub fn url(&self, path: &str) -> String {
    format!("{}/{}", self.root_url, path.trim_start_matches('/'))
  }

  /// Role of the stored session, if it may open `section`
  pub fn require_section(&self, section: Section) -> Result<Role, ApiError> {
    let role = self.session.role()?.ok_or(ApiError::NotLoggedIn)?;
    if role.can_access(section) {
      Ok(role)
    } else {
      Err(ApiError::Forbidden { role, section })
    }
  }

  /// Send an authenticated request, refreshing the token at most once
  pub async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
    loop {
      let token = self.session.access_token()?;
      let response = self.dispatch(&request, token.as_deref()).await?;

      if response.status() != StatusCode::UNAUTHORIZED {
        return Self::finish(&request, response).await;
      }

      if request.retried {
        warn!("{} {} still unauthorized after refresh", request.method, request.path);
        self.expire_session();
        return Err(ApiError::Unauthorized);
      }

      request.retried = true;
      if let Err(e) = self.refresh().await {
        warn!("Token refresh failed: {}", e);
        self.expire_session();
        return Err(ApiError::Unauthorized);
      }
      debug!("Replaying {} {} with refreshed token", request.method, request.path);
    }
  }

  /// Send without credentials and without the refresh cycle (login screens)
  pub async fn send_public(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
    let response = self.dispatch(&request, None).await?;
    Self::finish(&request, response).await
  }

  /// Exchange the stored refresh token for a new pair
  pub async fn refresh(&self) -> Result<TokenPair, ApiError> {
    let refresh_token = self.session.refresh_token()?.ok_or(ApiError::NotLoggedIn)?;
    let role = Role::for_refresh(self.session.role()?);
    let path = role.refresh_path();

    debug!("Refreshing access token via {}", path);

    // Refresh calls never carry the expired bearer
    let response = self
      .http
      .post(self.url(&path))
      .json(&RefreshRequest {
        refresh_token: &refresh_token,
      })
      .send()
      .await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
      return Err(ApiError::server(status, failure_message(status, &body)));
    }

    let tokens: TokenPair = ApiResponse { status, body }.data()?;
    self.session.store_tokens(&tokens)?;
    info!("Access token refreshed for {}", role);
    Ok(tokens)
  }

  /// Clear credentials and leave the current screen unless it is a login screen
  pub fn expire_session(&self) {
    if let Err(e) = self.session.clear() {
      warn!("Failed to clear session: {}", e);
    }
    let current = self.navigator.current_route();
    if !is_auth_route(&current) {
      info!("Session expired on {}, redirecting to {}", current, LOGIN_ROUTE);
      self.navigator.navigate(LOGIN_ROUTE);
    }
  }

  async fn dispatch(&self, request: &ApiRequest, token: Option<&str>) -> Result<reqwest::Response, ApiError> {
    let mut builder = self.http.request(request.method.clone(), self.url(&request.path));
    if !request.query.is_empty() {
      builder = builder.query(&request.query);
    }
    if let Some(body) = &request.body {
      builder = builder.json(body);
    }
    if let Some(token) = token {
      builder = builder.bearer_auth(token);
    }

    builder.send().await.map_err(|e| {
      warn!("{} {} failed: {}", request.method, request.path, e);
      ApiError::from(e)
    })
  }

  async fn finish(request: &ApiRequest, response: reqwest::Response) -> Result<ApiResponse, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
      return Ok(ApiResponse { status, body });
    }

    let message = failure_message(status, &body);
    warn!("{} {} returned {}: {}", request.method, request.path, status, message);
    Err(ApiError::server(status, message))
  }
}
