use loandesk_core::{Role, Session, UserProfile};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::navigator::{LOGIN_ROUTE, Navigator};
use crate::request::ApiRequest;
use crate::{ApiClient, ApiError};

#[derive(Debug, Serialize)]
struct Credentials<'a> {
  email: &'a str,
  password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
  access_token: String,
  refresh_token: String,
  #[serde(default)]
  user: Option<UserProfile>,
}

/// Login, logout and access to the stored session
#[derive(Debug, Clone)]
pub struct AuthService {
  api: ApiClient,
}

impl AuthService {
  pub fn new(api: ApiClient) -> Self {
    Self { api }
  }

  /// Log in against the role's own endpoint and persist the session.
  /// Bad credentials surface as a server error, never as a refresh.
  pub async fn login(&self, role: Role, email: &str, password: &str) -> Result<Session, ApiError> {
    let request = ApiRequest::post(role.login_path()).json(&Credentials { email, password })?;
    let response: LoginResponse = self.api.send_public(request).await?.data()?;

    let session = Session {
      access_token: response.access_token,
      refresh_token: response.refresh_token,
      role,
      user: response.user,
    };
    self.api.session().save(&session)?;

    info!("Logged in as {} ({})", email, role);
    self.api.navigator().navigate(&role.landing_route());
    Ok(session)
  }

  pub fn logout(&self) -> Result<(), ApiError> {
    self.api.session().clear()?;
    self.api.navigator().navigate(LOGIN_ROUTE);
    Ok(())
  }

  pub fn current_session(&self) -> Result<Option<Session>, ApiError> {
    Ok(self.api.session().load()?)
  }
}
