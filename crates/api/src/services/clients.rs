use loandesk_core::{Client, NewClient};
use tracing::debug;

use crate::request::{ApiRequest, Saved, path_segment};
use crate::{ApiClient, ApiError};

fn member_path(id: &str) -> Result<String, ApiError> {
  Ok(format!("/clients/{}", path_segment(id)?))
}

#[derive(Debug, Clone)]
pub struct ClientService {
  api: ApiClient,
}

impl ClientService {
  pub fn new(api: ApiClient) -> Self {
    Self { api }
  }

  pub async fn list(&self) -> Result<Vec<Client>, ApiError> {
    let clients: Vec<Client> = self.api.send(ApiRequest::get("/clients")).await?.data()?;
    debug!("Fetched {} clients", clients.len());
    Ok(clients)
  }

  pub async fn get(&self, id: &str) -> Result<Client, ApiError> {
    self.api.send(ApiRequest::get(member_path(id)?)).await?.data()
  }

  pub async fn create(&self, client: &NewClient) -> Result<Saved<Client>, ApiError> {
    let request = ApiRequest::post("/clients").json(client)?;
    self.api.send(request).await?.saved()
  }

  pub async fn update(&self, id: &str, client: &NewClient) -> Result<Saved<Client>, ApiError> {
    let request = ApiRequest::put(member_path(id)?).json(client)?;
    self.api.send(request).await?.saved()
  }

  /// Delete a client, returning the server's confirmation if any
  pub async fn delete(&self, id: &str) -> Result<Option<String>, ApiError> {
    let response = self.api.send(ApiRequest::delete(member_path(id)?)).await?;
    Ok(response.message())
  }
}
