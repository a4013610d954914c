use loandesk_core::{NewStaff, Role, StaffMember};
use tracing::debug;

use crate::request::{ApiRequest, Saved, path_segment};
use crate::{ApiClient, ApiError};

/// CRUD over one staff collection (`/directors`, `/managers` or `/agents`)
#[derive(Debug, Clone)]
pub struct StaffService {
  api: ApiClient,
  role: Role,
}

impl StaffService {
  pub fn new(api: ApiClient, role: Role) -> Self {
    Self { api, role }
  }

  pub fn role(&self) -> Role {
    self.role
  }

  fn member_path(&self, id: &str) -> Result<String, ApiError> {
    Ok(format!("{}/{}", self.role.staff_collection(), path_segment(id)?))
  }

  pub async fn list(&self) -> Result<Vec<StaffMember>, ApiError> {
    let members: Vec<StaffMember> = self
      .api
      .send(ApiRequest::get(self.role.staff_collection()))
      .await?
      .data()?;
    debug!("Fetched {} {} records", members.len(), self.role);
    Ok(members)
  }

  pub async fn get(&self, id: &str) -> Result<StaffMember, ApiError> {
    self.api.send(ApiRequest::get(self.member_path(id)?)).await?.data()
  }

  pub async fn create(&self, staff: &NewStaff) -> Result<Saved<StaffMember>, ApiError> {
    let request = ApiRequest::post(self.role.staff_collection()).json(staff)?;
    self.api.send(request).await?.saved()
  }

  pub async fn update(&self, id: &str, staff: &NewStaff) -> Result<Saved<StaffMember>, ApiError> {
    let request = ApiRequest::put(self.member_path(id)?).json(staff)?;
    self.api.send(request).await?.saved()
  }

  pub async fn delete(&self, id: &str) -> Result<Option<String>, ApiError> {
    let response = self.api.send(ApiRequest::delete(self.member_path(id)?)).await?;
    Ok(response.message())
  }
}
