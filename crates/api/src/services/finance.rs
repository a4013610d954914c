use loandesk_core::{FinanceRecord, NewPenalty, NewRepayment, Penalty, Repayment};

use crate::request::{ApiRequest, Saved, path_segment};
use crate::{ApiClient, ApiError};

fn client_path(client_id: &str, tail: &str) -> Result<String, ApiError> {
  Ok(format!("/clients/{}/{}", path_segment(client_id)?, tail))
}

#[derive(Debug, Clone)]
pub struct FinanceService {
  api: ApiClient,
}

impl FinanceService {
  pub fn new(api: ApiClient) -> Self {
    Self { api }
  }

  pub async fn record(&self, client_id: &str) -> Result<FinanceRecord, ApiError> {
    self
      .api
      .send(ApiRequest::get(client_path(client_id, "finance")?))
      .await?
      .data()
  }

  pub async fn record_repayment(&self, client_id: &str, repayment: &NewRepayment) -> Result<Saved<Repayment>, ApiError> {
    let request = ApiRequest::post(client_path(client_id, "repayments")?).json(repayment)?;
    self.api.send(request).await?.saved()
  }

  pub async fn apply_penalty(&self, client_id: &str, penalty: &NewPenalty) -> Result<Saved<Penalty>, ApiError> {
    let request = ApiRequest::post(client_path(client_id, "penalties")?).json(penalty)?;
    self.api.send(request).await?.saved()
  }
}
