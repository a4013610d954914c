use chrono::NaiveDate;
use loandesk_core::PerformanceReport;

use crate::request::ApiRequest;
use crate::{ApiClient, ApiError};

#[derive(Debug, Clone)]
pub struct ReportService {
  api: ApiClient,
}

impl ReportService {
  pub fn new(api: ApiClient) -> Self {
    Self { api }
  }

  /// Per-agent performance, optionally bounded by date
  pub async fn performance(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<PerformanceReport, ApiError> {
    let mut request = ApiRequest::get("/reports/performance");
    if let Some(from) = from {
      request = request.query("from", from.format("%Y-%m-%d").to_string());
    }
    if let Some(to) = to {
      request = request.query("to", to.format("%Y-%m-%d").to_string());
    }
    self.api.send(request).await?.data()
  }
}
