//! Wizard submitters backed by the typed services.

use async_trait::async_trait;
use tracing::debug;
use wizard::{ClientSubmission, FormMode, PenaltySubmission, RepaymentSubmission, StaffSubmission, SubmitError, Submitter};

use crate::services::{ClientService, FinanceService, StaffService};
use crate::upload::Uploader;
use crate::ApiError;

fn submit_error(e: ApiError) -> SubmitError {
  SubmitError::new(e.user_message())
}

fn require_uploader(uploader: Option<&Uploader>) -> Result<&Uploader, SubmitError> {
  uploader.ok_or_else(|| SubmitError::new("File uploads are not configured (set upload.cloud_name and upload.upload_preset)"))
}

pub struct ClientSubmitter {
  clients: ClientService,
  uploader: Option<Uploader>,
}

impl ClientSubmitter {
  pub fn new(clients: ClientService, uploader: Option<Uploader>) -> Self {
    Self { clients, uploader }
  }
}

#[async_trait]
impl Submitter<ClientSubmission> for ClientSubmitter {
  async fn submit(&self, payload: &ClientSubmission) -> Result<String, SubmitError> {
    let mut client = payload.client.clone();

    for attachment in &payload.attachments {
      let uploader = require_uploader(self.uploader.as_ref())?;
      let document = uploader
        .upload(&attachment.path, &attachment.name)
        .await
        .map_err(submit_error)?;
      // A new upload replaces the stored document of the same kind
      client.documents.retain(|d| d.name != document.name);
      client.documents.push(document);
    }

    let saved = match &payload.mode {
      FormMode::Create => self.clients.create(&client).await,
      FormMode::Update(id) => self.clients.update(id, &client).await,
    }
    .map_err(submit_error)?;

    debug!("Client {} {}", saved.record.id, payload.mode.verb());
    Ok(saved
      .message
      .unwrap_or_else(|| format!("Client {} {}", saved.record.full_name(), payload.mode.verb())))
  }
}

pub struct StaffSubmitter {
  staff: StaffService,
  uploader: Option<Uploader>,
}

impl StaffSubmitter {
  pub fn new(staff: StaffService, uploader: Option<Uploader>) -> Self {
    Self { staff, uploader }
  }
}

#[async_trait]
impl Submitter<StaffSubmission> for StaffSubmitter {
  async fn submit(&self, payload: &StaffSubmission) -> Result<String, SubmitError> {
    let mut staff = payload.staff.clone();

    if let Some(photo) = &payload.photo {
      let uploader = require_uploader(self.uploader.as_ref())?;
      staff.photo = Some(uploader.upload(photo, "Photo").await.map_err(submit_error)?);
    }

    let saved = match &payload.mode {
      FormMode::Create => self.staff.create(&staff).await,
      FormMode::Update(id) => self.staff.update(id, &staff).await,
    }
    .map_err(submit_error)?;

    Ok(saved.message.unwrap_or_else(|| {
      format!(
        "{} {} {}",
        self.staff.role().profile().label,
        saved.record.full_name(),
        payload.mode.verb()
      )
    }))
  }
}

pub struct RepaymentSubmitter {
  finance: FinanceService,
}

impl RepaymentSubmitter {
  pub fn new(finance: FinanceService) -> Self {
    Self { finance }
  }
}

#[async_trait]
impl Submitter<RepaymentSubmission> for RepaymentSubmitter {
  async fn submit(&self, payload: &RepaymentSubmission) -> Result<String, SubmitError> {
    let saved = self
      .finance
      .record_repayment(&payload.client_id, &payload.repayment)
      .await
      .map_err(submit_error)?;
    Ok(saved
      .message
      .unwrap_or_else(|| format!("Repayment of {:.2} recorded", saved.record.amount)))
  }
}

pub struct PenaltySubmitter {
  finance: FinanceService,
}

impl PenaltySubmitter {
  pub fn new(finance: FinanceService) -> Self {
    Self { finance }
  }
}

#[async_trait]
impl Submitter<PenaltySubmission> for PenaltySubmitter {
  async fn submit(&self, payload: &PenaltySubmission) -> Result<String, SubmitError> {
    let saved = self
      .finance
      .apply_penalty(&payload.client_id, &payload.penalty)
      .await
      .map_err(submit_error)?;
    Ok(saved
      .message
      .unwrap_or_else(|| format!("Penalty of {:.2} applied", saved.record.amount)))
  }
}
