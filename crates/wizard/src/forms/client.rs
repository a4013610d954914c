//! Three-step client onboarding / edit form.

use chrono::NaiveDate;
use loandesk_core::{Client, DocumentRef, LoanTerms, NewClient, ValidationResult};
use std::path::PathBuf;

use crate::draft::FormDraft;
use crate::field::FieldRule;
use crate::flow::{FormFlow, FormMode, WizardError};
use crate::schema::{StepSchema, StepValues};

/// A local file to upload before the record is sent
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
  pub name: String,
  pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonalDetails {
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub phone: String,
  pub date_of_birth: NaiveDate,
  pub national_id: String,
  pub address: String,
  pub occupation: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClientStep {
  Personal(PersonalDetails),
  Loan(LoanTerms),
  Documents {
    agent_id: Option<String>,
    attachments: Vec<Attachment>,
  },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientSubmission {
  pub mode: FormMode,
  pub client: NewClient,
  pub attachments: Vec<Attachment>,
}

const DOCUMENT_FIELDS: &[(&str, &str)] = &[("idDocument", "ID document"), ("proofOfAddress", "Proof of address")];

pub struct ClientForm {
  mode: FormMode,
  existing_documents: Vec<DocumentRef>,
  steps: Vec<StepSchema>,
}

impl ClientForm {
  pub fn create() -> Self {
    Self {
      mode: FormMode::Create,
      existing_documents: Vec::new(),
      steps: Self::schemas(),
    }
  }

  /// Edit form for an existing client, with its current values prefilled
  pub fn edit(client: &Client) -> (Self, FormDraft) {
    let form = Self {
      mode: FormMode::Update(client.id.clone()),
      existing_documents: client.documents.clone(),
      steps: Self::schemas(),
    };

    let mut draft = FormDraft::from_values([
      ("firstName", client.first_name.clone()),
      ("lastName", client.last_name.clone()),
      ("email", client.email.clone()),
      ("phone", client.phone.clone()),
      ("dateOfBirth", client.date_of_birth.to_string()),
      ("nationalId", client.national_id.clone()),
      ("address", client.address.clone()),
      ("principal", client.loan.principal.to_string()),
      ("interestRate", client.loan.interest_rate.to_string()),
      ("durationMonths", client.loan.duration_months.to_string()),
      ("startDate", client.loan.start_date.to_string()),
    ]);
    if let Some(occupation) = &client.occupation {
      draft.set("occupation", occupation.clone());
    }
    if let Some(agent_id) = &client.agent_id {
      draft.set("agentId", agent_id.clone());
    }

    (form, draft)
  }

  pub fn mode(&self) -> &FormMode {
    &self.mode
  }

  fn schemas() -> Vec<StepSchema> {
    vec![
      StepSchema::new(
        "Personal details",
        vec![
          FieldRule::text("firstName", "First name").required().min_len(2).max_len(50),
          FieldRule::text("lastName", "Last name").required().min_len(2).max_len(50),
          FieldRule::email("email", "Email").required(),
          FieldRule::phone("phone", "Phone number").required(),
          FieldRule::date("dateOfBirth", "Date of birth").required().not_future(),
          FieldRule::text("nationalId", "National ID").required().min_len(5),
          FieldRule::text("address", "Address").required().min_len(5),
          FieldRule::text("occupation", "Occupation"),
        ],
      ),
      StepSchema::new(
        "Loan terms",
        vec![
          FieldRule::number("principal", "Loan amount").required().range(Some(1.0), None),
          FieldRule::number("interestRate", "Interest rate (%)")
            .required()
            .range(Some(0.0), Some(100.0)),
          FieldRule::number("durationMonths", "Duration (months)")
            .required()
            .range(Some(1.0), Some(120.0))
            .integer(),
          FieldRule::date("startDate", "Start date").required(),
        ],
      ),
      StepSchema::new(
        "Documents and assignment",
        vec![
          FieldRule::text("agentId", "Credit agent ID"),
          FieldRule::file("idDocument", "ID document"),
          FieldRule::file("proofOfAddress", "Proof of address"),
        ],
      ),
    ]
  }
}

impl FormFlow for ClientForm {
  type Step = ClientStep;
  type Payload = ClientSubmission;

  fn steps(&self) -> &[StepSchema] {
    &self.steps
  }

  fn convert(&self, index: usize, values: &StepValues) -> ValidationResult<ClientStep> {
    let step = match index {
      0 => ClientStep::Personal(PersonalDetails {
        first_name: values.require_text("firstName")?,
        last_name: values.require_text("lastName")?,
        email: values.require_text("email")?,
        phone: values.require_text("phone")?,
        date_of_birth: values.require_date("dateOfBirth")?,
        national_id: values.require_text("nationalId")?,
        address: values.require_text("address")?,
        occupation: values.text("occupation"),
      }),
      1 => ClientStep::Loan(LoanTerms {
        principal: values.require_number("principal")?,
        interest_rate: values.require_number("interestRate")?,
        duration_months: values.require_number("durationMonths")? as u32,
        start_date: values.require_date("startDate")?,
      }),
      _ => ClientStep::Documents {
        agent_id: values.text("agentId"),
        attachments: DOCUMENT_FIELDS
          .iter()
          .filter_map(|(field, name)| {
            values.file(field).map(|path| Attachment {
              name: (*name).to_string(),
              path,
            })
          })
          .collect(),
      },
    };
    Ok(step)
  }

  fn assemble(&self, steps: Vec<ClientStep>) -> Result<ClientSubmission, WizardError> {
    let mut iter = steps.into_iter();
    let Some(ClientStep::Personal(personal)) = iter.next() else {
      return Err(WizardError::StepMismatch { index: 0 });
    };
    let Some(ClientStep::Loan(loan)) = iter.next() else {
      return Err(WizardError::StepMismatch { index: 1 });
    };
    let Some(ClientStep::Documents { agent_id, attachments }) = iter.next() else {
      return Err(WizardError::StepMismatch { index: 2 });
    };

    Ok(ClientSubmission {
      mode: self.mode.clone(),
      client: NewClient {
        first_name: personal.first_name,
        last_name: personal.last_name,
        email: personal.email,
        phone: personal.phone,
        address: personal.address,
        national_id: personal.national_id,
        date_of_birth: personal.date_of_birth,
        occupation: personal.occupation,
        agent_id,
        loan,
        documents: self.existing_documents.clone(),
      },
      attachments,
    })
  }

  fn success_route(&self) -> String {
    match &self.mode {
      FormMode::Create => "/clients".to_string(),
      FormMode::Update(id) => format!("/clients/{}", id),
    }
  }
}
