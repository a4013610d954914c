//! Single-step finance forms.

use loandesk_core::{NewPenalty, NewRepayment, ValidationResult};

use crate::field::FieldRule;
use crate::flow::{FormFlow, WizardError};
use crate::schema::{StepSchema, StepValues};

#[derive(Debug, Clone, PartialEq)]
pub struct RepaymentSubmission {
  pub client_id: String,
  pub repayment: NewRepayment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PenaltySubmission {
  pub client_id: String,
  pub penalty: NewPenalty,
}

fn single<T>(steps: Vec<T>) -> Result<T, WizardError> {
  steps.into_iter().next().ok_or(WizardError::Incomplete { index: 0 })
}

pub struct RepaymentForm {
  client_id: String,
  steps: Vec<StepSchema>,
}

impl RepaymentForm {
  pub fn new(client_id: impl Into<String>) -> Self {
    Self {
      client_id: client_id.into(),
      steps: vec![StepSchema::new(
        "Record repayment",
        vec![
          FieldRule::number("amount", "Amount").required().range(Some(0.01), None),
          FieldRule::date("paidOn", "Payment date").required().not_future(),
        ],
      )],
    }
  }
}

impl FormFlow for RepaymentForm {
  type Step = NewRepayment;
  type Payload = RepaymentSubmission;

  fn steps(&self) -> &[StepSchema] {
    &self.steps
  }

  fn convert(&self, _index: usize, values: &StepValues) -> ValidationResult<NewRepayment> {
    Ok(NewRepayment {
      amount: values.require_number("amount")?,
      paid_on: values.require_date("paidOn")?,
    })
  }

  fn assemble(&self, steps: Vec<NewRepayment>) -> Result<RepaymentSubmission, WizardError> {
    Ok(RepaymentSubmission {
      client_id: self.client_id.clone(),
      repayment: single(steps)?,
    })
  }

  fn success_route(&self) -> String {
    format!("/finance/{}", self.client_id)
  }
}

pub struct PenaltyForm {
  client_id: String,
  steps: Vec<StepSchema>,
}

impl PenaltyForm {
  pub fn new(client_id: impl Into<String>) -> Self {
    Self {
      client_id: client_id.into(),
      steps: vec![StepSchema::new(
        "Apply penalty",
        vec![
          FieldRule::number("amount", "Amount").required().range(Some(0.01), None),
          FieldRule::text("reason", "Reason").required().min_len(3).max_len(200),
        ],
      )],
    }
  }
}

impl FormFlow for PenaltyForm {
  type Step = NewPenalty;
  type Payload = PenaltySubmission;

  fn steps(&self) -> &[StepSchema] {
    &self.steps
  }

  fn convert(&self, _index: usize, values: &StepValues) -> ValidationResult<NewPenalty> {
    Ok(NewPenalty {
      amount: values.require_number("amount")?,
      reason: values.require_text("reason")?,
    })
  }

  fn assemble(&self, steps: Vec<NewPenalty>) -> Result<PenaltySubmission, WizardError> {
    Ok(PenaltySubmission {
      client_id: self.client_id.clone(),
      penalty: single(steps)?,
    })
  }

  fn success_route(&self) -> String {
    format!("/finance/{}", self.client_id)
  }
}
