use async_trait::async_trait;
use loandesk_core::ValidationResult;
use std::fmt;

use crate::schema::{StepSchema, StepValues};

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
  #[error("Form has no steps")]
  NoSteps,
  #[error("Step {index} has no validated output")]
  Incomplete { index: usize },
  #[error("Unexpected output for step {index}")]
  StepMismatch { index: usize },
}

/// Failure reported by a submitter, shown to the user as-is
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct SubmitError {
  pub message: String,
}

impl SubmitError {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
    }
  }
}

/// Whether a form creates a record or updates an existing one
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormMode {
  #[default]
  Create,
  Update(String),
}

impl FormMode {
  pub fn is_update(&self) -> bool {
    matches!(self, FormMode::Update(_))
  }

  pub fn verb(&self) -> &'static str {
    match self {
      FormMode::Create => "created",
      FormMode::Update(_) => "updated",
    }
  }
}

/// A concrete multi-step form: its schemas, how each step converts into a
/// typed output, and how the outputs combine into a request payload.
pub trait FormFlow {
  /// Tagged union of per-step outputs
  type Step: Clone + fmt::Debug;
  type Payload: Send + Sync;

  fn steps(&self) -> &[StepSchema];

  /// Convert one validated step. Called once per successful advance.
  fn convert(&self, index: usize, values: &StepValues) -> ValidationResult<Self::Step>;

  /// Combine every step's output, in step order
  fn assemble(&self, steps: Vec<Self::Step>) -> Result<Self::Payload, WizardError>;

  /// Route to navigate to after a successful submission
  fn success_route(&self) -> String;
}

/// Sends a finished form to the backend. Returns the confirmation text.
#[async_trait]
pub trait Submitter<P: Send + Sync>: Send + Sync {
  async fn submit(&self, payload: &P) -> Result<String, SubmitError>;
}
