//! Wizard state machine.
//!
//! The step index only moves forward through [`Wizard::next`], which validates
//! the current step's fields. The create/update call only fires from
//! [`Wizard::finish`] on the last step after [`Wizard::request_submit`].

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::draft::FormDraft;
use crate::flow::{FormFlow, Submitter, WizardError};
use crate::schema::StepSchema;

/// Result of pressing "next"
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
  Moved { from: usize, to: usize },
  /// Last step validated; the index stays put
  Ready,
  /// Validation failed on these fields; the index stays put
  Blocked { fields: Vec<String> },
}

/// Why finish did not fire the network call
#[derive(Debug, Clone, PartialEq)]
pub enum NotReady {
  NotOnLastStep { step: usize, last: usize },
  SubmitNotRequested,
  Invalid { fields: Vec<String> },
  AlreadyCompleted,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FinishOutcome {
  NotReady(NotReady),
  /// Show the confirmation and navigate to `route`
  Completed { message: String, route: String },
  /// Show the server message with a retry option
  Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum WizardStatus {
  #[default]
  Editing,
  Completed { message: String, route: String },
  Failed { message: String },
}

pub struct Wizard<F: FormFlow> {
  flow: F,
  step: usize,
  submit_requested: bool,
  draft: FormDraft,
  outputs: Vec<Option<F::Step>>,
  status: WizardStatus,
  today: NaiveDate,
}

impl<F: FormFlow> Wizard<F> {
  pub fn new(flow: F) -> Result<Self, WizardError> {
    Self::with_draft(flow, FormDraft::new())
  }

  /// Start with prefilled inputs (edit forms)
  pub fn with_draft(flow: F, draft: FormDraft) -> Result<Self, WizardError> {
    let count = flow.steps().len();
    if count == 0 {
      return Err(WizardError::NoSteps);
    }

    Ok(Self {
      flow,
      step: 0,
      submit_requested: false,
      draft,
      outputs: vec![None; count],
      status: WizardStatus::Editing,
      today: chrono::Local::now().date_naive(),
    })
  }

  /// Pin "today" for date rules
  pub fn with_today(mut self, today: NaiveDate) -> Self {
    self.today = today;
    self
  }

  pub fn flow(&self) -> &F {
    &self.flow
  }

  pub fn step(&self) -> usize {
    self.step
  }

  pub fn step_count(&self) -> usize {
    self.flow.steps().len()
  }

  pub fn last_step(&self) -> usize {
    self.step_count() - 1
  }

  pub fn is_last_step(&self) -> bool {
    self.step == self.last_step()
  }

  pub fn current_schema(&self) -> &StepSchema {
    &self.flow.steps()[self.step]
  }

  pub fn draft(&self) -> &FormDraft {
    &self.draft
  }

  pub fn status(&self) -> &WizardStatus {
    &self.status
  }

  pub fn submit_requested(&self) -> bool {
    self.submit_requested
  }

  pub fn set(&mut self, field: &str, value: impl Into<String>) {
    self.draft.set(field, value);
  }

  pub fn touch(&mut self, field: &str) {
    self.draft.touch(field);
  }

  /// Validate and convert the step at `index`, recording failures in the draft
  fn validate_step(&mut self, index: usize) -> Result<F::Step, Vec<String>> {
    let schema = &self.flow.steps()[index];
    let converted = schema
      .validate(&self.draft, self.today)
      .and_then(|values| self.flow.convert(index, &values).map_err(|e| vec![e]));

    self.draft.clear_errors(schema.field_names());
    match converted {
      Ok(output) => Ok(output),
      Err(errors) => {
        let fields = errors.iter().map(|e| e.field.clone()).collect();
        self.draft.mark_errors(&errors);
        Err(fields)
      }
    }
  }

  /// Validate the current step; advance by one when it passes
  pub fn next(&mut self) -> Advance {
    let index = self.step;
    match self.validate_step(index) {
      Ok(output) => {
        self.outputs[index] = Some(output);
        if self.is_last_step() {
          return Advance::Ready;
        }
        self.step += 1;
        debug!("Wizard advanced {} -> {}", index, self.step);
        Advance::Moved {
          from: index,
          to: self.step,
        }
      }
      Err(fields) => {
        debug!("Wizard blocked on step {}: {:?}", index, fields);
        Advance::Blocked { fields }
      }
    }
  }

  /// Go back one step without validating
  pub fn back(&mut self) -> usize {
    self.step = self.step.saturating_sub(1);
    self.step
  }

  /// The explicit create/update action
  pub fn request_submit(&mut self) {
    self.submit_requested = true;
  }

  /// Fire the create/update call if the wizard is on its last step and submit
  /// was explicitly requested. The submit flag is consumed either way.
  pub async fn finish<S>(&mut self, submitter: &S) -> FinishOutcome
  where
    S: Submitter<F::Payload> + ?Sized,
  {
    let requested = std::mem::take(&mut self.submit_requested);

    if matches!(self.status, WizardStatus::Completed { .. }) {
      return FinishOutcome::NotReady(NotReady::AlreadyCompleted);
    }
    if !self.is_last_step() {
      return FinishOutcome::NotReady(NotReady::NotOnLastStep {
        step: self.step,
        last: self.last_step(),
      });
    }
    if !requested {
      return FinishOutcome::NotReady(NotReady::SubmitNotRequested);
    }

    let payload = match self.collect_payload() {
      Ok(payload) => payload,
      Err(Ok(fields)) => return FinishOutcome::NotReady(NotReady::Invalid { fields }),
      Err(Err(e)) => return self.fail(e.to_string()),
    };

    match submitter.submit(&payload).await {
      Ok(message) => {
        let route = self.flow.success_route();
        info!("Form submitted, navigating to {}", route);
        self.status = WizardStatus::Completed {
          message: message.clone(),
          route: route.clone(),
        };
        FinishOutcome::Completed { message, route }
      }
      Err(e) => self.fail(e.message),
    }
  }

  /// Revalidate the last step, fill any missing earlier outputs, and assemble.
  /// `Err(Ok(fields))` is a validation failure, `Err(Err(_))` an assembly failure.
  fn collect_payload(&mut self) -> Result<F::Payload, Result<Vec<String>, WizardError>> {
    let last = self.last_step();
    for index in 0..=last {
      if index == last || self.outputs[index].is_none() {
        match self.validate_step(index) {
          Ok(output) => self.outputs[index] = Some(output),
          Err(fields) => {
            self.step = index;
            return Err(Ok(fields));
          }
        }
      }
    }

    let mut steps = Vec::with_capacity(self.outputs.len());
    for (index, output) in self.outputs.iter().enumerate() {
      steps.push(
        output
          .clone()
          .ok_or(Err::<Vec<String>, _>(WizardError::Incomplete { index }))?,
      );
    }
    self.flow.assemble(steps).map_err(Err)
  }

  fn fail(&mut self, message: String) -> FinishOutcome {
    warn!("Form submission failed: {}", message);
    self.status = WizardStatus::Failed {
      message: message.clone(),
    };
    FinishOutcome::Failed { message }
  }

  /// Reopen the form after a failed submission. Draft and step are kept.
  pub fn retry(&mut self) -> bool {
    if matches!(self.status, WizardStatus::Failed { .. }) {
      self.status = WizardStatus::Editing;
      return true;
    }
    false
  }
}
