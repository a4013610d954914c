pub mod controller;
pub mod draft;
pub mod field;
pub mod flow;
pub mod forms;
pub mod schema;

pub use controller::{Advance, FinishOutcome, NotReady, Wizard, WizardStatus};
pub use draft::FormDraft;
pub use field::{FieldKind, FieldRule, FieldValue};
pub use flow::{FormFlow, FormMode, SubmitError, Submitter, WizardError};
pub use forms::{
  Attachment, ClientForm, ClientStep, ClientSubmission, PenaltyForm, PenaltySubmission, PersonalDetails, RepaymentForm,
  RepaymentSubmission, StaffForm, StaffStep, StaffSubmission,
};
pub use schema::{StepSchema, StepValues};
