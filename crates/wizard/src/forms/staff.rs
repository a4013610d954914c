//! Two-step staff registration / edit form, one per role.

use loandesk_core::{DocumentRef, NewStaff, Role, StaffMember, ValidationResult};
use std::path::PathBuf;

use crate::draft::FormDraft;
use crate::field::FieldRule;
use crate::flow::{FormFlow, FormMode, WizardError};
use crate::schema::{StepSchema, StepValues};

#[derive(Debug, Clone, PartialEq)]
pub enum StaffStep {
  Identity {
    first_name: String,
    last_name: String,
    email: String,
    password: Option<String>,
  },
  Contact {
    phone: String,
    address: Option<String>,
    manager_id: Option<String>,
    photo: Option<PathBuf>,
  },
}

#[derive(Debug, Clone, PartialEq)]
pub struct StaffSubmission {
  pub mode: FormMode,
  pub staff: NewStaff,
  /// New photo to upload; replaces `staff.photo` once uploaded
  pub photo: Option<PathBuf>,
}

pub struct StaffForm {
  role: Role,
  mode: FormMode,
  existing_photo: Option<DocumentRef>,
  steps: Vec<StepSchema>,
}

impl StaffForm {
  pub fn create(role: Role) -> Self {
    Self {
      role,
      steps: Self::schemas(role, &FormMode::Create),
      mode: FormMode::Create,
      existing_photo: None,
    }
  }

  pub fn edit(member: &StaffMember) -> (Self, FormDraft) {
    let mode = FormMode::Update(member.id.clone());
    let form = Self {
      role: member.role,
      steps: Self::schemas(member.role, &mode),
      mode,
      existing_photo: member.photo.clone(),
    };

    let mut draft = FormDraft::from_values([
      ("firstName", member.first_name.clone()),
      ("lastName", member.last_name.clone()),
      ("email", member.email.clone()),
      ("phone", member.phone.clone()),
    ]);
    if let Some(address) = &member.address {
      draft.set("address", address.clone());
    }
    if let Some(manager_id) = &member.manager_id {
      draft.set("managerId", manager_id.clone());
    }

    (form, draft)
  }

  pub fn role(&self) -> Role {
    self.role
  }

  fn schemas(role: Role, mode: &FormMode) -> Vec<StepSchema> {
    // Password is only mandatory when the account is first created
    let mut contact = vec![
      FieldRule::phone("phone", "Phone number").required(),
      FieldRule::text("address", "Address").min_len(5),
    ];
    if role == Role::CreditAgent {
      contact.push(FieldRule::text("managerId", "Manager ID").required());
    }
    contact.push(FieldRule::file("photo", "Photo"));

    vec![
      StepSchema::new(
        "Identity",
        vec![
          FieldRule::text("firstName", "First name").required().min_len(2).max_len(50),
          FieldRule::text("lastName", "Last name").required().min_len(2).max_len(50),
          FieldRule::email("email", "Email").required(),
          FieldRule::text("password", "Password")
            .required_if(!mode.is_update())
            .min_len(8),
        ],
      ),
      StepSchema::new("Contact and assignment", contact),
    ]
  }
}

impl FormFlow for StaffForm {
  type Step = StaffStep;
  type Payload = StaffSubmission;

  fn steps(&self) -> &[StepSchema] {
    &self.steps
  }

  fn convert(&self, index: usize, values: &StepValues) -> ValidationResult<StaffStep> {
    let step = match index {
      0 => StaffStep::Identity {
        first_name: values.require_text("firstName")?,
        last_name: values.require_text("lastName")?,
        email: values.require_text("email")?,
        password: values.text("password"),
      },
      _ => StaffStep::Contact {
        phone: values.require_text("phone")?,
        address: values.text("address"),
        manager_id: values.text("managerId"),
        photo: values.file("photo"),
      },
    };
    Ok(step)
  }

  fn assemble(&self, steps: Vec<StaffStep>) -> Result<StaffSubmission, WizardError> {
    match <[StaffStep; 2]>::try_from(steps) {
      Ok(
        [
          StaffStep::Identity {
            first_name,
            last_name,
            email,
            password,
          },
          StaffStep::Contact {
            phone,
            address,
            manager_id,
            photo,
          },
        ],
      ) => Ok(StaffSubmission {
        mode: self.mode.clone(),
        staff: NewStaff {
          role: self.role,
          first_name,
          last_name,
          email,
          phone,
          address,
          password,
          photo: self.existing_photo.clone(),
          manager_id,
        },
        photo,
      }),
      _ => Err(WizardError::StepMismatch { index: 0 }),
    }
  }

  fn success_route(&self) -> String {
    self.role.staff_collection().to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::controller::{Advance, Wizard};

  fn fill_identity(w: &mut Wizard<StaffForm>) {
    w.set("firstName", "Kemi");
    w.set("lastName", "Bello");
    w.set("email", "kemi@example.com");
    w.set("password", "s3cret-pass");
  }

  #[test]
  fn test_agent_requires_manager() {
    let mut w = Wizard::new(StaffForm::create(Role::CreditAgent)).unwrap();
    fill_identity(&mut w);
    assert_eq!(w.next(), Advance::Moved { from: 0, to: 1 });

    w.set("phone", "08012345678");
    assert_eq!(
      w.next(),
      Advance::Blocked {
        fields: vec!["managerId".to_string()]
      }
    );
    assert_eq!(w.draft().error("managerId"), Some("Manager ID is required"));
  }

  #[test]
  fn test_manager_has_no_manager_field() {
    let form = StaffForm::create(Role::Manager);
    let names: Vec<&str> = form.steps()[1].field_names().collect();
    assert!(!names.contains(&"managerId"));
    assert_eq!(form.success_route(), "/managers");
  }

  #[test]
  fn test_password_required_only_on_create() {
    let mut w = Wizard::new(StaffForm::create(Role::Director)).unwrap();
    fill_identity(&mut w);
    w.set("password", "");
    assert_eq!(
      w.next(),
      Advance::Blocked {
        fields: vec!["password".to_string()]
      }
    );

    let member = StaffMember {
      id: "m1".to_string(),
      role: Role::Manager,
      first_name: "Kemi".to_string(),
      last_name: "Bello".to_string(),
      email: "kemi@example.com".to_string(),
      phone: "08012345678".to_string(),
      address: None,
      photo: None,
      manager_id: None,
    };
    let (form, draft) = StaffForm::edit(&member);
    let mut w = Wizard::with_draft(form, draft).unwrap();
    assert_eq!(w.next(), Advance::Moved { from: 0, to: 1 });
    assert_eq!(w.next(), Advance::Ready);
  }

  #[test]
  fn test_assemble() {
    let form = StaffForm::create(Role::CreditAgent);
    let submission = form
      .assemble(vec![
        StaffStep::Identity {
          first_name: "Kemi".to_string(),
          last_name: "Bello".to_string(),
          email: "kemi@example.com".to_string(),
          password: Some("s3cret-pass".to_string()),
        },
        StaffStep::Contact {
          phone: "08012345678".to_string(),
          address: None,
          manager_id: Some("m1".to_string()),
          photo: None,
        },
      ])
      .unwrap();

    assert_eq!(submission.staff.role, Role::CreditAgent);
    assert_eq!(submission.staff.manager_id.as_deref(), Some("m1"));
    assert_eq!(submission.mode, FormMode::Create);
  }
}
