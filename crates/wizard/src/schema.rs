use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::PathBuf;

use loandesk_core::{ValidationError, ValidationResult};

use crate::draft::FormDraft;
use crate::field::{FieldRule, FieldValue};

/// Fields shown and validated together on one wizard step
#[derive(Debug, Clone, PartialEq)]
pub struct StepSchema {
  pub title: &'static str,
  pub fields: Vec<FieldRule>,
}

impl StepSchema {
  pub fn new(title: &'static str, fields: Vec<FieldRule>) -> Self {
    Self { title, fields }
  }

  pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
    self.fields.iter().map(|f| f.name)
  }

  /// Validate this step's fields only. Collects every failure, not just the first.
  pub fn validate(&self, draft: &FormDraft, today: NaiveDate) -> Result<StepValues, Vec<ValidationError>> {
    let mut values = BTreeMap::new();
    let mut errors = Vec::new();

    for rule in &self.fields {
      match rule.validate(draft.get(rule.name), today) {
        Ok(Some(value)) => {
          values.insert(rule.name, value);
        }
        Ok(None) => {}
        Err(e) => errors.push(e),
      }
    }

    if errors.is_empty() {
      Ok(StepValues { values })
    } else {
      Err(errors)
    }
  }
}

/// Validated values of one step, keyed by field name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepValues {
  values: BTreeMap<&'static str, FieldValue>,
}

impl StepValues {
  pub fn get(&self, field: &str) -> Option<&FieldValue> {
    self.values.get(field)
  }

  pub fn text(&self, field: &str) -> Option<String> {
    match self.values.get(field) {
      Some(FieldValue::Text(s)) => Some(s.clone()),
      Some(FieldValue::Choice(s)) => Some((*s).to_string()),
      _ => None,
    }
  }

  pub fn number(&self, field: &str) -> Option<f64> {
    match self.values.get(field) {
      Some(FieldValue::Number(n)) => Some(*n),
      _ => None,
    }
  }

  pub fn date(&self, field: &str) -> Option<NaiveDate> {
    match self.values.get(field) {
      Some(FieldValue::Date(d)) => Some(*d),
      _ => None,
    }
  }

  pub fn file(&self, field: &str) -> Option<PathBuf> {
    match self.values.get(field) {
      Some(FieldValue::File(p)) => Some(p.clone()),
      _ => None,
    }
  }

  pub fn require_text(&self, field: &str) -> ValidationResult<String> {
    self.text(field).ok_or_else(|| ValidationError::invalid_type(field, "text"))
  }

  pub fn require_number(&self, field: &str) -> ValidationResult<f64> {
    self.number(field).ok_or_else(|| ValidationError::invalid_type(field, "number"))
  }

  pub fn require_date(&self, field: &str) -> ValidationResult<NaiveDate> {
    self.date(field).ok_or_else(|| ValidationError::invalid_type(field, "date"))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
  }

  fn schema() -> StepSchema {
    StepSchema::new(
      "Personal",
      vec![
        FieldRule::text("firstName", "First name").required(),
        FieldRule::text("lastName", "Last name").required(),
        FieldRule::number("age", "Age").range(Some(18.0), None),
      ],
    )
  }

  #[test]
  fn test_collects_all_failures() {
    let draft = FormDraft::from_values([("age", "12")]);
    let errors = schema().validate(&draft, today()).unwrap_err();

    let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["firstName", "lastName", "age"]);
  }

  #[test]
  fn test_ignores_fields_of_other_steps() {
    let draft = FormDraft::from_values([("firstName", "Ada"), ("lastName", "Obi"), ("principal", "oops")]);
    let values = schema().validate(&draft, today()).unwrap();

    assert_eq!(values.text("firstName").as_deref(), Some("Ada"));
    assert_eq!(values.number("age"), None);
    assert!(values.get("principal").is_none());
  }
}
