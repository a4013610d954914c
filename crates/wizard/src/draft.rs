use std::collections::{BTreeMap, BTreeSet};

use loandesk_core::ValidationError;

/// Raw form inputs plus touched/error state for inline feedback
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormDraft {
  values: BTreeMap<String, String>,
  touched: BTreeSet<String>,
  errors: BTreeMap<String, String>,
}

impl FormDraft {
  pub fn new() -> Self {
    Self::default()
  }

  /// Prefill from existing field values
  pub fn from_values<I, K, V>(values: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
  {
    Self {
      values: values.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
      ..Default::default()
    }
  }

  pub fn set(&mut self, field: &str, value: impl Into<String>) {
    self.values.insert(field.to_string(), value.into());
  }

  pub fn get(&self, field: &str) -> Option<&str> {
    self.values.get(field).map(String::as_str)
  }

  pub fn touch(&mut self, field: &str) {
    self.touched.insert(field.to_string());
  }

  pub fn is_touched(&self, field: &str) -> bool {
    self.touched.contains(field)
  }

  pub fn error(&self, field: &str) -> Option<&str> {
    self.errors.get(field).map(String::as_str)
  }

  pub fn errors(&self) -> &BTreeMap<String, String> {
    &self.errors
  }

  pub fn has_errors(&self) -> bool {
    !self.errors.is_empty()
  }

  /// Record failures and mark their fields touched so errors show inline
  pub fn mark_errors(&mut self, errors: &[ValidationError]) {
    for e in errors {
      self.touched.insert(e.field.clone());
      self.errors.insert(e.field.clone(), e.message.clone());
    }
  }

  pub fn clear_errors<'a>(&mut self, fields: impl IntoIterator<Item = &'a str>) {
    for field in fields {
      self.errors.remove(field);
    }
  }
}
