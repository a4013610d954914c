//! Field rules and the typed values they produce.

use chrono::NaiveDate;
use loandesk_core::{
  ValidationError, ValidationResult, check_length, check_not_future, check_range, parse_date, parse_number,
  require_choice, require_text, validate_email, validate_phone,
};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
  Text,
  Email,
  Phone,
  Number {
    min: Option<f64>,
    max: Option<f64>,
    integer: bool,
  },
  Date {
    not_future: bool,
  },
  Choice(&'static [&'static str]),
  /// Local file path that must exist
  File,
}

/// A parsed, validated input
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
  Text(String),
  Number(f64),
  Date(NaiveDate),
  Choice(&'static str),
  File(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
  pub name: &'static str,
  pub label: &'static str,
  pub kind: FieldKind,
  pub required: bool,
  pub min_len: Option<usize>,
  pub max_len: Option<usize>,
}

impl FieldRule {
  fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
    Self {
      name,
      label,
      kind,
      required: false,
      min_len: None,
      max_len: None,
    }
  }

  pub fn text(name: &'static str, label: &'static str) -> Self {
    Self::new(name, label, FieldKind::Text)
  }

  pub fn email(name: &'static str, label: &'static str) -> Self {
    Self::new(name, label, FieldKind::Email)
  }

  pub fn phone(name: &'static str, label: &'static str) -> Self {
    Self::new(name, label, FieldKind::Phone)
  }

  pub fn number(name: &'static str, label: &'static str) -> Self {
    Self::new(
      name,
      label,
      FieldKind::Number {
        min: None,
        max: None,
        integer: false,
      },
    )
  }

  pub fn date(name: &'static str, label: &'static str) -> Self {
    Self::new(name, label, FieldKind::Date { not_future: false })
  }

  pub fn choice(name: &'static str, label: &'static str, options: &'static [&'static str]) -> Self {
    Self::new(name, label, FieldKind::Choice(options))
  }

  pub fn file(name: &'static str, label: &'static str) -> Self {
    Self::new(name, label, FieldKind::File)
  }

  pub fn required(mut self) -> Self {
    self.required = true;
    self
  }

  pub fn required_if(mut self, condition: bool) -> Self {
    self.required = condition;
    self
  }

  pub fn min_len(mut self, len: usize) -> Self {
    self.min_len = Some(len);
    self
  }

  pub fn max_len(mut self, len: usize) -> Self {
    self.max_len = Some(len);
    self
  }

  /// Bounds for number fields; ignored for other kinds
  pub fn range(mut self, lo: Option<f64>, hi: Option<f64>) -> Self {
    if let FieldKind::Number { min, max, .. } = &mut self.kind {
      *min = lo;
      *max = hi;
    }
    self
  }

  pub fn integer(mut self) -> Self {
    if let FieldKind::Number { integer, .. } = &mut self.kind {
      *integer = true;
    }
    self
  }

  pub fn not_future(mut self) -> Self {
    if let FieldKind::Date { not_future } = &mut self.kind {
      *not_future = true;
    }
    self
  }

  /// Validate a raw input. `Ok(None)` means an optional field left empty.
  pub fn validate(&self, raw: Option<&str>, today: NaiveDate) -> ValidationResult<Option<FieldValue>> {
    let text = match require_text(raw, self.name, self.label) {
      Ok(text) => text,
      Err(e) if self.required => return Err(e),
      Err(_) => return Ok(None),
    };

    let value = match &self.kind {
      FieldKind::Text => {
        check_length(&text, self.name, self.min_len, self.max_len)?;
        FieldValue::Text(text)
      }
      FieldKind::Email => {
        validate_email(&text, self.name)?;
        FieldValue::Text(text.to_ascii_lowercase())
      }
      FieldKind::Phone => {
        validate_phone(&text, self.name)?;
        FieldValue::Text(text)
      }
      FieldKind::Number { min, max, integer } => {
        let n = parse_number(&text, self.name)?;
        if *integer && n.fract() != 0.0 {
          return Err(ValidationError::invalid_type(self.name, "whole number"));
        }
        check_range(n, self.name, *min, *max)?;
        FieldValue::Number(n)
      }
      FieldKind::Date { not_future } => {
        let date = parse_date(&text, self.name)?;
        if *not_future {
          check_not_future(date, today, self.name)?;
        }
        FieldValue::Date(date)
      }
      FieldKind::Choice(options) => FieldValue::Choice(require_choice(&text, self.name, options)?),
      FieldKind::File => {
        let path = Path::new(&text);
        if !path.is_file() {
          return Err(ValidationError::new(self.name, format!("file not found: {}", text)));
        }
        FieldValue::File(path.to_path_buf())
      }
    };

    Ok(Some(value))
  }
}
