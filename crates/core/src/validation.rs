//! Input validation utilities
//!
//! Form inputs arrive as raw text. These helpers check and convert them with
//! consistent error messages.

use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

/// A validation error with field information
#[derive(Debug, Clone, PartialEq, Error)]
pub struct ValidationError {
  pub field: String,
  pub message: String,
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.field, self.message)
  }
}

impl ValidationError {
  pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      field: field.into(),
      message: message.into(),
    }
  }

  /// Create error for missing required field
  pub fn required(field: impl Into<String>, label: &str) -> Self {
    Self {
      field: field.into(),
      message: format!("{} is required", label),
    }
  }

  /// Create error for invalid type
  pub fn invalid_type(field: impl Into<String>, expected: &str) -> Self {
    Self {
      field: field.into(),
      message: format!("expected {}", expected),
    }
  }

  /// Create error for out of range value
  pub fn out_of_range(field: impl Into<String>, min: impl fmt::Display, max: impl fmt::Display) -> Self {
    Self {
      field: field.into(),
      message: format!("must be between {} and {}", min, max),
    }
  }

  pub fn too_small(field: impl Into<String>, min: impl fmt::Display) -> Self {
    Self {
      field: field.into(),
      message: format!("must be at least {}", min),
    }
  }

  /// Create error for too short string
  pub fn too_short(field: impl Into<String>, min_len: usize) -> Self {
    Self {
      field: field.into(),
      message: format!("must be at least {} characters", min_len),
    }
  }

  /// Create error for too long string
  pub fn too_long(field: impl Into<String>, max_len: usize) -> Self {
    Self {
      field: field.into(),
      message: format!("must be at most {} characters", max_len),
    }
  }

  /// Create error for invalid choice
  pub fn invalid_choice(field: impl Into<String>, valid_values: &[&str]) -> Self {
    Self {
      field: field.into(),
      message: format!("must be one of: {}", valid_values.join(", ")),
    }
  }
}

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;

fn non_empty(value: Option<&str>) -> Option<&str> {
  value.map(str::trim).filter(|s| !s.is_empty())
}

/// Validate a required text input. Whitespace-only counts as missing.
pub fn require_text(value: Option<&str>, field: &str, label: &str) -> ValidationResult<String> {
  non_empty(value)
    .map(String::from)
    .ok_or_else(|| ValidationError::required(field, label))
}

/// Validate character count bounds
pub fn check_length(value: &str, field: &str, min_len: Option<usize>, max_len: Option<usize>) -> ValidationResult<()> {
  let len = value.chars().count();
  if let Some(min) = min_len
    && len < min
  {
    return Err(ValidationError::too_short(field, min));
  }
  if let Some(max) = max_len
    && len > max
  {
    return Err(ValidationError::too_long(field, max));
  }
  Ok(())
}

/// Parse a number, allowing thousands separators
pub fn parse_number(value: &str, field: &str) -> ValidationResult<f64> {
  let cleaned: String = value.chars().filter(|c| *c != ',' && *c != '_').collect();
  cleaned
    .trim()
    .parse::<f64>()
    .ok()
    .filter(|n| n.is_finite())
    .ok_or_else(|| ValidationError::invalid_type(field, "number"))
}

/// Validate a number against optional bounds
pub fn check_range(value: f64, field: &str, min: Option<f64>, max: Option<f64>) -> ValidationResult<()> {
  match (min, max) {
    (Some(lo), Some(hi)) if value < lo || value > hi => Err(ValidationError::out_of_range(field, lo, hi)),
    (Some(lo), None) if value < lo => Err(ValidationError::too_small(field, lo)),
    (None, Some(hi)) if value > hi => Err(ValidationError::new(field, format!("must be at most {}", hi))),
    _ => Ok(()),
  }
}

/// Parse an ISO date (`YYYY-MM-DD`)
pub fn parse_date(value: &str, field: &str) -> ValidationResult<NaiveDate> {
  NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| ValidationError::invalid_type(field, "date (YYYY-MM-DD)"))
}

pub fn check_not_future(date: NaiveDate, today: NaiveDate, field: &str) -> ValidationResult<()> {
  if date > today {
    return Err(ValidationError::new(field, "cannot be in the future"));
  }
  Ok(())
}

/// Validate an email address shape (local@domain.tld)
pub fn validate_email(value: &str, field: &str) -> ValidationResult<()> {
  let invalid = || ValidationError::new(field, "must be a valid email address");
  let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
  if local.is_empty() || domain.contains('@') || value.chars().any(char::is_whitespace) {
    return Err(invalid());
  }
  match domain.rsplit_once('.') {
    Some((host, tld)) if !host.is_empty() && tld.len() >= 2 => Ok(()),
    _ => Err(invalid()),
  }
}

/// Validate a phone number: optional leading `+`, then 7 to 15 digits.
/// Spaces and dashes are ignored.
pub fn validate_phone(value: &str, field: &str) -> ValidationResult<()> {
  let compact: String = value.chars().filter(|c| *c != ' ' && *c != '-').collect();
  let digits = compact.strip_prefix('+').unwrap_or(&compact);
  if digits.chars().all(|c| c.is_ascii_digit()) && (7..=15).contains(&digits.len()) {
    Ok(())
  } else {
    Err(ValidationError::new(field, "must be a valid phone number"))
  }
}

/// Validate a choice (input must match one of the valid values)
pub fn require_choice<'a>(value: &str, field: &str, valid_values: &[&'a str]) -> ValidationResult<&'a str> {
  valid_values
    .iter()
    .find(|&&v| v.eq_ignore_ascii_case(value.trim()))
    .copied()
    .ok_or_else(|| ValidationError::invalid_choice(field, valid_values))
}
