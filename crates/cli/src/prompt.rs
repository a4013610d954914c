//! Line-based driver for wizard forms.
//!
//! Each step prompts for its fields in order. An empty answer keeps the
//! current value, `-` clears it, `:back` returns to the previous step and
//! `:quit` abandons the form.

use anyhow::{Result, bail};
use std::io::{BufRead, Write};
use wizard::{Advance, FieldKind, FinishOutcome, FormFlow, Submitter, Wizard};

/// What the user ended up doing with the form
#[derive(Debug, Clone, PartialEq)]
pub enum FormResult {
  Submitted { message: String, route: String },
  Cancelled,
}

enum Answer {
  Value(String),
  Keep,
  Clear,
  Back,
  Quit,
}

fn read_answer<R: BufRead>(input: &mut R) -> Result<Answer> {
  let mut line = String::new();
  if input.read_line(&mut line)? == 0 {
    return Ok(Answer::Quit);
  }
  Ok(match line.trim() {
    "" => Answer::Keep,
    "-" => Answer::Clear,
    ":back" => Answer::Back,
    ":quit" | ":q" => Answer::Quit,
    value => Answer::Value(value.to_string()),
  })
}

fn hint(kind: &FieldKind) -> Option<String> {
  match kind {
    FieldKind::Date { .. } => Some("YYYY-MM-DD".to_string()),
    FieldKind::Choice(options) => Some(options.join("/")),
    FieldKind::File => Some("file path".to_string()),
    _ => None,
  }
}

fn confirm<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> Result<Answer> {
  write!(out, "{} [y/N, :back] ", question)?;
  out.flush()?;
  read_answer(input)
}

/// Drive `wizard` to completion, submitting through `submitter`
pub async fn run_wizard<F, S, R, W>(
  wizard: &mut Wizard<F>,
  submitter: &S,
  input: &mut R,
  out: &mut W,
) -> Result<FormResult>
where
  F: FormFlow,
  S: Submitter<F::Payload> + ?Sized,
  R: BufRead,
  W: Write,
{
  loop {
    let schema = wizard.current_schema();
    let title = schema.title;
    let fields: Vec<_> = schema
      .fields
      .iter()
      .map(|f| (f.name, f.label, f.required, hint(&f.kind)))
      .collect();

    writeln!(out, "\n[{}/{}] {}", wizard.step() + 1, wizard.step_count(), title)?;

    let mut went_back = false;
    for (name, label, required, hint) in fields {
      let marker = if required { "*" } else { "" };
      let hint = hint.map(|h| format!(" ({})", h)).unwrap_or_default();
      match wizard.draft().get(name) {
        Some(current) if !current.is_empty() => write!(out, "{}{}{} [{}]: ", label, marker, hint, current)?,
        _ => write!(out, "{}{}{}: ", label, marker, hint)?,
      }
      out.flush()?;

      match read_answer(input)? {
        Answer::Value(value) => wizard.set(name, value),
        Answer::Clear => wizard.set(name, ""),
        Answer::Keep => {}
        Answer::Back => {
          wizard.back();
          went_back = true;
          break;
        }
        Answer::Quit => return Ok(FormResult::Cancelled),
      }
      wizard.touch(name);
    }
    if went_back {
      continue;
    }

    match wizard.next() {
      Advance::Moved { .. } => {}
      Advance::Blocked { fields } => {
        for field in fields {
          if let Some(message) = wizard.draft().error(&field) {
            writeln!(out, "  ! {}: {}", field, message)?;
          }
        }
      }
      Advance::Ready => match confirm(input, out, "Submit?")? {
        Answer::Value(v) if v.eq_ignore_ascii_case("y") || v.eq_ignore_ascii_case("yes") => {
          wizard.request_submit();
          match wizard.finish(submitter).await {
            FinishOutcome::Completed { message, route } => {
              writeln!(out, "{}", message)?;
              return Ok(FormResult::Submitted { message, route });
            }
            FinishOutcome::Failed { message } => {
              writeln!(out, "Error: {}", message)?;
              match confirm(input, out, "Edit and retry?")? {
                Answer::Value(v) if v.eq_ignore_ascii_case("y") => {
                  wizard.retry();
                }
                Answer::Back => {
                  wizard.retry();
                  wizard.back();
                }
                _ => bail!(message),
              }
            }
            FinishOutcome::NotReady(reason) => {
              writeln!(out, "Not submitted: {:?}", reason)?;
            }
          }
        }
        Answer::Back => {
          wizard.back();
        }
        _ => return Ok(FormResult::Cancelled),
      },
    }
  }
}
