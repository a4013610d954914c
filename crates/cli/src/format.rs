//! Plain-text rendering for command output.

use loandesk_core::{Client, FinanceRecord, PerformanceReport, Session, StaffMember};
use std::fmt::Write;

fn money(amount: f64) -> String {
  let whole = format!("{:.2}", amount.abs());
  let (int, frac) = whole.split_once('.').unwrap_or((whole.as_str(), "00"));
  let mut grouped = String::new();
  for (i, c) in int.chars().enumerate() {
    if i > 0 && (int.len() - i) % 3 == 0 {
      grouped.push(',');
    }
    grouped.push(c);
  }
  let sign = if amount < 0.0 { "-" } else { "" };
  format!("{}{}.{}", sign, grouped, frac)
}

pub fn format_client_list(clients: &[Client]) -> String {
  if clients.is_empty() {
    return "No clients found.".to_string();
  }

  let mut out = String::new();
  let _ = writeln!(out, "{:<26} {:<24} {:<16} {:>14} {:<10}", "ID", "NAME", "PHONE", "PRINCIPAL", "STATUS");
  for c in clients {
    let _ = writeln!(
      out,
      "{:<26} {:<24} {:<16} {:>14} {:<10}",
      c.id,
      c.full_name(),
      c.phone,
      money(c.loan.principal),
      format!("{:?}", c.status).to_lowercase()
    );
  }
  let _ = write!(out, "\n{} client(s)", clients.len());
  out
}

pub fn format_client(client: &Client) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "Client {}", client.id);
  let _ = writeln!(out, "==============================\n");
  let _ = writeln!(out, "Name:        {}", client.full_name());
  let _ = writeln!(out, "Email:       {}", client.email);
  let _ = writeln!(out, "Phone:       {}", client.phone);
  let _ = writeln!(out, "Address:     {}", client.address);
  let _ = writeln!(out, "National ID: {}", client.national_id);
  let _ = writeln!(out, "Born:        {}", client.date_of_birth);
  if let Some(occupation) = &client.occupation {
    let _ = writeln!(out, "Occupation:  {}", occupation);
  }
  if let Some(agent) = &client.agent_id {
    let _ = writeln!(out, "Agent:       {}", agent);
  }

  let loan = &client.loan;
  let _ = writeln!(out, "\nLoan");
  let _ = writeln!(out, "  Principal:   {}", money(loan.principal));
  let _ = writeln!(out, "  Rate:        {}%", loan.interest_rate);
  let _ = writeln!(out, "  Duration:    {} months from {}", loan.duration_months, loan.start_date);
  let _ = writeln!(out, "  Total due:   {}", money(loan.total_due()));
  let _ = write!(out, "  Installment: {}", money(loan.monthly_installment()));

  if !client.documents.is_empty() {
    let _ = write!(out, "\n\nDocuments ({}):", client.documents.len());
    for doc in &client.documents {
      let _ = write!(out, "\n  - {}: {}", doc.name, doc.url);
    }
  }
  out
}

pub fn format_staff_list(members: &[StaffMember]) -> String {
  if members.is_empty() {
    return "No staff found.".to_string();
  }

  let mut out = String::new();
  let _ = writeln!(out, "{:<26} {:<24} {:<28} {:<16}", "ID", "NAME", "EMAIL", "PHONE");
  for m in members {
    let _ = writeln!(out, "{:<26} {:<24} {:<28} {:<16}", m.id, m.full_name(), m.email, m.phone);
  }
  let _ = write!(out, "\n{} member(s)", members.len());
  out
}

pub fn format_finance(record: &FinanceRecord) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "Finance for client {}", record.client_id);
  let _ = writeln!(out, "  Principal:   {}", money(record.principal));
  let _ = writeln!(out, "  Rate:        {}%", record.interest_rate);
  let _ = writeln!(out, "  Total due:   {}", money(record.total_due));
  let _ = writeln!(out, "  Penalties:   {}", money(record.penalty_total()));
  let _ = writeln!(out, "  Paid:        {}", money(record.amount_paid));
  let _ = write!(
    out,
    "  Outstanding: {}{}",
    money(record.outstanding()),
    if record.is_settled() { " (settled)" } else { "" }
  );

  if !record.repayments.is_empty() {
    let _ = write!(out, "\n\nRepayments:");
    for r in &record.repayments {
      let _ = write!(out, "\n  {}  {:>14}", r.paid_on, money(r.amount));
    }
  }
  if !record.penalties.is_empty() {
    let _ = write!(out, "\n\nPenalties:");
    for p in &record.penalties {
      let _ = write!(out, "\n  {}  {:>14}  {}", p.applied_on, money(p.amount), p.reason);
    }
  }
  out
}

pub fn format_report(report: &PerformanceReport) -> String {
  let mut out = String::new();
  let range = match (report.from, report.to) {
    (Some(from), Some(to)) => format!("{} to {}", from, to),
    (Some(from), None) => format!("since {}", from),
    (None, Some(to)) => format!("up to {}", to),
    (None, None) => "all time".to_string(),
  };
  let _ = writeln!(out, "Agent performance ({})\n", range);
  let _ = writeln!(
    out,
    "{:<24} {:>7} {:>14} {:>14} {:>8} {:>7}",
    "AGENT", "CLIENTS", "DISBURSED", "COLLECTED", "RATE", "OVERDUE"
  );
  for a in report.ranked() {
    let _ = writeln!(
      out,
      "{:<24} {:>7} {:>14} {:>14} {:>7.1}% {:>7}",
      a.name,
      a.clients,
      money(a.disbursed),
      money(a.collected),
      a.collection_rate() * 100.0,
      a.overdue
    );
  }
  let t = &report.totals;
  let _ = write!(
    out,
    "{:<24} {:>7} {:>14} {:>14} {:>8} {:>7}",
    "TOTAL",
    t.clients,
    money(t.disbursed),
    money(t.collected),
    "",
    t.overdue
  );
  out
}

pub fn format_session(session: &Session) -> String {
  let mut out = String::new();
  match &session.user {
    Some(user) => {
      let _ = writeln!(out, "Logged in as {} <{}>", user.full_name(), user.email);
    }
    None => {
      let _ = writeln!(out, "Logged in");
    }
  }
  let profile = session.role.profile();
  let _ = writeln!(out, "Role:     {}", profile.label);
  let sections: Vec<String> = profile.sections.iter().map(|s| s.to_string()).collect();
  let _ = write!(out, "Sections: {}", sections.join(", "));
  out
}
