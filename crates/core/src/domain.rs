//! Server-owned records. The client only holds copies of what it last fetched.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
  #[default]
  Active,
  Completed,
  Defaulted,
}

/// A file held by the upload provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRef {
  pub url: String,
  pub public_id: String,
  #[serde(default)]
  pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTerms {
  pub principal: f64,
  /// Percent per loan term
  pub interest_rate: f64,
  pub duration_months: u32,
  pub start_date: NaiveDate,
}

impl LoanTerms {
  pub fn total_due(&self) -> f64 {
    self.principal * (1.0 + self.interest_rate / 100.0)
  }

  pub fn monthly_installment(&self) -> f64 {
    if self.duration_months == 0 {
      return self.total_due();
    }
    self.total_due() / self.duration_months as f64
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
  pub id: String,
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub phone: String,
  pub address: String,
  pub national_id: String,
  pub date_of_birth: NaiveDate,
  #[serde(default)]
  pub occupation: Option<String>,
  #[serde(default)]
  pub agent_id: Option<String>,
  pub loan: LoanTerms,
  #[serde(default)]
  pub documents: Vec<DocumentRef>,
  #[serde(default)]
  pub status: ClientStatus,
}

impl Client {
  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }
}

/// Body of a client create/update request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub phone: String,
  pub address: String,
  pub national_id: String,
  pub date_of_birth: NaiveDate,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub occupation: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub agent_id: Option<String>,
  pub loan: LoanTerms,
  pub documents: Vec<DocumentRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
  pub id: String,
  pub role: Role,
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub phone: String,
  #[serde(default)]
  pub address: Option<String>,
  #[serde(default)]
  pub photo: Option<DocumentRef>,
  #[serde(default)]
  pub manager_id: Option<String>,
}

impl StaffMember {
  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }
}

/// Body of a staff create/update request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStaff {
  pub role: Role,
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub phone: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub address: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub password: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub photo: Option<DocumentRef>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub manager_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repayment {
  pub id: String,
  pub amount: f64,
  pub paid_on: NaiveDate,
  #[serde(default)]
  pub recorded_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRepayment {
  pub amount: f64,
  pub paid_on: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Penalty {
  pub id: String,
  pub amount: f64,
  pub reason: String,
  pub applied_on: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPenalty {
  pub amount: f64,
  pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceRecord {
  pub client_id: String,
  pub principal: f64,
  pub interest_rate: f64,
  pub total_due: f64,
  pub amount_paid: f64,
  #[serde(default)]
  pub repayments: Vec<Repayment>,
  #[serde(default)]
  pub penalties: Vec<Penalty>,
}

impl FinanceRecord {
  pub fn penalty_total(&self) -> f64 {
    self.penalties.iter().map(|p| p.amount).sum()
  }

  /// Amount still owed, penalties included
  pub fn outstanding(&self) -> f64 {
    (self.total_due + self.penalty_total() - self.amount_paid).max(0.0)
  }

  pub fn is_settled(&self) -> bool {
    self.outstanding() == 0.0
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentPerformance {
  pub agent_id: String,
  pub name: String,
  pub clients: u32,
  pub disbursed: f64,
  pub collected: f64,
  pub overdue: u32,
}

impl AgentPerformance {
  pub fn collection_rate(&self) -> f64 {
    if self.disbursed <= 0.0 {
      return 0.0;
    }
    self.collected / self.disbursed
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTotals {
  pub clients: u32,
  pub disbursed: f64,
  pub collected: f64,
  pub overdue: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
  #[serde(default)]
  pub from: Option<NaiveDate>,
  #[serde(default)]
  pub to: Option<NaiveDate>,
  pub agents: Vec<AgentPerformance>,
  #[serde(default)]
  pub totals: ReportTotals,
}

impl PerformanceReport {
  /// Agents ordered by collection rate, best first
  pub fn ranked(&self) -> Vec<&AgentPerformance> {
    let mut agents: Vec<&AgentPerformance> = self.agents.iter().collect();
    agents.sort_by(|a, b| b.collection_rate().total_cmp(&a.collection_rate()));
    agents
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
  }

  #[test]
  fn test_outstanding_includes_penalties() {
    let record = FinanceRecord {
      client_id: "c1".to_string(),
      principal: 1000.0,
      interest_rate: 10.0,
      total_due: 1100.0,
      amount_paid: 600.0,
      repayments: vec![],
      penalties: vec![Penalty {
        id: "p1".to_string(),
        amount: 50.0,
        reason: "late".to_string(),
        applied_on: date("2024-03-01"),
      }],
    };

    assert_eq!(record.outstanding(), 550.0);
    assert!(!record.is_settled());
  }

  #[test]
  fn test_outstanding_floors_at_zero() {
    let record = FinanceRecord {
      client_id: "c1".to_string(),
      principal: 100.0,
      interest_rate: 0.0,
      total_due: 100.0,
      amount_paid: 150.0,
      repayments: vec![],
      penalties: vec![],
    };

    assert_eq!(record.outstanding(), 0.0);
    assert!(record.is_settled());
  }

  #[test]
  fn test_loan_terms_totals() {
    let terms = LoanTerms {
      principal: 1200.0,
      interest_rate: 10.0,
      duration_months: 12,
      start_date: date("2024-01-01"),
    };

    assert!((terms.total_due() - 1320.0).abs() < 1e-9);
    assert!((terms.monthly_installment() - 110.0).abs() < 1e-9);
  }

  #[test]
  fn test_collection_rate_without_disbursement() {
    let agent = AgentPerformance {
      agent_id: "a1".to_string(),
      name: "Kim".to_string(),
      clients: 0,
      disbursed: 0.0,
      collected: 0.0,
      overdue: 0,
    };

    assert_eq!(agent.collection_rate(), 0.0);
  }

  #[test]
  fn test_client_wire_format() {
    let client: Client = serde_json::from_value(json!({
      "id": "c1",
      "firstName": "Ada",
      "lastName": "Obi",
      "email": "ada@example.com",
      "phone": "+2348012345678",
      "address": "1 Main St",
      "nationalId": "NIN-1",
      "dateOfBirth": "1990-05-01",
      "loan": {
        "principal": 5000.0,
        "interestRate": 12.5,
        "durationMonths": 6,
        "startDate": "2024-02-01"
      },
      "status": "defaulted"
    }))
    .unwrap();

    assert_eq!(client.full_name(), "Ada Obi");
    assert_eq!(client.status, ClientStatus::Defaulted);
    assert!(client.documents.is_empty());
    assert_eq!(client.agent_id, None);
  }

  #[test]
  fn test_ranked_orders_by_collection_rate() {
    let agent = |id: &str, disbursed: f64, collected: f64| AgentPerformance {
      agent_id: id.to_string(),
      name: id.to_string(),
      clients: 1,
      disbursed,
      collected,
      overdue: 0,
    };
    let report = PerformanceReport {
      from: None,
      to: None,
      agents: vec![agent("low", 100.0, 10.0), agent("high", 100.0, 90.0), agent("mid", 100.0, 50.0)],
      totals: ReportTotals::default(),
    };

    let ids: Vec<&str> = report.ranked().iter().map(|a| a.agent_id.as_str()).collect();
    assert_eq!(ids, vec!["high", "mid", "low"]);
  }
}
