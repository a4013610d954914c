pub mod config;
pub mod domain;
pub mod error;
pub mod role;
pub mod session;
pub mod storage;
pub mod validation;

pub use config::{ApiConfig, Config, LoggingConfig, SessionBackend, SessionConfig, UploadConfig, data_dir};
pub use domain::{
  AgentPerformance, Client, ClientStatus, DocumentRef, FinanceRecord, LoanTerms, NewClient, NewPenalty, NewRepayment,
  NewStaff, Penalty, PerformanceReport, Repayment, ReportTotals, StaffMember,
};
pub use error::{Error, Result};
pub use role::{ALL_ROLES, Role, RoleProfile, Section};
pub use session::{Session, SessionStore, TokenPair, UserProfile};
pub use storage::{CredentialStore, FileStore, MemoryStore};
pub use validation::{
  ValidationError, ValidationResult, check_length, check_not_future, check_range, parse_date,
  parse_number, require_choice, require_text, validate_email, validate_phone,
};
