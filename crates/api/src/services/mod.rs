mod auth;
mod clients;
mod finance;
mod reports;
mod staff;

pub use auth::AuthService;
pub use clients::ClientService;
pub use finance::FinanceService;
pub use reports::ReportService;
pub use staff::StaffService;
