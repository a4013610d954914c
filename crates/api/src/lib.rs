pub mod client;
pub mod error;
pub mod navigator;
pub mod request;
pub mod services;
pub mod submit;
pub mod upload;

pub use client::ApiClient;
pub use error::ApiError;
pub use navigator::{LOGIN_ROUTE, MemoryNavigator, Navigator, is_auth_route};
pub use request::{ApiRequest, ApiResponse, Saved};
pub use services::{AuthService, ClientService, FinanceService, ReportService, StaffService};
pub use submit::{ClientSubmitter, PenaltySubmitter, RepaymentSubmitter, StaffSubmitter};
pub use upload::Uploader;
