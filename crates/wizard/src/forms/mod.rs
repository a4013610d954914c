mod client;
mod finance;
mod staff;

pub use client::{Attachment, ClientForm, ClientStep, ClientSubmission, PersonalDetails};
pub use finance::{PenaltyForm, PenaltySubmission, RepaymentForm, RepaymentSubmission};
pub use staff::{StaffForm, StaffStep, StaffSubmission};
