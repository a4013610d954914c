//! Staff roles and the per-role lookup table.
//!
//! Everything that used to branch on a role string (auth endpoints, landing
//! routes, sidebar visibility) reads from [`RoleProfile`] instead.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// A staff role. Determines UI visibility and API endpoint selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
  #[serde(rename = "director")]
  Director,
  #[serde(rename = "manager")]
  Manager,
  #[serde(rename = "creditAgent", alias = "agent")]
  CreditAgent,
}

/// Navigable sections of the back office
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
  Dashboard,
  Clients,
  Managers,
  CreditAgents,
  Directors,
  Finance,
  Reports,
}

/// Static data attached to each role
#[derive(Debug)]
pub struct RoleProfile {
  pub role: Role,
  /// Path segment used by the auth endpoints (`/{segment}/login`)
  pub segment: &'static str,
  pub label: &'static str,
  pub sections: &'static [Section],
}

const DIRECTOR: RoleProfile = RoleProfile {
  role: Role::Director,
  segment: "director",
  label: "Director",
  sections: &[
    Section::Dashboard,
    Section::Clients,
    Section::Managers,
    Section::CreditAgents,
    Section::Directors,
    Section::Finance,
    Section::Reports,
  ],
};

const MANAGER: RoleProfile = RoleProfile {
  role: Role::Manager,
  segment: "manager",
  label: "Manager",
  sections: &[
    Section::Dashboard,
    Section::Clients,
    Section::CreditAgents,
    Section::Finance,
    Section::Reports,
  ],
};

const CREDIT_AGENT: RoleProfile = RoleProfile {
  role: Role::CreditAgent,
  segment: "agent",
  label: "Credit agent",
  sections: &[Section::Dashboard, Section::Clients, Section::Finance],
};

pub const ALL_ROLES: [Role; 3] = [Role::Director, Role::Manager, Role::CreditAgent];

impl Role {
  pub fn profile(self) -> &'static RoleProfile {
    match self {
      Role::Director => &DIRECTOR,
      Role::Manager => &MANAGER,
      Role::CreditAgent => &CREDIT_AGENT,
    }
  }

  pub fn segment(self) -> &'static str {
    self.profile().segment
  }

  /// Serialized name, as stored under the `role` key
  pub fn as_str(self) -> &'static str {
    match self {
      Role::Director => "director",
      Role::Manager => "manager",
      Role::CreditAgent => "creditAgent",
    }
  }

  pub fn login_path(self) -> String {
    format!("/{}/login", self.segment())
  }

  pub fn refresh_path(self) -> String {
    format!("/{}/refresh-token", self.segment())
  }

  pub fn landing_route(self) -> String {
    format!("/{}/dashboard", self.segment())
  }

  /// Collection endpoint holding staff of this role
  pub fn staff_collection(self) -> &'static str {
    match self {
      Role::Director => "/directors",
      Role::Manager => "/managers",
      Role::CreditAgent => "/agents",
    }
  }

  pub fn can_access(self, section: Section) -> bool {
    self.profile().sections.contains(&section)
  }

  /// Role used for refresh endpoint selection. Unknown roles fall back to director.
  pub fn for_refresh(role: Option<Role>) -> Role {
    role.unwrap_or(Role::Director)
  }
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for Role {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "director" => Ok(Role::Director),
      "manager" => Ok(Role::Manager),
      "creditagent" | "credit-agent" | "credit_agent" | "agent" => Ok(Role::CreditAgent),
      other => Err(Error::Validation(format!("unknown role: {other}"))),
    }
  }
}

impl fmt::Display for Section {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Section::Dashboard => "dashboard",
      Section::Clients => "clients",
      Section::Managers => "managers",
      Section::CreditAgents => "credit agents",
      Section::Directors => "directors",
      Section::Finance => "finance",
      Section::Reports => "reports",
    };
    write!(f, "{name}")
  }
}
