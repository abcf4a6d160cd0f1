//! Roles and login categories

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Access level of the current browser session.
///
/// The absence of a role is modelled as `Option::<Role>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    /// Administrator - manages doctors
    Admin,
    /// Doctor - sees their own dashboard
    Doctor,
    /// Anonymous patient browsing doctors
    Patient,
    /// Patient with an authenticated session
    LoggedPatient,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Doctor, Role::Patient, Role::LoggedPatient];

    /// Persisted string value
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Doctor => "doctor",
            Role::Patient => "patient",
            Role::LoggedPatient => "loggedPatient",
        }
    }

    /// Whether this role is only valid alongside a token
    pub fn requires_token(&self) -> bool {
        matches!(self, Role::Admin | Role::Doctor | Role::LoggedPatient)
    }

    /// Login category whose success grants this role
    pub fn login_category(&self) -> LoginCategory {
        match self {
            Role::Admin => LoginCategory::Admin,
            Role::Doctor => LoginCategory::Doctor,
            Role::Patient | Role::LoggedPatient => LoginCategory::Patient,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| Error::UnknownRole(s.to_string()))
    }
}

/// Which login endpoint a credential pair is sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginCategory {
    Admin,
    Doctor,
    Patient,
}

impl LoginCategory {
    pub const ALL: [LoginCategory; 3] = [
        LoginCategory::Admin,
        LoginCategory::Doctor,
        LoginCategory::Patient,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LoginCategory::Admin => "admin",
            LoginCategory::Doctor => "doctor",
            LoginCategory::Patient => "patient",
        }
    }

    /// Endpoint path relative to the API base URL
    pub fn endpoint(&self) -> String {
        format!("/api/{}/login", self.as_str())
    }

    /// Role persisted after a successful login
    pub fn granted_role(&self) -> Role {
        match self {
            LoginCategory::Admin => Role::Admin,
            LoginCategory::Doctor => Role::Doctor,
            LoginCategory::Patient => Role::LoggedPatient,
        }
    }
}

impl fmt::Display for LoginCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoginCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LoginCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}
