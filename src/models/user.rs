use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Account role, fixed at registration via the profile row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Employer,
    Applicant,
}

impl Role {
    /// Accepts only the two known role names (case-insensitively).
    pub fn parse(value: &str) -> Option<Role> {
        if value.eq_ignore_ascii_case("employer") {
            Some(Role::Employer)
        } else if value.eq_ignore_ascii_case("applicant") {
            Some(Role::Applicant)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employer => "employer",
            Role::Applicant => "applicant",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub user_id: Uuid,
    pub role: Role,
}

/// Identity resolved from a bearer session and attached to the request.
/// `role` is None when the account has no profile row; role-gated
/// handlers must go through `require_role` instead of assuming one.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Option<Role>,
}

impl CurrentUser {
    pub fn require_role(&self) -> Result<Role> {
        self.role.ok_or(Error::ProfileMissing)
    }
}
