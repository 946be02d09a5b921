//! Identity and role models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Hostel roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Warden,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Warden => "warden",
            Role::Admin => "admin",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Warden => "Warden",
            Role::Admin => "Maintenance Dept.",
        }
    }

    /// Wardens and admins review complaints and leave requests
    pub fn is_reviewer(&self) -> bool {
        matches!(self, Role::Warden | Role::Admin)
    }

    pub fn all() -> &'static [Role] {
        &[Role::Student, Role::Warden, Role::Admin]
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "warden" => Ok(Role::Warden),
            "admin" => Ok(Role::Admin),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// A role name that does not match any hostel role
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

/// A signed-in principal. Carries no credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub room_number: Option<String>,
    #[serde(default)]
    pub hostel_block: Option<String>,
}

impl Identity {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
            room_number: None,
            hostel_block: None,
        }
    }

    pub fn with_room(mut self, room_number: impl Into<String>, hostel_block: impl Into<String>) -> Self {
        self.room_number = Some(room_number.into());
        self.hostel_block = Some(hostel_block.into());
        self
    }
}

/// The single active session of the running client
#[derive(Debug, Clone)]
pub struct Session {
    pub identity: Identity,
    pub signed_in_at: DateTime<Utc>,
}

impl Session {
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            signed_in_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!("Student".parse::<Role>().unwrap(), Role::Student);
        assert_eq!(" WARDEN ".parse::<Role>().unwrap(), Role::Warden);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert!("janitor".parse::<Role>().is_err());
    }

    #[test]
    fn test_reviewer_roles() {
        assert!(!Role::Student.is_reviewer());
        assert!(Role::Warden.is_reviewer());
        assert!(Role::Admin.is_reviewer());
    }

    #[test]
    fn test_role_serde_lowercase() {
        let json = serde_json::to_string(&Role::Warden).unwrap();
        assert_eq!(json, "\"warden\"");
    }
}
