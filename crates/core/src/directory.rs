//! Credential directory
//!
//! The fixed set of known identities and their demo passwords. Lookups are
//! exact and case-sensitive; nothing here is hashed.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::models::{Identity, Role};

/// A directory row: an identity plus its plaintext demo password
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    pub email: String,
    password: String,
    pub identity: Identity,
}

impl DirectoryEntry {
    pub fn new(identity: Identity, password: impl Into<String>) -> Self {
        Self {
            email: identity.email.clone(),
            password: password.into(),
            identity,
        }
    }

    fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}

/// Read-only directory keyed by email
#[derive(Debug, Clone, Default)]
pub struct CredentialDirectory {
    entries: HashMap<String, DirectoryEntry>,
}

impl CredentialDirectory {
    /// Build a directory.
    ///
    /// Emails and ids must both be unique, and ids must not be blank: request
    /// records point at their owner by id alone.
    pub fn from_entries(entries: impl IntoIterator<Item = DirectoryEntry>) -> Result<Self> {
        let mut directory = Self::default();
        for entry in entries {
            let id = entry.identity.id.trim();
            if id.is_empty() {
                return Err(Error::InvalidField {
                    field: "id",
                    reason: format!("account {} has a blank id", entry.email),
                });
            }
            if directory.contains_id(id) {
                return Err(Error::InvalidField {
                    field: "id",
                    reason: format!("id {id} is used by more than one account"),
                });
            }
            if directory.entries.contains_key(&entry.email) {
                return Err(Error::DuplicateEmail(entry.email));
            }
            directory.entries.insert(entry.email.clone(), entry);
        }
        Ok(directory)
    }

    /// Built-in demo accounts, one per role
    pub fn demo() -> Self {
        let entries = [
            DirectoryEntry::new(
                Identity::new("1", "XYZ", "student@hostel.com", Role::Student)
                    .with_room("A-101", "Shree Shanta Sthanam"),
                "1234",
            ),
            DirectoryEntry::new(
                Identity::new("3", "Warden", "warden@hostel.com", Role::Warden),
                "1234",
            ),
            DirectoryEntry::new(
                Identity::new("2", "AB", "admin@hostel.com", Role::Admin),
                "1234",
            ),
        ];

        Self {
            entries: entries
                .into_iter()
                .map(|e| (e.email.clone(), e))
                .collect(),
        }
    }

    /// Verify a login triple.
    ///
    /// Returns `NotFound` for an unknown email, a wrong password, or a role
    /// that differs from the entry's role.
    pub fn verify(&self, email: &str, password: &str, role: Role) -> Result<Identity> {
        match self.entries.get(email) {
            Some(entry) if entry.password_matches(password) && entry.identity.role == role => {
                Ok(entry.identity.clone())
            }
            _ => Err(Error::NotFound(format!("directory entry for {email}"))),
        }
    }

    /// Identity lookup by id, used to check record ownership
    pub fn find_by_id(&self, id: &str) -> Option<&Identity> {
        self.entries
            .values()
            .map(|e| &e.identity)
            .find(|i| i.id == id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.find_by_id(id).is_some()
    }

    pub fn identities(&self) -> impl Iterator<Item = &Identity> {
        self.entries.values().map(|e| &e.identity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_accounts_verify() {
        let dir = CredentialDirectory::demo();
        for role in Role::all() {
            let email = format!("{}@hostel.com", role.as_str());
            let identity = dir.verify(&email, "1234", *role).unwrap();
            assert_eq!(identity.role, *role);
            assert_eq!(identity.email, email);
        }
    }

    #[test]
    fn test_wrong_password_not_found() {
        let dir = CredentialDirectory::demo();
        let err = dir.verify("student@hostel.com", "password", Role::Student).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_role_mismatch_not_found() {
        let dir = CredentialDirectory::demo();
        assert!(dir.verify("student@hostel.com", "1234", Role::Admin).is_err());
    }

    #[test]
    fn test_email_is_case_sensitive() {
        let dir = CredentialDirectory::demo();
        assert!(dir.verify("Student@hostel.com", "1234", Role::Student).is_err());
    }

    #[test]
    fn test_absent_email_is_not_found() {
        let dir = CredentialDirectory::default();
        assert!(matches!(
            dir.verify("", "", Role::Student),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let a = DirectoryEntry::new(Identity::new("1", "A", "a@x", Role::Student), "p");
        let b = DirectoryEntry::new(Identity::new("2", "B", "a@x", Role::Admin), "q");
        let err = CredentialDirectory::from_entries([a, b]).unwrap_err();
        assert!(matches!(err, Error::DuplicateEmail(e) if e == "a@x"));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let a = DirectoryEntry::new(Identity::new("1", "A", "a@x", Role::Student), "p");
        let b = DirectoryEntry::new(Identity::new("1", "B", "b@x", Role::Student), "q");
        let err = CredentialDirectory::from_entries([a, b]).unwrap_err();
        assert!(matches!(err, Error::InvalidField { field: "id", .. }));
    }

    #[test]
    fn test_blank_id_rejected() {
        let a = DirectoryEntry::new(Identity::new("  ", "A", "a@x", Role::Student), "p");
        let err = CredentialDirectory::from_entries([a]).unwrap_err();
        assert!(matches!(err, Error::InvalidField { field: "id", .. }));
    }

    #[test]
    fn test_find_by_id() {
        let dir = CredentialDirectory::demo();
        assert_eq!(dir.find_by_id("2").map(|i| i.role), Some(Role::Admin));
        assert!(!dir.contains_id("99"));
    }
}
