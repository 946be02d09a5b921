//! Hostel Core Library
//!
//! Identities, session handling, route guarding and the complaint/leave
//! request lifecycle for Hostel Hub.

pub mod campus;
pub mod config;
pub mod directory;
pub mod error;
pub mod guard;
pub mod invariants;
pub mod models;
pub mod seed;
pub mod session;
pub mod storage;

pub use config::HostelConfig;
pub use directory::{CredentialDirectory, DirectoryEntry};
pub use error::{Error, Result};
pub use guard::{decide, navigate, Decision, GuardState, Requirement, Route};
pub use models::*;
pub use session::SessionStore;
pub use storage::{InMemoryRequestStore, RequestRepository, StatusCounts};
