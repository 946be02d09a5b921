//! Error types for Hostel Core

use thiserror::Error;
use uuid::Uuid;

use crate::models::{RequestKind, RequestStatus};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Cannot move {kind} {id} from {from} to {to}")]
    InvalidTransition {
        id: Uuid,
        kind: RequestKind,
        from: RequestStatus,
        to: RequestStatus,
    },

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("No identity is signed in")]
    NotAuthenticated,

    #[error("Duplicate directory email: {0}")]
    DuplicateEmail(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
