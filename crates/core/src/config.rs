//! Configuration file
//!
//! Optional `hostel.toml`, looked up at `$HOSTEL_HUB_CONFIG` or in the
//! platform config directory. A missing file means built-in defaults.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::directory::{CredentialDirectory, DirectoryEntry};
use crate::error::Result;
use crate::models::{Identity, Role};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "HOSTEL_HUB_CONFIG";

const CONFIG_FILE: &str = "hostel.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct HostelConfig {
    /// `tracing` filter directive, e.g. "info,hostel_core=debug"
    #[serde(default)]
    pub log_filter: Option<String>,
    /// Load the sample complaints and leave requests at startup
    #[serde(default = "default_seed")]
    pub seed_demo_records: bool,
    /// Directory accounts; empty means the built-in demo accounts
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
}

/// One `[[accounts]]` table
#[derive(Debug, Clone, Deserialize)]
pub struct AccountConfig {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub room_number: Option<String>,
    #[serde(default)]
    pub hostel_block: Option<String>,
}

fn default_seed() -> bool {
    true
}

impl Default for HostelConfig {
    fn default() -> Self {
        Self {
            log_filter: None,
            seed_demo_records: default_seed(),
            accounts: Vec::new(),
        }
    }
}

impl HostelConfig {
    /// Parse config from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Where the config file is expected to live
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        ProjectDirs::from("dev", "hostelhub", "hostel-hub")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from the default location, falling back to defaults when no
    /// file exists there.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_or_default(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        tracing::info!(path = %path.display(), "Loading config");
        Self::load_from(path)
    }

    /// Build the credential directory described by this config
    pub fn directory(&self) -> Result<CredentialDirectory> {
        if self.accounts.is_empty() {
            return Ok(CredentialDirectory::demo());
        }

        CredentialDirectory::from_entries(self.accounts.iter().map(|a| {
            let identity = Identity {
                id: a.id.clone(),
                name: a.name.clone(),
                email: a.email.clone(),
                role: a.role,
                room_number: a.room_number.clone(),
                hostel_block: a.hostel_block.clone(),
            };
            DirectoryEntry::new(identity, a.password.clone())
        }))
    }
}
