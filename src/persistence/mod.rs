//! Profile persistence
//!
//! Features:
//! - Versioned JSON envelope
//! - Pluggable backends (memory, JSON file, browser LocalStorage)
//! - Write-through repository that never lets a storage failure touch
//!   in-memory state; failed writes stay pending until the next flush

pub mod profile;
pub mod repository;
pub mod store;
#[cfg(target_arch = "wasm32")]
pub mod web;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use profile::Profile;
pub use repository::{ProfileRepository, PurchaseOutcome};
pub use store::{JsonFileStore, MemoryStore};
#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

/// Current envelope version
pub const PROFILE_VERSION: u32 = 1;

/// Storage failures
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored profile is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported profile version {found} (expected {PROFILE_VERSION})")]
    UnsupportedVersion { found: u32 },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A place profiles are read from and written to
pub trait ProfileStore {
    /// Load the stored profile, or `None` if nothing has been saved yet
    fn load(&self) -> Result<Option<Profile>, PersistenceError>;

    /// Replace the stored profile
    fn save(&mut self, profile: &Profile) -> Result<(), PersistenceError>;
}

/// On-disk wrapper carrying a format version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub version: u32,
    pub profile: Profile,
}

impl Envelope {
    pub fn wrap(profile: &Profile) -> Self {
        Self {
            version: PROFILE_VERSION,
            profile: profile.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and version-check a stored envelope
    pub fn parse(json: &str) -> Result<Profile, PersistenceError> {
        let envelope: Envelope = serde_json::from_str(json)?;
        if envelope.version != PROFILE_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: envelope.version,
            });
        }
        Ok(envelope.profile)
    }
}
