//! Browser LocalStorage backend (WASM only)

use super::{Envelope, PersistenceError, Profile, ProfileStore};

/// LocalStorage key
const STORAGE_KEY: &str = "chicken_climb_profile";

/// Profile stored under a single LocalStorage key
#[derive(Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, PersistenceError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| PersistenceError::Unavailable("LocalStorage not accessible".into()))
    }
}

impl ProfileStore for LocalStorageStore {
    fn load(&self) -> Result<Option<Profile>, PersistenceError> {
        let storage = Self::storage()?;
        match storage.get_item(STORAGE_KEY) {
            Ok(Some(json)) => {
                let profile = Envelope::parse(&json)?;
                log::info!("Loaded profile from LocalStorage");
                Ok(Some(profile))
            }
            Ok(None) => Ok(None),
            Err(_) => Err(PersistenceError::Unavailable("LocalStorage read failed".into())),
        }
    }

    fn save(&mut self, profile: &Profile) -> Result<(), PersistenceError> {
        let storage = Self::storage()?;
        let json = Envelope::wrap(profile).to_json()?;
        storage
            .set_item(STORAGE_KEY, &json)
            .map_err(|_| PersistenceError::Unavailable("LocalStorage write failed".into()))?;
        log::info!("Profile saved to LocalStorage");
        Ok(())
    }
}
