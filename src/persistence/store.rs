//! Native profile backends

use std::fs;
use std::path::{Path, PathBuf};

use super::{Envelope, PersistenceError, Profile, ProfileStore};

/// Keeps the profile in memory (tests, headless runs)
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: Option<Profile>,
    offline: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing profile
    pub fn with_profile(profile: Profile) -> Self {
        Self {
            saved: Some(profile),
            offline: false,
        }
    }

    /// Make writes fail (or succeed again)
    #[cfg(test)]
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    /// What was last written successfully
    #[cfg(test)]
    pub fn saved(&self) -> Option<&Profile> {
        self.saved.as_ref()
    }
}

impl ProfileStore for MemoryStore {
    fn load(&self) -> Result<Option<Profile>, PersistenceError> {
        Ok(self.saved.clone())
    }

    fn save(&mut self, profile: &Profile) -> Result<(), PersistenceError> {
        if self.offline {
            return Err(PersistenceError::Unavailable("memory store is offline".into()));
        }
        self.saved = Some(profile.clone());
        Ok(())
    }
}

/// Profile stored as a JSON envelope on disk
///
/// Writes go to a temporary sibling first and are renamed into place so a
/// crash mid-write never leaves a truncated profile.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl ProfileStore for JsonFileStore {
    fn load(&self) -> Result<Option<Profile>, PersistenceError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let profile = Envelope::parse(&json)?;
        log::info!("Loaded profile from {}", self.path.display());
        Ok(Some(profile))
    }

    fn save(&mut self, profile: &Profile) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = Envelope::wrap(profile).to_json()?;
        let tmp = self.tmp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!("Profile saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skins::PlayerSkin;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "chicken-climb-{}-{}/profile.json",
            name,
            std::process::id()
        ))
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());

        let mut profile = Profile::default();
        profile.currency = 12;
        store.save(&profile).unwrap();
        assert_eq!(store.load().unwrap(), Some(profile));
    }

    #[test]
    fn test_offline_memory_store_rejects_writes() {
        let mut store = MemoryStore::new();
        store.set_offline(true);
        assert!(matches!(
            store.save(&Profile::default()),
            Err(PersistenceError::Unavailable(_))
        ));
        assert!(store.saved().is_none());
    }

    #[test]
    fn test_json_file_round_trip() {
        let path = scratch_path("roundtrip");
        let _ = fs::remove_file(&path);
        let mut store = JsonFileStore::new(&path);
        assert!(store.load().unwrap().is_none());

        let mut profile = Profile::default();
        profile.best_score = 999;
        profile.unlock_skin(PlayerSkin::Knight);
        profile.select_skin(PlayerSkin::Knight);
        store.save(&profile).unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.load().unwrap(), Some(profile));
        assert!(!store.tmp_path().exists());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_json_file_corrupt() {
        let path = scratch_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ truncated").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(PersistenceError::Json(_))));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
