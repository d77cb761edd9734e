//! Write-through profile repository
//!
//! Every mutation lands in memory first and is then written to the store.
//! A failed write is logged and remembered; the in-memory profile stays
//! authoritative and the next successful write (or `flush`) catches up.

use super::{PersistenceError, Profile, ProfileStore};
use crate::settings::VolumeKind;
use crate::skins::PlayerSkin;

/// Result of a skin purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Purchased,
    AlreadyOwned,
    InsufficientFunds,
}

pub struct ProfileRepository {
    store: Box<dyn ProfileStore>,
    profile: Profile,
    dirty: bool,
}

impl ProfileRepository {
    /// Load from `store`, falling back to a fresh profile on any failure
    pub fn open(store: Box<dyn ProfileStore>) -> Self {
        let profile = match store.load() {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                log::info!("No stored profile, starting fresh");
                Profile::default()
            }
            Err(e) => {
                log::warn!("Failed to load profile, starting fresh: {}", e);
                Profile::default()
            }
        };
        Self {
            store,
            profile,
            dirty: false,
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// True while an earlier write has not reached the store
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Retry a pending write
    pub fn flush(&mut self) -> Result<(), PersistenceError> {
        if !self.dirty {
            return Ok(());
        }
        self.store.save(&self.profile)?;
        self.dirty = false;
        Ok(())
    }

    fn write_through(&mut self) {
        match self.store.save(&self.profile) {
            Ok(()) => self.dirty = false,
            Err(e) => {
                log::warn!("Failed to save profile: {}", e);
                self.dirty = true;
            }
        }
    }

    pub fn save_best_score(&mut self, score: u32) -> bool {
        let changed = self.profile.save_best_score(score);
        if changed {
            self.write_through();
        }
        changed
    }

    pub fn select_skin(&mut self, skin: PlayerSkin) -> bool {
        let ok = self.profile.select_skin(skin);
        if ok {
            self.write_through();
        }
        ok
    }

    pub fn unlock_skin(&mut self, skin: PlayerSkin) -> bool {
        let added = self.profile.unlock_skin(skin);
        if added {
            self.write_through();
        }
        added
    }

    pub fn add_currency(&mut self, amount: u32) {
        if amount == 0 {
            return;
        }
        self.profile.add_currency(amount);
        self.write_through();
    }

    pub fn spend_currency(&mut self, amount: u32) -> bool {
        let ok = self.profile.spend_currency(amount);
        if ok && amount > 0 {
            self.write_through();
        }
        ok
    }

    pub fn set_volume(&mut self, kind: VolumeKind, percent: i32) {
        self.profile.set_volume(kind, percent);
        self.write_through();
    }

    /// Spend, unlock, then select. Nothing changes unless the balance covers the price.
    pub fn buy_skin(&mut self, skin: PlayerSkin) -> PurchaseOutcome {
        if self.profile.owns(skin) {
            self.select_skin(skin);
            return PurchaseOutcome::AlreadyOwned;
        }
        if !self.profile.spend_currency(skin.price()) {
            log::info!(
                "Cannot afford {} ({} eggs, have {})",
                skin.title(),
                skin.price(),
                self.profile.currency
            );
            return PurchaseOutcome::InsufficientFunds;
        }
        self.profile.unlock_skin(skin);
        self.profile.select_skin(skin);
        self.write_through();
        log::info!("Purchased skin {}", skin.title());
        PurchaseOutcome::Purchased
    }

    /// Settle a finished run. Returns true if the best score improved.
    pub fn record_run(&mut self, score: u32, currency: u32) -> bool {
        let new_best = self.profile.save_best_score(score);
        self.profile.add_currency(currency);
        if new_best || currency > 0 {
            self.write_through();
        }
        new_best
    }
}

impl std::fmt::Debug for ProfileRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileRepository")
            .field("profile", &self.profile)
            .field("dirty", &self.dirty)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::persistence::MemoryStore;

    /// Store handle shared with the test so it can inspect writes
    #[derive(Clone, Default)]
    struct SharedStore(Rc<RefCell<MemoryStore>>);

    impl ProfileStore for SharedStore {
        fn load(&self) -> Result<Option<Profile>, PersistenceError> {
            self.0.borrow().load()
        }

        fn save(&mut self, profile: &Profile) -> Result<(), PersistenceError> {
            self.0.borrow_mut().save(profile)
        }
    }

    fn funded(currency: u32) -> (ProfileRepository, SharedStore) {
        let mut profile = Profile::default();
        profile.currency = currency;
        let store = SharedStore(Rc::new(RefCell::new(MemoryStore::with_profile(profile))));
        (ProfileRepository::open(Box::new(store.clone())), store)
    }

    #[test]
    fn test_open_missing_profile() {
        let repo = ProfileRepository::open(Box::new(MemoryStore::new()));
        assert_eq!(repo.profile(), &Profile::default());
        assert!(!repo.is_dirty());
    }

    #[test]
    fn test_buy_skin_insufficient_funds() {
        let (mut repo, store) = funded(40);
        assert_eq!(repo.buy_skin(PlayerSkin::Red), PurchaseOutcome::InsufficientFunds);
        assert_eq!(repo.profile().currency, 40);
        assert!(!repo.profile().owns(PlayerSkin::Red));
        assert_eq!(repo.profile().selected_skin, PlayerSkin::Classic);
        assert_eq!(store.0.borrow().saved().map(|p| p.currency), Some(40));
    }

    #[test]
    fn test_buy_skin_purchases_and_selects() {
        let (mut repo, store) = funded(100);
        assert_eq!(repo.buy_skin(PlayerSkin::Red), PurchaseOutcome::Purchased);
        assert_eq!(repo.profile().currency, 40);
        assert_eq!(repo.profile().selected_skin, PlayerSkin::Red);

        let saved = store.0.borrow().saved().cloned().unwrap();
        assert!(saved.owns(PlayerSkin::Red));
        assert_eq!(saved.currency, 40);

        assert_eq!(repo.buy_skin(PlayerSkin::Red), PurchaseOutcome::AlreadyOwned);
        assert_eq!(repo.profile().currency, 40);
    }

    #[test]
    fn test_write_failure_keeps_memory_and_flushes_later() {
        let store = SharedStore::default();
        store.0.borrow_mut().set_offline(true);
        let mut repo = ProfileRepository::open(Box::new(store.clone()));

        assert!(repo.record_run(250, 6));
        assert!(repo.is_dirty());
        assert_eq!(repo.profile().best_score, 250);
        assert_eq!(repo.profile().currency, 6);
        assert!(store.0.borrow().saved().is_none());
        assert!(repo.flush().is_err());

        store.0.borrow_mut().set_offline(false);
        repo.flush().unwrap();
        assert!(!repo.is_dirty());
        assert_eq!(store.0.borrow().saved().map(|p| p.best_score), Some(250));
    }

    #[test]
    fn test_record_run_keeps_best() {
        let (mut repo, _store) = funded(0);
        assert!(repo.record_run(300, 2));
        assert!(!repo.record_run(120, 3));
        assert_eq!(repo.profile().best_score, 300);
        assert_eq!(repo.profile().currency, 5);
    }

    #[test]
    fn test_volume_write_through() {
        let (mut repo, store) = funded(0);
        repo.set_volume(VolumeKind::Music, 250);
        assert_eq!(repo.profile().audio.music_volume, 100);
        assert_eq!(
            store.0.borrow().saved().map(|p| p.audio.music_volume),
            Some(100)
        );
    }
}
