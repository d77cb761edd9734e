//! Persisted player profile
//!
//! Pure data plus the rules for each write operation. Storage backends only
//! ever see whole profiles.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::settings::{AudioSettings, VolumeKind};
use crate::skins::PlayerSkin;

/// Everything that survives between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub best_score: u32,
    pub selected_skin: PlayerSkin,
    pub owned_skins: BTreeSet<PlayerSkin>,
    /// Egg balance
    pub currency: u32,
    pub audio: AudioSettings,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            best_score: 0,
            selected_skin: PlayerSkin::Classic,
            owned_skins: BTreeSet::from([PlayerSkin::Classic]),
            currency: 0,
            audio: AudioSettings::default(),
        }
    }
}

impl Profile {
    /// Classic is always owned, even if a stored profile forgot it
    pub fn owns(&self, skin: PlayerSkin) -> bool {
        skin == PlayerSkin::Classic || self.owned_skins.contains(&skin)
    }

    /// Raise the best score. Returns true if it changed.
    pub fn save_best_score(&mut self, score: u32) -> bool {
        if score > self.best_score {
            self.best_score = score;
            true
        } else {
            false
        }
    }

    /// Select an owned skin. Returns false (and changes nothing) otherwise.
    pub fn select_skin(&mut self, skin: PlayerSkin) -> bool {
        if !self.owns(skin) {
            return false;
        }
        self.selected_skin = skin;
        true
    }

    /// Idempotent. Returns true if the skin was newly added.
    pub fn unlock_skin(&mut self, skin: PlayerSkin) -> bool {
        self.owned_skins.insert(skin)
    }

    pub fn add_currency(&mut self, amount: u32) {
        self.currency = self.currency.saturating_add(amount);
    }

    /// Deduct `amount` if the balance covers it. Spending nothing always succeeds.
    pub fn spend_currency(&mut self, amount: u32) -> bool {
        if amount == 0 {
            return true;
        }
        if self.currency < amount {
            return false;
        }
        self.currency -= amount;
        true
    }

    pub fn set_volume(&mut self, kind: VolumeKind, percent: i32) {
        self.audio.set_volume(kind, percent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let profile = Profile::default();
        assert_eq!(profile.best_score, 0);
        assert_eq!(profile.currency, 0);
        assert_eq!(profile.selected_skin, PlayerSkin::Classic);
        assert!(profile.owns(PlayerSkin::Classic));
        assert!(!profile.owns(PlayerSkin::Knight));
        assert_eq!(profile.audio.music_volume, 80);
    }

    #[test]
    fn test_best_score_only_rises() {
        let mut profile = Profile::default();
        assert!(profile.save_best_score(120));
        assert!(!profile.save_best_score(80));
        assert_eq!(profile.best_score, 120);
    }

    #[test]
    fn test_spend_insufficient_funds() {
        let mut profile = Profile::default();
        profile.add_currency(40);
        assert!(!profile.spend_currency(100));
        assert_eq!(profile.currency, 40);
        assert!(profile.spend_currency(40));
        assert_eq!(profile.currency, 0);
        assert!(profile.spend_currency(0));
    }

    #[test]
    fn test_select_requires_ownership() {
        let mut profile = Profile::default();
        assert!(!profile.select_skin(PlayerSkin::Red));
        assert_eq!(profile.selected_skin, PlayerSkin::Classic);

        assert!(profile.unlock_skin(PlayerSkin::Red));
        assert!(!profile.unlock_skin(PlayerSkin::Red));
        assert!(profile.select_skin(PlayerSkin::Red));
        assert_eq!(profile.selected_skin, PlayerSkin::Red);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let profile: Profile = serde_json::from_str(r#"{ "best_score": 7 }"#).unwrap();
        assert_eq!(profile.best_score, 7);
        assert!(profile.owns(PlayerSkin::Classic));
        assert_eq!(profile.audio, AudioSettings::default());
    }
}
