//! Cosmetic chicken skins
//!
//! Skins are purely cosmetic; the simulation only carries the selected id so
//! presentation can pick a sprite.

use serde::{Deserialize, Serialize};

/// Skin catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum PlayerSkin {
    #[default]
    Classic,
    Blue,
    Red,
    Knight,
}

impl PlayerSkin {
    /// Every skin, in shop order
    pub const ALL: [PlayerSkin; 4] = [
        PlayerSkin::Classic,
        PlayerSkin::Blue,
        PlayerSkin::Red,
        PlayerSkin::Knight,
    ];

    /// Price in eggs (Classic is free and always owned)
    pub fn price(&self) -> u32 {
        match self {
            PlayerSkin::Classic => 0,
            PlayerSkin::Blue => 40,
            PlayerSkin::Red => 60,
            PlayerSkin::Knight => 90,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PlayerSkin::Classic => "Classic Chick",
            PlayerSkin::Blue => "Blue Sky",
            PlayerSkin::Red => "Red Pixel",
            PlayerSkin::Knight => "Knight Chick",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerSkin::Classic => "classic",
            PlayerSkin::Blue => "blue",
            PlayerSkin::Red => "red",
            PlayerSkin::Knight => "knight",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(PlayerSkin::Classic),
            "blue" => Some(PlayerSkin::Blue),
            "red" => Some(PlayerSkin::Red),
            "knight" => Some(PlayerSkin::Knight),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_is_free_default() {
        assert_eq!(PlayerSkin::default(), PlayerSkin::Classic);
        assert_eq!(PlayerSkin::Classic.price(), 0);
        assert!(PlayerSkin::ALL.iter().skip(1).all(|s| s.price() > 0));
    }

    #[test]
    fn test_names_round_trip() {
        for skin in PlayerSkin::ALL {
            assert_eq!(PlayerSkin::from_str(skin.as_str()), Some(skin));
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!(PlayerSkin::from_str("Knight"), Some(PlayerSkin::Knight));
        assert_eq!(PlayerSkin::from_str("gold"), None);
    }
}
