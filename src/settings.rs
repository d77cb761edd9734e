//! Audio preferences
//!
//! Persisted as part of the player profile. Volumes are whole percentages.

use serde::{Deserialize, Serialize};

/// Default volume for both channels
pub const DEFAULT_VOLUME: u8 = 80;

/// Which volume slider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeKind {
    Music,
    Effects,
}

impl VolumeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VolumeKind::Music => "Music",
            VolumeKind::Effects => "Effects",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "music" => Some(VolumeKind::Music),
            "effects" | "sfx" | "sound" => Some(VolumeKind::Effects),
            _ => None,
        }
    }
}

/// Parse a `kind=percent` pair such as `music=40` or `sfx=0`
pub fn parse_volume(arg: &str) -> Option<(VolumeKind, i32)> {
    let (kind, percent) = arg.split_once('=')?;
    let kind = VolumeKind::from_str(kind.trim())?;
    let percent = percent.trim().parse::<i32>().ok()?;
    Some((kind, percent))
}

/// Music and effects volume (0 - 100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioSettings {
    pub music_volume: u8,
    pub effects_volume: u8,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            music_volume: DEFAULT_VOLUME,
            effects_volume: DEFAULT_VOLUME,
        }
    }
}

impl AudioSettings {
    /// Set a volume, clamping to [0, 100]
    pub fn set_volume(&mut self, kind: VolumeKind, percent: i32) {
        let clamped = percent.clamp(0, 100) as u8;
        match kind {
            VolumeKind::Music => self.music_volume = clamped,
            VolumeKind::Effects => self.effects_volume = clamped,
        }
    }

    pub fn volume(&self, kind: VolumeKind) -> u8 {
        match kind {
            VolumeKind::Music => self.music_volume,
            VolumeKind::Effects => self.effects_volume,
        }
    }

    /// Linear gain (0.0 - 1.0) for a channel
    pub fn gain(&self, kind: VolumeKind) -> f32 {
        self.volume(kind) as f32 / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_volume_clamps() {
        let mut settings = AudioSettings::default();
        settings.set_volume(VolumeKind::Music, 150);
        settings.set_volume(VolumeKind::Effects, -20);
        assert_eq!(settings.music_volume, 100);
        assert_eq!(settings.effects_volume, 0);

        settings.set_volume(VolumeKind::Effects, 35);
        assert_eq!(settings.volume(VolumeKind::Effects), 35);
        assert!((settings.gain(VolumeKind::Effects) - 0.35).abs() < 1e-6);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!(VolumeKind::from_str("SFX"), Some(VolumeKind::Effects));
        assert_eq!(VolumeKind::from_str("music"), Some(VolumeKind::Music));
        assert_eq!(VolumeKind::from_str("voice"), None);
    }

    #[test]
    fn test_parse_volume() {
        assert_eq!(parse_volume("music=40"), Some((VolumeKind::Music, 40)));
        assert_eq!(parse_volume(" SFX = 120 "), Some((VolumeKind::Effects, 120)));
        assert_eq!(parse_volume("music"), None);
        assert_eq!(parse_volume("voice=10"), None);
        assert_eq!(parse_volume("music=loud"), None);
    }
}
