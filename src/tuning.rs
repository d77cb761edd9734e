//! Data-driven game balance
//!
//! Every physics, generation and scoring constant lives in [`Tuning`] so the
//! feel of the game can be changed from a JSON file without touching the
//! simulation code. Missing fields fall back to the defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Problems loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Collision half-extents of a box-shaped entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HalfExtents {
    pub x: f32,
    pub y: f32,
}

impl HalfExtents {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Inclusive range used for random platform spacing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpacingRange {
    pub min: f32,
    pub max: f32,
}

/// Tunable gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player physics ===
    pub gravity: f32,
    pub jump_force: f32,
    /// Bounce after a stomp is `jump_force * stomp_bounce_multiplier`
    pub stomp_bounce_multiplier: f32,
    /// Positive tilt accelerates the player toward negative X (left)
    pub tilt_acceleration: f32,
    pub max_horizontal_speed: f32,
    /// Frames longer than this are clamped before integration
    pub max_frame_dt: f32,

    // === Locomotion ===
    pub moving_platform_speed: f32,
    pub enemy_speed: f32,

    // === Sizes ===
    pub player_size: f32,
    pub platform_width: f32,
    pub platform_height: f32,
    pub start_platform_width: f32,
    pub start_platform_lift: f32,
    pub enemy_size: f32,
    pub collectible_size: f32,

    // === Collision ===
    pub collision_scale: f32,
    pub platform_collision_buffer: f32,
    pub enemy_half_extents: HalfExtents,
    pub collectible_half_extents: HalfExtents,

    // === Generation ===
    pub platform_spacing: SpacingRange,
    pub moving_platform_chance: f32,
    pub cracked_platform_chance: f32,
    pub enemy_spawn_chance: f32,
    pub collectible_spawn_chance: f32,
    pub stack_tolerance: f32,
    pub enemy_safe_height: f32,
    pub lookahead_depth: f32,
    pub cull_buffer: f32,

    // === Camera / scoring ===
    pub camera_trigger_fraction: f32,
    pub score_divisor: f32,
    pub overshoot_margin: f32,
    pub stomp_reward: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            stomp_bounce_multiplier: STOMP_BOUNCE_MULTIPLIER,
            tilt_acceleration: TILT_ACCELERATION,
            max_horizontal_speed: MAX_HORIZONTAL_SPEED,
            max_frame_dt: MAX_FRAME_DT,

            moving_platform_speed: MOVING_PLATFORM_SPEED,
            enemy_speed: ENEMY_SPEED,

            player_size: PLAYER_SIZE,
            platform_width: PLATFORM_WIDTH,
            platform_height: PLATFORM_HEIGHT,
            start_platform_width: START_PLATFORM_WIDTH,
            start_platform_lift: START_PLATFORM_LIFT,
            enemy_size: ENEMY_SIZE,
            collectible_size: COLLECTIBLE_SIZE,

            collision_scale: COLLISION_SCALE,
            platform_collision_buffer: PLATFORM_COLLISION_BUFFER,
            enemy_half_extents: HalfExtents::new(
                ENEMY_HALF_WIDTH * COLLISION_SCALE,
                ENEMY_HALF_HEIGHT * COLLISION_SCALE,
            ),
            collectible_half_extents: HalfExtents::new(
                COLLECTIBLE_HALF_WIDTH * COLLISION_SCALE,
                COLLECTIBLE_HALF_HEIGHT * COLLISION_SCALE,
            ),

            platform_spacing: SpacingRange {
                min: PLATFORM_SPACING_MIN,
                max: PLATFORM_SPACING_MAX,
            },
            moving_platform_chance: MOVING_PLATFORM_CHANCE,
            cracked_platform_chance: CRACKED_PLATFORM_CHANCE,
            enemy_spawn_chance: ENEMY_SPAWN_CHANCE,
            collectible_spawn_chance: COLLECTIBLE_SPAWN_CHANCE,
            stack_tolerance: STACK_TOLERANCE,
            enemy_safe_height: ENEMY_SAFE_HEIGHT,
            lookahead_depth: LOOKAHEAD_DEPTH,
            cull_buffer: CULL_BUFFER,

            camera_trigger_fraction: CAMERA_TRIGGER_FRACTION,
            score_divisor: SCORE_DIVISOR,
            overshoot_margin: OVERSHOOT_MARGIN,
            stomp_reward: STOMP_REWARD,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document over the defaults and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Half the player sprite (used for the feet/surface snap)
    #[inline]
    pub fn player_half(&self) -> f32 {
        self.player_size / 2.0
    }

    /// Half-extent of the player's (square) hit box
    #[inline]
    pub fn player_collision_half(&self) -> f32 {
        self.player_half() * self.collision_scale
    }

    /// Reject values that would make the simulation produce NaN or loop forever
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("gravity", self.gravity),
            ("jump_force", self.jump_force),
            ("stomp_bounce_multiplier", self.stomp_bounce_multiplier),
            ("tilt_acceleration", self.tilt_acceleration),
            ("max_horizontal_speed", self.max_horizontal_speed),
            ("max_frame_dt", self.max_frame_dt),
            ("player_size", self.player_size),
            ("platform_width", self.platform_width),
            ("platform_height", self.platform_height),
            ("start_platform_width", self.start_platform_width),
            ("enemy_size", self.enemy_size),
            ("collectible_size", self.collectible_size),
            ("collision_scale", self.collision_scale),
            ("enemy_half_extents.x", self.enemy_half_extents.x),
            ("enemy_half_extents.y", self.enemy_half_extents.y),
            ("collectible_half_extents.x", self.collectible_half_extents.x),
            ("collectible_half_extents.y", self.collectible_half_extents.y),
            ("platform_spacing.min", self.platform_spacing.min),
            ("lookahead_depth", self.lookahead_depth),
            ("score_divisor", self.score_divisor),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(field, format!("must be positive and finite, got {value}")));
            }
        }

        let non_negative = [
            ("moving_platform_speed", self.moving_platform_speed),
            ("enemy_speed", self.enemy_speed),
            ("start_platform_lift", self.start_platform_lift),
            ("platform_collision_buffer", self.platform_collision_buffer),
            ("stack_tolerance", self.stack_tolerance),
            ("enemy_safe_height", self.enemy_safe_height),
            ("cull_buffer", self.cull_buffer),
            ("overshoot_margin", self.overshoot_margin),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, format!("must be non-negative, got {value}")));
            }
        }

        if !self.platform_spacing.max.is_finite()
            || self.platform_spacing.max < self.platform_spacing.min
        {
            return Err(invalid(
                "platform_spacing.max",
                format!(
                    "must be >= min ({}), got {}",
                    self.platform_spacing.min, self.platform_spacing.max
                ),
            ));
        }

        let chances = [
            ("moving_platform_chance", self.moving_platform_chance),
            ("cracked_platform_chance", self.cracked_platform_chance),
            ("enemy_spawn_chance", self.enemy_spawn_chance),
            ("collectible_spawn_chance", self.collectible_spawn_chance),
        ];
        for (field, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(field, format!("must be in [0, 1], got {value}")));
            }
        }
        if self.moving_platform_chance + self.cracked_platform_chance > 1.0 {
            return Err(invalid(
                "cracked_platform_chance",
                "moving + cracked chance exceeds 1".to_string(),
            ));
        }

        if !(self.camera_trigger_fraction > 0.0 && self.camera_trigger_fraction < 1.0) {
            return Err(invalid(
                "camera_trigger_fraction",
                format!("must be in (0, 1), got {}", self.camera_trigger_fraction),
            ));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> TuningError {
    TuningError::Invalid { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 1800.0, "score_divisor": 1.0 }"#).unwrap();
        assert_eq!(tuning.gravity, 1800.0);
        assert_eq!(tuning.score_divisor, 1.0);
        assert_eq!(tuning.jump_force, JUMP_FORCE);
    }

    #[test]
    fn test_inverted_spacing_rejected() {
        let err = Tuning::from_json(r#"{ "platform_spacing": { "min": 200.0, "max": 100.0 } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "platform_spacing.max",
                ..
            }
        ));
    }

    #[test]
    fn test_bad_probability_rejected() {
        let err = Tuning::from_json(r#"{ "enemy_spawn_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "enemy_spawn_chance",
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ gravity: }"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_player_collision_half() {
        let tuning = Tuning::default();
        assert!((tuning.player_collision_half() - 14.4).abs() < 1e-4);
    }
}
