//! Chicken Climb - an endless vertical climber
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, generation, camera)
//! - `session`: Session state machine and the per-frame API for presentation
//! - `tuning`: Data-driven game balance
//! - `persistence`: Profile storage (best score, skins, currency, volumes)
//! - `audio`: Sound cue mapping for simulation events

pub mod audio;
pub mod persistence;
pub mod session;
pub mod settings;
pub mod sim;
pub mod skins;
pub mod tuning;

pub use session::Session;
pub use settings::{AudioSettings, VolumeKind};
pub use skins::PlayerSkin;
pub use tuning::Tuning;

/// Default tuning values. `Tuning::default()` is built from these.
pub mod consts {
    /// Frame step used by the headless runner (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Longest step a single frame may advance (prevents tunnelling after stalls)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Player physics (units/s, units/s²)
    pub const GRAVITY: f32 = 2100.0;
    pub const JUMP_FORCE: f32 = 1100.0;
    pub const STOMP_BOUNCE_MULTIPLIER: f32 = 1.08;
    pub const TILT_ACCELERATION: f32 = 1250.0;
    pub const MAX_HORIZONTAL_SPEED: f32 = 780.0;

    /// Locomotion speeds
    pub const MOVING_PLATFORM_SPEED: f32 = 150.0;
    pub const ENEMY_SPEED: f32 = 220.0;

    /// Entity sizes
    pub const PLAYER_SIZE: f32 = 32.0;
    pub const PLATFORM_WIDTH: f32 = 104.0;
    pub const PLATFORM_HEIGHT: f32 = 20.0;
    pub const START_PLATFORM_WIDTH: f32 = 110.0;
    pub const ENEMY_SIZE: f32 = 32.0;
    pub const COLLECTIBLE_SIZE: f32 = 24.0;
    /// Distance from the bottom of the screen to the starting platform
    pub const START_PLATFORM_LIFT: f32 = 120.0;

    /// Hit boxes are shrunk relative to sprite size by this factor
    pub const COLLISION_SCALE: f32 = 0.9;
    /// Shaved off the horizontal landing overlap so edge grazes don't count
    pub const PLATFORM_COLLISION_BUFFER: f32 = 4.0;
    pub const ENEMY_HALF_WIDTH: f32 = 16.0;
    pub const ENEMY_HALF_HEIGHT: f32 = 18.0;
    pub const COLLECTIBLE_HALF_WIDTH: f32 = 14.0;
    pub const COLLECTIBLE_HALF_HEIGHT: f32 = 16.0;

    /// Generation
    pub const PLATFORM_SPACING_MIN: f32 = 150.0;
    pub const PLATFORM_SPACING_MAX: f32 = 230.0;
    pub const MOVING_PLATFORM_CHANCE: f32 = 0.15;
    pub const CRACKED_PLATFORM_CHANCE: f32 = 0.20;
    pub const ENEMY_SPAWN_CHANCE: f32 = 0.08;
    pub const COLLECTIBLE_SPAWN_CHANCE: f32 = 0.12;
    /// Spawns closer than this (in Y) to an existing enemy/collectible are skipped
    pub const STACK_TOLERANCE: f32 = 10.0;
    /// No enemies within this height above the starting platform
    pub const ENEMY_SAFE_HEIGHT: f32 = 600.0;
    pub const LOOKAHEAD_DEPTH: f32 = 3000.0;
    pub const CULL_BUFFER: f32 = 200.0;

    /// Camera and scoring
    pub const CAMERA_TRIGGER_FRACTION: f32 = 0.4;
    pub const SCORE_DIVISOR: f32 = 10.0;
    /// How far below the screen the player may sink before the run ends
    pub const OVERSHOOT_MARGIN: f32 = PLAYER_SIZE;

    /// Currency per stomped enemy (collectibles are always worth 1)
    pub const STOMP_REWARD: u32 = 1;
}

/// Wrap a horizontal coordinate into [0, width)
///
/// Leaving one edge re-enters from the opposite one.
#[inline]
pub fn wrap_x(x: f32, width: f32) -> f32 {
    if width <= 0.0 || !x.is_finite() {
        return x;
    }
    let wrapped = x.rem_euclid(width);
    // rem_euclid can round up to exactly `width` for tiny negative inputs
    if wrapped >= width { 0.0 } else { wrapped }
}
