//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only (owned by the world)
//! - Stable iteration order (generation order; first match wins)
//! - No rendering or storage dependencies

pub mod autopilot;
pub mod camera;
pub mod collision;
pub mod generator;
pub mod physics;
pub mod state;
pub mod tick;

pub use autopilot::steer;
pub use camera::{follow_player, score_for, update_camera};
pub use collision::{EnemyContact, PlayerSweep, enemy_contact, lands_on_platform};
pub use generator::{cull, generate_ahead, working_window};
pub use state::{
    Collectible, DeathCause, Enemy, GameEvent, GameStatus, Platform, PlatformKind, Player,
    WorldState,
};
pub use tick::tick;
