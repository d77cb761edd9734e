//! Collision predicates for the player against platforms, enemies and pickups
//!
//! Everything here is pure geometry on axis-aligned boxes; resolving a hit
//! (bouncing, removing entities, ending the run) happens in `tick`.

use glam::Vec2;

use super::state::{Enemy, Platform};
use crate::tuning::{HalfExtents, Tuning};

/// Outcome of touching an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyContact {
    /// Came down on its head while falling
    Stomp,
    /// Any other overlap (side, below, rising)
    Lethal,
}

/// Player kinematics over one frame, as seen by the collision tests
#[derive(Debug, Clone, Copy)]
pub struct PlayerSweep {
    pub prev_pos: Vec2,
    pub pos: Vec2,
    /// Vertical velocity after integration (positive = falling)
    pub vel_y: f32,
}

impl PlayerSweep {
    #[inline]
    pub fn falling(&self) -> bool {
        self.vel_y > 0.0
    }
}

/// Did the player's feet pass through the platform surface this frame?
///
/// Requires the player to be falling, the feet to go from at-or-above the
/// surface to at-or-below it, and the horizontal centers to be within the
/// platform half-width plus the player hit box (minus a small buffer).
pub fn lands_on_platform(sweep: &PlayerSweep, platform: &Platform, tuning: &Tuning) -> bool {
    if platform.broken || !sweep.falling() {
        return false;
    }
    let top = platform.top();
    let half = tuning.player_half();
    let prev_bottom = sweep.prev_pos.y + half;
    let bottom = sweep.pos.y + half;
    if !(prev_bottom <= top && bottom >= top) {
        return false;
    }
    let reach = platform.half_width() + tuning.player_collision_half()
        - tuning.platform_collision_buffer;
    (sweep.pos.x - platform.pos.x).abs() < reach
}

/// First platform in list order that the player lands on this frame
pub fn find_landing(sweep: &PlayerSweep, platforms: &[Platform], tuning: &Tuning) -> Option<usize> {
    platforms
        .iter()
        .position(|platform| lands_on_platform(sweep, platform, tuning))
}

/// Do two boxes (center + half-extents) overlap?
#[inline]
pub fn boxes_overlap(a: Vec2, a_half: HalfExtents, b: Vec2, b_half: HalfExtents) -> bool {
    (a.x - b.x).abs() < a_half.x + b_half.x && (a.y - b.y).abs() < a_half.y + b_half.y
}

/// Classify contact between the player and an enemy, if any
pub fn enemy_contact(sweep: &PlayerSweep, enemy: &Enemy, tuning: &Tuning) -> Option<EnemyContact> {
    let player_half = tuning.player_collision_half();
    let player_box = HalfExtents::new(player_half, player_half);
    let enemy_box = tuning.enemy_half_extents;
    if !boxes_overlap(sweep.pos, player_box, enemy.pos, enemy_box) {
        return None;
    }

    // Stomp: feet were on or above the enemy's head last frame and we are coming down
    let enemy_top = enemy.pos.y - enemy_box.y;
    let prev_bottom = sweep.prev_pos.y + player_half;
    if sweep.falling() && prev_bottom <= enemy_top {
        Some(EnemyContact::Stomp)
    } else {
        Some(EnemyContact::Lethal)
    }
}

/// Is the player close enough to pick up a collectible at `pos`?
pub fn touches_collectible(player_pos: Vec2, pos: Vec2, tuning: &Tuning) -> bool {
    let player_half = tuning.player_collision_half();
    boxes_overlap(
        player_pos,
        HalfExtents::new(player_half, player_half),
        pos,
        tuning.collectible_half_extents,
    )
}
