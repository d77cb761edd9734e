//! Idle/demo mode - a simple controller that plays the game
//!
//! Produces a tilt reading from the current world, steering toward the
//! highest platform the player can still reach on the current arc.

use super::state::{Platform, WorldState};
use crate::tuning::Tuning;

/// Horizontal error (units) to desired speed (units/s)
const STEER_GAIN: f32 = 4.0;
/// Velocity error to tilt scaling
const TILT_GAIN: f32 = 3.0;
/// Feet must clear a platform's surface by this much before it counts as reachable
const CLEARANCE: f32 = 8.0;

/// Shortest signed horizontal distance from `from` to `to` on a wrapping world
pub fn wrapped_dx(from: f32, to: f32, width: f32) -> f32 {
    let mut dx = to - from;
    if width > 0.0 {
        if dx > width / 2.0 {
            dx -= width;
        } else if dx < -width / 2.0 {
            dx += width;
        }
    }
    dx
}

/// Platform the autopilot is heading for, if any
pub fn pick_target<'a>(world: &'a WorldState, tuning: &Tuning) -> Option<&'a Platform> {
    let player = &world.player;
    let feet = player.pos.y + tuning.player_half();
    let rise = if player.vel.y < 0.0 {
        player.vel.y * player.vel.y / (2.0 * tuning.gravity)
    } else {
        0.0
    };
    let apex = feet - rise;
    let screen_bottom = world.camera_offset + world.world_height;

    world
        .platforms
        .iter()
        .filter(|p| !p.broken)
        .filter(|p| p.top() >= apex + CLEARANCE && p.top() <= screen_bottom)
        .min_by(|a, b| a.top().total_cmp(&b.top()))
}

/// Tilt in [-1, 1] steering toward the current target (0 if there is none)
pub fn steer(world: &WorldState, tuning: &Tuning) -> f32 {
    let Some(target) = pick_target(world, tuning) else {
        return 0.0;
    };

    let dx = wrapped_dx(world.player.pos.x, target.pos.x, world.world_width);
    let desired_vx =
        (dx * STEER_GAIN).clamp(-tuning.max_horizontal_speed, tuning.max_horizontal_speed);
    // Positive tilt accelerates toward -X, so tilt follows (current - desired)
    let error = world.player.vel.x - desired_vx;
    (error / tuning.max_horizontal_speed * TILT_GAIN).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::PlatformKind;
    use glam::Vec2;

    #[test]
    fn test_wrapped_dx_takes_short_way() {
        assert_eq!(wrapped_dx(10.0, 390.0, 400.0), -20.0);
        assert_eq!(wrapped_dx(390.0, 10.0, 400.0), 20.0);
        assert_eq!(wrapped_dx(100.0, 150.0, 400.0), 50.0);
    }

    #[test]
    fn test_no_platforms_no_tilt() {
        let tuning = Tuning::default();
        let world = WorldState::empty(400.0, 800.0, 1);
        assert_eq!(steer(&world, &tuning), 0.0);
    }

    #[test]
    fn test_steers_toward_reachable_platform() {
        let tuning = Tuning::default();
        let mut world = WorldState::empty(400.0, 800.0, 1);
        world.player.pos = Vec2::new(100.0, 600.0);
        world.player.vel = Vec2::new(0.0, -tuning.jump_force);
        // Reachable (about 200 above), to the right
        let near = world.spawn_platform(Vec2::new(200.0, 420.0), 104.0, 20.0, PlatformKind::Static, 1.0);
        // Too high to reach on this jump
        world.spawn_platform(Vec2::new(20.0, 100.0), 104.0, 20.0, PlatformKind::Static, 1.0);

        assert_eq!(pick_target(&world, &tuning).map(|p| p.id), Some(near));
        // Target is to the right, so the tilt must push right (negative)
        assert!(steer(&world, &tuning) < 0.0);
    }

    #[test]
    fn test_falling_targets_platform_below() {
        let tuning = Tuning::default();
        let mut world = WorldState::empty(400.0, 800.0, 1);
        world.player.pos = Vec2::new(300.0, 300.0);
        world.player.vel = Vec2::new(0.0, 200.0);
        let below = world.spawn_platform(Vec2::new(100.0, 500.0), 104.0, 20.0, PlatformKind::Static, 1.0);
        world.spawn_platform(Vec2::new(300.0, 200.0), 104.0, 20.0, PlatformKind::Static, 1.0);

        assert_eq!(pick_target(&world, &tuning).map(|p| p.id), Some(below));
        assert!(steer(&world, &tuning) > 0.0);
    }
}
