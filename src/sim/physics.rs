//! Player integration and entity locomotion

use glam::Vec2;

use super::collision::PlayerSweep;
use super::state::WorldState;
use crate::tuning::Tuning;
use crate::wrap_x;

/// Integrate the player one step: tilt -> horizontal velocity, gravity ->
/// vertical velocity, then position with horizontal wrap.
///
/// Tilt sign: a positive reading accelerates the player toward negative X.
pub fn integrate_player(world: &mut WorldState, tuning: &Tuning, dt: f32) -> PlayerSweep {
    let player = &mut world.player;
    let prev_pos = player.pos;

    let vx = (player.vel.x - world.tilt * tuning.tilt_acceleration * dt)
        .clamp(-tuning.max_horizontal_speed, tuning.max_horizontal_speed);
    // No terminal velocity
    let vy = player.vel.y + tuning.gravity * dt;
    player.vel = Vec2::new(vx, vy);

    let next = player.pos + player.vel * dt;
    player.pos = Vec2::new(wrap_x(next.x, world.world_width), next.y);

    PlayerSweep {
        prev_pos,
        pos: player.pos,
        vel_y: vy,
    }
}

/// Move Moving platforms and enemies, reflecting at the world edges
pub fn locomote(world: &mut WorldState, tuning: &Tuning, dt: f32) {
    let width = world.world_width;
    for platform in &mut world.platforms {
        platform.locomote(dt, tuning.moving_platform_speed, width);
    }
    let enemy_half = tuning.enemy_size / 2.0;
    for enemy in &mut world.enemies {
        enemy.locomote(dt, enemy_half, width);
    }
}
