//! Procedural level generation and culling
//!
//! Keeps a sliding window of platforms populated above the camera and drops
//! whatever has scrolled out of relevance below it. Generation is lazy: the
//! window only grows upward as the camera climbs.

use glam::Vec2;
use rand::Rng;

use super::state::{PlatformKind, WorldState};
use crate::tuning::Tuning;

/// Fill platforms upward until the topmost one is at least `target_depth`
/// above the camera. Returns the number of platforms created.
///
/// Each new platform may also carry an enemy and/or a collectible resting on
/// it. Each kind is skipped when one of the same kind already sits at nearly
/// the same height; an enemy and an egg may share a platform.
pub fn generate_ahead(world: &mut WorldState, tuning: &Tuning, target_depth: f32) -> usize {
    let spacing = tuning.platform_spacing;
    let usable = spacing.min.is_finite()
        && spacing.max.is_finite()
        && spacing.min > 0.0
        && spacing.max >= spacing.min;
    if !world.is_initialized() || !usable {
        return 0;
    }

    let target_y = world.camera_offset - target_depth;
    let mut top_y = world
        .platforms
        .iter()
        .map(|p| p.pos.y)
        .fold(f32::INFINITY, f32::min);
    if !top_y.is_finite() {
        top_y = world.camera_offset + world.world_height;
    }

    let mut created = 0;
    while top_y > target_y {
        top_y -= world.rng().random_range(spacing.min..=spacing.max);
        spawn_row(world, tuning, top_y);
        created += 1;
    }

    if created > 0 {
        log::debug!(
            "Generated {} platforms, top y={:.0} (camera {:.0})",
            created,
            top_y,
            world.camera_offset
        );
    }
    debug_assert!(world.ids_are_unique(), "duplicate entity id after generation");
    created
}

/// World-Y band `[upper, lower]` that live entities must stay inside
///
/// `lower` is the bottom of the screen plus the cull buffer. `upper` sits
/// beyond the lookahead so freshly generated platforms are never culled.
pub fn working_window(world: &WorldState, tuning: &Tuning) -> (f32, f32) {
    let lower = world.camera_offset + world.world_height + tuning.cull_buffer;
    let upper = world.camera_offset
        - tuning.lookahead_depth
        - tuning.platform_spacing.max
        - tuning.cull_buffer;
    (upper, lower)
}

/// Drop broken platforms and anything outside the working window.
/// Returns the number of entities removed.
pub fn cull(world: &mut WorldState, tuning: &Tuning) -> usize {
    let (upper, lower) = working_window(world, tuning);
    let inside = |y: f32| y >= upper && y <= lower;

    let before = world.platforms.len() + world.enemies.len() + world.collectibles.len();
    world.platforms.retain(|p| !p.broken && inside(p.pos.y));
    world.enemies.retain(|e| inside(e.pos.y));
    world.collectibles.retain(|c| inside(c.pos.y));
    let after = world.platforms.len() + world.enemies.len() + world.collectibles.len();
    before - after
}

/// Weighted kind pick from a uniform roll in [0, 1)
fn pick_kind(roll: f32, tuning: &Tuning) -> PlatformKind {
    if roll < tuning.moving_platform_chance {
        PlatformKind::Moving
    } else if roll < tuning.moving_platform_chance + tuning.cracked_platform_chance {
        PlatformKind::Cracked
    } else {
        PlatformKind::Static
    }
}

/// Is there a value in `ys` within `tolerance` of `y`?
fn height_taken(mut ys: impl Iterator<Item = f32>, y: f32, tolerance: f32) -> bool {
    ys.any(|other| (other - y).abs() < tolerance)
}

/// One platform at `y`, plus optional enemy/collectible riders
fn spawn_row(world: &mut WorldState, tuning: &Tuning, y: f32) {
    let world_width = world.world_width;
    let width = tuning.platform_width;
    let half = width / 2.0;

    // Fixed number of draws per row keeps runs reproducible when chances change
    let rng = world.rng();
    let x = if world_width > width {
        rng.random_range(half..=world_width - half)
    } else {
        world_width / 2.0
    };
    let kind = pick_kind(rng.random::<f32>(), tuning);
    let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
    let enemy_roll = rng.random::<f32>();
    let enemy_direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
    let collectible_roll = rng.random::<f32>();

    world.spawn_platform(Vec2::new(x, y), width, tuning.platform_height, kind, direction);
    let surface = y - tuning.platform_height / 2.0;

    let in_safe_zone = world.start_y - y < tuning.enemy_safe_height;
    if !in_safe_zone && enemy_roll < tuning.enemy_spawn_chance {
        let enemy_y = surface - tuning.enemy_size * 0.75;
        let enemy_ys = world.enemies.iter().map(|e| e.pos.y);
        if !height_taken(enemy_ys, enemy_y, tuning.stack_tolerance) {
            world.spawn_enemy(Vec2::new(x, enemy_y), tuning.enemy_speed, enemy_direction);
        }
    }

    if collectible_roll < tuning.collectible_spawn_chance {
        let egg_y = surface - tuning.collectible_size * 0.6;
        let egg_ys = world.collectibles.iter().map(|c| c.pos.y);
        if !height_taken(egg_ys, egg_y, tuning.stack_tolerance) {
            world.spawn_collectible(Vec2::new(x, egg_y));
        }
    }
}
