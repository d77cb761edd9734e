//! Per-frame simulation step
//!
//! Order within a frame is fixed: player integration, collision resolution
//! (platforms, enemies, pickups), locomotion, camera/score, generation and
//! culling, then the fall check.

use super::camera::follow_player;
use super::collision::{EnemyContact, PlayerSweep, enemy_contact, find_landing, touches_collectible};
use super::generator::cull;
use super::physics::{integrate_player, locomote};
use super::state::{DeathCause, GameEvent, GameStatus, WorldState};
use crate::tuning::Tuning;

/// Advance the world by `dt` seconds
///
/// A no-op unless the world is Playing, initialized, and `dt` is a positive
/// finite number. Events raised by the frame replace `world.events`; a
/// no-op call leaves the previous frame's events in place.
pub fn tick(world: &mut WorldState, tuning: &Tuning, dt: f32) {
    if world.status != GameStatus::Playing || !world.is_initialized() {
        return;
    }
    if !(dt.is_finite() && dt > 0.0) {
        return;
    }
    let dt = dt.min(tuning.max_frame_dt);
    world.frame += 1;
    world.events.clear();

    let integrated = integrate_player(world, tuning, dt);

    resolve_landing(world, tuning, &integrated);

    // Enemy test sees the post-landing position but the pre-bounce velocity
    let sweep = PlayerSweep {
        pos: world.player.pos,
        ..integrated
    };
    if resolve_enemies(world, tuning, &sweep) == Some(EnemyContact::Lethal) {
        // Drop a platform cracked this frame so the final snapshot is consistent
        cull(world, tuning);
        end_run(world, DeathCause::Enemy);
        return;
    }

    collect_pickups(world, tuning);

    locomote(world, tuning, dt);

    follow_player(world, tuning);

    if world.player_screen_y() > world.world_height + tuning.overshoot_margin {
        world.events.push(GameEvent::FellOff);
        end_run(world, DeathCause::Fell);
    }
}

/// Bounce off the first platform (in list order) crossed this frame
fn resolve_landing(world: &mut WorldState, tuning: &Tuning, sweep: &PlayerSweep) {
    let Some(index) = find_landing(sweep, &world.platforms, tuning) else {
        return;
    };

    let platform = &mut world.platforms[index];
    world.player.pos.y = platform.top() - tuning.player_half();
    world.player.vel.y = -tuning.jump_force;

    let platform_id = platform.id;
    world.events.push(GameEvent::Jumped { platform_id });
    if platform.on_landing() {
        world.events.push(GameEvent::PlatformBroken { platform_id });
    }
}

/// Stomp or die on the first enemy touched. Returns the contact kind.
fn resolve_enemies(
    world: &mut WorldState,
    tuning: &Tuning,
    sweep: &PlayerSweep,
) -> Option<EnemyContact> {
    let (index, contact) = world
        .enemies
        .iter()
        .enumerate()
        .find_map(|(i, enemy)| enemy_contact(sweep, enemy, tuning).map(|c| (i, c)))?;

    match contact {
        EnemyContact::Stomp => {
            let enemy = world.enemies.remove(index);
            world.player.vel.y = -tuning.jump_force * tuning.stomp_bounce_multiplier;
            world.currency_earned += tuning.stomp_reward;
            world.events.push(GameEvent::EnemyStomped { enemy_id: enemy.id });
        }
        EnemyContact::Lethal => {
            let enemy_id = world.enemies[index].id;
            world.events.push(GameEvent::EnemyHit { enemy_id });
        }
    }
    Some(contact)
}

/// Pick up every collectible overlapping the player
fn collect_pickups(world: &mut WorldState, tuning: &Tuning) {
    let player_pos = world.player.pos;
    let mut picked = Vec::new();
    world.collectibles.retain(|c| {
        let hit = touches_collectible(player_pos, c.pos, tuning);
        if hit {
            picked.push(c.id);
        }
        !hit
    });

    world.currency_earned += picked.len() as u32;
    world.events.extend(
        picked
            .into_iter()
            .map(|collectible_id| GameEvent::Collected { collectible_id }),
    );
}

/// Transition to GameOver and record the result
fn end_run(world: &mut WorldState, cause: DeathCause) {
    let new_best = world.score > world.best_score;
    world.best_score = world.best_score.max(world.score);
    world.status = GameStatus::GameOver;
    world.events.push(GameEvent::GameOver {
        score: world.score,
        new_best,
        cause,
    });
    log::info!(
        "Game over ({:?}) at frame {}: score {}, eggs {}",
        cause,
        world.frame,
        world.score,
        world.currency_earned
    );
}
