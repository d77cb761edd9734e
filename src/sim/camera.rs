//! Camera scrolling and height scoring
//!
//! The camera only ever scrolls up. Because Y grows downward, that means
//! `camera_offset` never increases; `WorldState::scrolled_height` exposes the
//! same quantity as a non-decreasing value.

use super::generator::{cull, generate_ahead};
use super::state::WorldState;
use crate::tuning::Tuning;

/// Score for a given best height
pub fn score_for(world_height: f32, highest_y: f32, divisor: f32) -> u32 {
    let raw = ((world_height - highest_y) / divisor).floor();
    if raw.is_finite() && raw > 0.0 {
        raw as u32
    } else {
        0
    }
}

/// Scroll the camera toward the player and update best height and score
pub fn update_camera(world: &mut WorldState, tuning: &Tuning) {
    let trigger = world.world_height * tuning.camera_trigger_fraction;
    if world.player_screen_y() < trigger {
        let target = world.player.pos.y - trigger;
        world.camera_offset = world.camera_offset.min(target);
    }

    world.highest_y = world.highest_y.min(world.player.pos.y);
    let score = score_for(world.world_height, world.highest_y, tuning.score_divisor);
    world.score = world.score.max(score);
}

/// Camera/score update followed by top-up generation and culling
pub fn follow_player(world: &mut WorldState, tuning: &Tuning) {
    update_camera(world, tuning);
    generate_ahead(world, tuning, tuning.lookahead_depth);
    cull(world, tuning);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_score_formula() {
        assert_eq!(score_for(800.0, 680.0, 10.0), 12);
        assert_eq!(score_for(800.0, -1000.0, 10.0), 180);
        assert_eq!(score_for(800.0, -1000.0, 1.0), 1800);
        // Below the bottom of the world never goes negative
        assert_eq!(score_for(800.0, 900.0, 10.0), 0);
        assert_eq!(score_for(0.0, f32::MAX, 10.0), 0);
    }

    #[test]
    fn test_camera_follows_climb() {
        let tuning = Tuning::default();
        let mut world = WorldState::empty(400.0, 800.0, 1);
        // Trigger line is at screen y=320
        world.player.pos = Vec2::new(200.0, 200.0);
        update_camera(&mut world, &tuning);
        assert!((world.camera_offset - (-120.0)).abs() < 1e-3);
        assert!((world.player_screen_y() - 320.0).abs() < 1e-3);
    }

    #[test]
    fn test_camera_never_scrolls_down() {
        let tuning = Tuning::default();
        let mut world = WorldState::empty(400.0, 800.0, 1);
        world.player.pos = Vec2::new(200.0, -500.0);
        update_camera(&mut world, &tuning);
        let high_camera = world.camera_offset;

        // Player drops back down
        world.player.pos.y = 600.0;
        update_camera(&mut world, &tuning);
        assert_eq!(world.camera_offset, high_camera);
    }

    #[test]
    fn test_score_tracks_best_height_only() {
        let tuning = Tuning::default();
        let mut world = WorldState::empty(400.0, 800.0, 1);
        world.player.pos = Vec2::new(200.0, 300.0);
        update_camera(&mut world, &tuning);
        assert_eq!(world.score, 50);
        assert_eq!(world.highest_y, 300.0);

        world.player.pos.y = 500.0;
        update_camera(&mut world, &tuning);
        assert_eq!(world.score, 50);
        assert_eq!(world.highest_y, 300.0);
    }

    #[test]
    fn test_follow_player_tops_up_platforms() {
        let tuning = Tuning::default();
        let mut world = WorldState::new_session(400.0, 800.0, 2, &tuning);
        follow_player(&mut world, &tuning);
        assert!(world.platforms.len() > 1);
        let top = world.platforms.iter().map(|p| p.pos.y).fold(f32::INFINITY, f32::min);
        assert!(top <= world.camera_offset - tuning.lookahead_depth);
    }
}
