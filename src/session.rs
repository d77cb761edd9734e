//! Session state machine
//!
//! `Session` owns the current `WorldState` and is the only thing that
//! advances it. Presentation calls the per-frame API (`start_game`,
//! `update_tilt`, `update_frame`, `pause_game`, `resume_game`) and reads
//! `world()` / `snapshot()` for rendering.
//!
//! ```text
//! Idle --start_game--> Playing <--pause/resume--> Paused
//!                         |
//!                  fall / enemy hit
//!                         v
//!                      GameOver --start_game--> Playing
//! any state --reset--> Idle
//! ```

use crate::persistence::{Profile, ProfileRepository, PurchaseOutcome};
use crate::sim::{GameEvent, GameStatus, WorldState, follow_player, tick};
use crate::skins::PlayerSkin;
use crate::tuning::Tuning;

/// Step between the seeds of consecutive runs (odd, so every seed is visited)
const SEED_STEP: u64 = 0x9E37_79B9_7F4A_7C15;

pub struct Session {
    tuning: Tuning,
    world: WorldState,
    next_seed: u64,
    skin: PlayerSkin,
    best_score: u32,
    profile: Option<ProfileRepository>,
}

impl Session {
    /// Idle session without persistence
    ///
    /// Tuning that fails validation is replaced by the defaults.
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("Rejected tuning, using defaults: {}", e);
                Tuning::default()
            }
        };
        Self {
            tuning,
            world: WorldState::default(),
            next_seed: seed,
            skin: PlayerSkin::Classic,
            best_score: 0,
            profile: None,
        }
    }

    /// Idle session that settles finished runs into `profile`
    pub fn with_profile(tuning: Tuning, seed: u64, profile: ProfileRepository) -> Self {
        let mut session = Self::new(tuning, seed);
        let snapshot = profile.profile().clone();
        session.profile = Some(profile);
        session.apply_profile(&snapshot);
        session
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn status(&self) -> GameStatus {
        self.world.status
    }

    /// Read-only view for rendering
    pub fn world(&self) -> &WorldState {
        &self.world
    }

    /// Owned copy of the current world
    pub fn snapshot(&self) -> WorldState {
        self.world.clone()
    }

    /// Continue from a saved snapshot, replacing the current world
    ///
    /// Zero-sized snapshots are ignored. Returns true if the world was replaced.
    pub fn restore(&mut self, world: WorldState) -> bool {
        if !world.is_initialized() {
            log::warn!("Ignoring restore of an uninitialized world");
            return false;
        }
        log::debug!("Restored world at frame {} ({:?})", world.frame, world.status);
        self.world = world;
        true
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn skin(&self) -> PlayerSkin {
        self.skin
    }

    pub fn profile(&self) -> Option<&ProfileRepository> {
        self.profile.as_ref()
    }

    pub fn profile_mut(&mut self) -> Option<&mut ProfileRepository> {
        self.profile.as_mut()
    }

    /// Begin a fresh run, replacing any current world
    ///
    /// Ignored unless both dimensions are positive. Returns true if a run
    /// started.
    pub fn start_game(&mut self, world_width: f32, world_height: f32) -> bool {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(world_width) || !valid(world_height) {
            log::warn!(
                "Ignoring start_game with invalid dimensions {}x{}",
                world_width,
                world_height
            );
            return false;
        }

        let seed = self.next_seed;
        self.next_seed = self.next_seed.wrapping_add(SEED_STEP);

        let mut world = WorldState::new_session(world_width, world_height, seed, &self.tuning);
        world.player.skin = self.skin;
        world.best_score = self.best_score;
        follow_player(&mut world, &self.tuning);
        self.world = world;

        log::info!(
            "Session started: seed {:#x}, {}x{}, {} platforms",
            seed,
            world_width,
            world_height,
            self.world.platforms.len()
        );
        true
    }

    /// Latest tilt reading, clamped to [-1, 1]. Ignored unless Playing.
    pub fn update_tilt(&mut self, x: f32) {
        if self.world.status != GameStatus::Playing {
            return;
        }
        self.world.tilt = if x.is_nan() { 0.0 } else { x.clamp(-1.0, 1.0) };
    }

    /// Advance the run by `dt` seconds. Ignored unless Playing.
    pub fn update_frame(&mut self, dt: f32) {
        if self.world.status != GameStatus::Playing {
            return;
        }
        tick(&mut self.world, &self.tuning, dt);
        if self.world.status == GameStatus::GameOver {
            self.settle_run();
        }
    }

    pub fn pause_game(&mut self) -> bool {
        if self.world.status != GameStatus::Playing {
            return false;
        }
        self.world.status = GameStatus::Paused;
        log::debug!("Paused at frame {}", self.world.frame);
        true
    }

    pub fn resume_game(&mut self) -> bool {
        if self.world.status != GameStatus::Paused {
            return false;
        }
        self.world.status = GameStatus::Playing;
        log::debug!("Resumed at frame {}", self.world.frame);
        true
    }

    /// Discard the world and return to Idle
    pub fn reset(&mut self) {
        log::debug!("Session reset from {:?}", self.world.status);
        self.world = WorldState::default();
    }

    /// Take the events raised by the most recent frame
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.world.events)
    }

    /// Adopt externally changed profile values (best score, selected skin)
    pub fn apply_profile(&mut self, profile: &Profile) {
        self.best_score = self.best_score.max(profile.best_score);
        self.world.best_score = self.world.best_score.max(self.best_score);
        self.apply_skin(profile.selected_skin);
    }

    /// Dress the player in `skin` (current run and all later ones)
    pub fn apply_skin(&mut self, skin: PlayerSkin) {
        self.skin = skin;
        self.world.player.skin = skin;
    }

    /// Buy (or re-select) a skin through the attached profile
    ///
    /// Returns `None` when the session has no profile.
    pub fn buy_skin(&mut self, skin: PlayerSkin) -> Option<PurchaseOutcome> {
        let outcome = self.profile.as_mut()?.buy_skin(skin);
        if outcome != PurchaseOutcome::InsufficientFunds {
            self.apply_skin(skin);
        }
        Some(outcome)
    }

    /// Persist the result of a run that just ended
    fn settle_run(&mut self) {
        self.best_score = self.best_score.max(self.world.best_score);
        let Some(profile) = self.profile.as_mut() else {
            return;
        };
        profile.record_run(self.world.score, self.world.currency_earned);
        log::info!(
            "Run settled: best {}, balance {}",
            profile.profile().best_score,
            profile.profile().currency
        );
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("status", &self.world.status)
            .field("frame", &self.world.frame)
            .field("score", &self.world.score)
            .field("best_score", &self.best_score)
            .field("skin", &self.skin)
            .finish()
    }
}
