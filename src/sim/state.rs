//! Game state and core simulation types
//!
//! World coordinates: X grows right, Y grows *down*. Climbing therefore
//! means decreasing Y, and `camera_offset` is the world Y of the top edge of
//! the screen.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::skins::PlayerSkin;
use crate::tuning::Tuning;

/// Current status of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// No active run, waiting for a start command
    #[default]
    Idle,
    /// Simulation advances every frame
    Playing,
    /// Frozen, resumable
    Paused,
    /// Run ended
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Touched an enemy without stomping it
    Enemy,
    /// Dropped below the visible play area
    Fell,
}

/// Things that happened during a frame (drained by presentation/audio)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped { platform_id: u32 },
    PlatformBroken { platform_id: u32 },
    EnemyStomped { enemy_id: u32 },
    EnemyHit { enemy_id: u32 },
    Collected { collectible_id: u32 },
    FellOff,
    GameOver { score: u32, new_best: bool, cause: DeathCause },
}

/// The chicken
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Sprite center
    pub pos: Vec2,
    pub vel: Vec2,
    pub skin: PlayerSkin,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            skin: PlayerSkin::Classic,
        }
    }
}

/// Platform types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlatformKind {
    #[default]
    Static,
    /// Oscillates horizontally between the world bounds
    Moving,
    /// Breaks on the first landing
    Cracked,
}

/// A platform entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    /// Center of the platform
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub kind: PlatformKind,
    /// +1 right, -1 left (only used by Moving)
    pub direction: f32,
    pub broken: bool,
}

impl Platform {
    /// World Y of the walkable surface
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.height / 2.0
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    /// Advance horizontally; only Moving platforms change position
    pub fn locomote(&mut self, dt: f32, speed: f32, world_width: f32) {
        if self.kind == PlatformKind::Moving {
            let half = self.half_width();
            (self.pos.x, self.direction) =
                patrol(self.pos.x, self.direction, speed, dt, half, world_width - half);
        }
    }

    /// React to the player landing on top. Returns true if the platform broke.
    pub fn on_landing(&mut self) -> bool {
        match self.kind {
            PlatformKind::Cracked => {
                self.broken = true;
                true
            }
            PlatformKind::Static | PlatformKind::Moving => false,
        }
    }
}

/// A patrolling enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub speed: f32,
    /// +1 right, -1 left
    pub direction: f32,
}

impl Enemy {
    pub fn locomote(&mut self, dt: f32, half_width: f32, world_width: f32) {
        (self.pos.x, self.direction) = patrol(
            self.pos.x,
            self.direction,
            self.speed,
            dt,
            half_width,
            world_width - half_width,
        );
    }
}

/// A currency pickup (egg)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub pos: Vec2,
}

/// Move along X and reflect at `[lo, hi]`
///
/// Returns the new position and direction. If the band is empty the entity
/// is parked at its midpoint.
pub fn patrol(x: f32, direction: f32, speed: f32, dt: f32, lo: f32, hi: f32) -> (f32, f32) {
    if hi <= lo {
        return ((lo + hi) / 2.0, direction);
    }
    let next = x + direction * speed * dt;
    if next <= lo {
        (lo, 1.0)
    } else if next >= hi {
        (hi, -1.0)
    } else {
        (next, direction)
    }
}

/// Complete world state for one session (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub status: GameStatus,
    pub player: Player,
    /// Live platforms (generation order, bottom to top)
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub collectibles: Vec<Collectible>,
    pub score: u32,
    pub best_score: u32,
    /// Currency picked up during this run
    pub currency_earned: u32,
    /// Smallest player Y seen this run (greatest height)
    pub highest_y: f32,
    /// Latest tilt reading in [-1, 1]
    pub tilt: f32,
    /// World Y of the top edge of the screen
    pub camera_offset: f32,
    pub world_width: f32,
    pub world_height: f32,
    /// World Y of the starting platform's center
    pub start_y: f32,
    /// Frames simulated while Playing
    pub frame: u64,
    /// Events raised during the most recent frame
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    rng: Pcg32,
    next_platform_id: u32,
    next_enemy_id: u32,
    next_collectible_id: u32,
}

impl Default for WorldState {
    /// An idle, zero-sized world (nothing to simulate)
    fn default() -> Self {
        Self::empty(0.0, 0.0, 0)
    }
}

impl WorldState {
    /// A world with no entities. Status is Idle for zero-sized worlds and
    /// Playing otherwise, so hand-built test scenes can be ticked directly.
    pub fn empty(world_width: f32, world_height: f32, seed: u64) -> Self {
        let playable = world_width > 0.0 && world_height > 0.0;
        Self {
            seed,
            status: if playable {
                GameStatus::Playing
            } else {
                GameStatus::Idle
            },
            player: Player::default(),
            platforms: Vec::new(),
            enemies: Vec::new(),
            collectibles: Vec::new(),
            score: 0,
            best_score: 0,
            currency_earned: 0,
            highest_y: f32::MAX,
            tilt: 0.0,
            camera_offset: 0.0,
            world_width,
            world_height,
            start_y: world_height,
            frame: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_platform_id: 1,
            next_enemy_id: 1,
            next_collectible_id: 1,
        }
    }

    /// Fresh session: starting platform under the player, camera at the top
    /// of the world. Callers must pass positive dimensions.
    pub fn new_session(
        world_width: f32,
        world_height: f32,
        seed: u64,
        tuning: &Tuning,
    ) -> Self {
        let mut world = Self::empty(world_width, world_height, seed);

        let start_y = world_height - tuning.start_platform_lift;
        world.start_y = start_y;
        world.spawn_platform(
            Vec2::new(world_width / 2.0, start_y),
            tuning.start_platform_width,
            tuning.platform_height,
            PlatformKind::Static,
            1.0,
        );

        let feet_gap = tuning.platform_height / 2.0 + tuning.player_half();
        world.player.pos = Vec2::new(world_width / 2.0, start_y - feet_gap);
        world.highest_y = world.player.pos.y;
        world.camera_offset = 0.0;
        world
    }

    /// Session RNG
    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Screen-space Y of the player (0 = top edge of the screen)
    #[inline]
    pub fn player_screen_y(&self) -> f32 {
        self.player.pos.y - self.camera_offset
    }

    /// Height the camera has scrolled up from its start (non-decreasing)
    #[inline]
    pub fn scrolled_height(&self) -> f32 {
        -self.camera_offset
    }

    pub fn is_initialized(&self) -> bool {
        self.world_width > 0.0 && self.world_height > 0.0
    }

    /// Add a platform with a fresh id
    pub fn spawn_platform(
        &mut self,
        pos: Vec2,
        width: f32,
        height: f32,
        kind: PlatformKind,
        direction: f32,
    ) -> u32 {
        let id = self.next_platform_id;
        self.next_platform_id += 1;
        self.platforms.push(Platform {
            id,
            pos,
            width,
            height,
            kind,
            direction,
            broken: false,
        });
        id
    }

    /// Add an enemy with a fresh id
    pub fn spawn_enemy(&mut self, pos: Vec2, speed: f32, direction: f32) -> u32 {
        let id = self.next_enemy_id;
        self.next_enemy_id += 1;
        self.enemies.push(Enemy {
            id,
            pos,
            speed,
            direction,
        });
        id
    }

    /// Add a collectible with a fresh id
    pub fn spawn_collectible(&mut self, pos: Vec2) -> u32 {
        let id = self.next_collectible_id;
        self.next_collectible_id += 1;
        self.collectibles.push(Collectible { id, pos });
        id
    }

    /// True if no two live entities of the same type share an id
    pub fn ids_are_unique(&self) -> bool {
        fn unique(ids: impl Iterator<Item = u32>) -> bool {
            let mut ids: Vec<u32> = ids.collect();
            let len = ids.len();
            ids.sort_unstable();
            ids.dedup();
            ids.len() == len
        }
        unique(self.platforms.iter().map(|p| p.id))
            && unique(self.enemies.iter().map(|e| e.id))
            && unique(self.collectibles.iter().map(|c| c.id))
    }
}
