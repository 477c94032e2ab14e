//! Session state and core simulation types
//!
//! Everything a running session mutates lives in [`SessionState`]. Nothing
//! outside the session keeps a reference to it past a frame boundary.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;

/// The player avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner (y grows downward)
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity in units per reference frame
    pub vy: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    /// Standing on a platform this frame (jump allowed)
    pub on_platform: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
            size: Vec2::splat(PLAYER_SIZE),
            vy: 0.0,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            on_platform: false,
        }
    }
}

impl Player {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Y of the bottom edge
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Jump if standing on a platform. Returns whether the jump happened.
    pub fn jump(&mut self) -> bool {
        if !self.on_platform {
            return false;
        }
        self.vy = self.jump_impulse;
        self.on_platform = false;
        true
    }
}

/// A platform the player can land on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    /// Top-left corner; y is the landing surface
    pub pos: Vec2,
    pub width: f32,
}

impl Platform {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(self.width, LANDING_BAND))
    }
}

/// Collectible types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    /// Worth one point (two while the multiplier is active)
    Coin,
    /// Activates the score multiplier
    MultiplierGem,
}

/// A collectible entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub kind: CollectibleKind,
    pub pos: Vec2,
    pub size: f32,
}

impl Collectible {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(self.size))
    }
}

/// An obstacle that costs points on contact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub penalty: u32,
}

impl Hazard {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(self.size))
    }
}

/// Temporary score multiplier. Never stacks: picking up another gem while
/// active restarts the counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Multiplier {
    pub active: bool,
    /// Update calls left before the multiplier expires
    pub remaining_frames: u32,
    pub factor: u32,
}

impl Default for Multiplier {
    fn default() -> Self {
        Self {
            active: false,
            remaining_frames: 0,
            factor: MULTIPLIER_FACTOR,
        }
    }
}

impl Multiplier {
    pub fn activate(&mut self) {
        self.active = true;
        self.remaining_frames = MULTIPLIER_FRAMES;
    }

    /// Count down one update call. The counter is per call, not per
    /// wall-clock frame, so the duration is only 5 seconds at 60 fps.
    pub fn tick(&mut self) {
        if !self.active {
            return;
        }
        self.remaining_frames = self.remaining_frames.saturating_sub(1);
        if self.remaining_frames == 0 {
            self.active = false;
        }
    }

    /// Points awarded for a pickup worth `base`
    pub fn apply(&self, base: u32) -> u32 {
        if self.active { base * self.factor } else { base }
    }
}

/// Result of a physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Player still in view
    Continue,
    /// Player fell below the view; the session must end
    FellOut,
}

/// Complete state of one running session
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Seed the generator RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    /// Score (never negative)
    pub score: u32,
    /// Physics steps taken
    pub time_ticks: u64,
    pub player: Player,
    /// Live platforms (sorted by id)
    pub platforms: Vec<Platform>,
    /// Live collectibles (sorted by id)
    pub collectibles: Vec<Collectible>,
    /// Live hazards (sorted by id)
    pub hazards: Vec<Hazard>,
    pub multiplier: Multiplier,
    /// Next entity ID
    next_id: u32,
}

impl SessionState {
    /// Create a fresh session: player at the spawn point standing above three
    /// seed platforms so the first jump always has somewhere to go.
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            time_ticks: 0,
            player: Player::default(),
            platforms: Vec::new(),
            collectibles: Vec::new(),
            hazards: Vec::new(),
            multiplier: Multiplier::default(),
            next_id: 1,
        };

        state.spawn_platform(VIEW_WIDTH / 2.0 - PLATFORM_WIDTH / 2.0, VIEW_HEIGHT - 30.0);
        for y in [VIEW_HEIGHT - 120.0, VIEW_HEIGHT - 210.0] {
            let x = state.rng.random_range(0.0..=VIEW_WIDTH - PLATFORM_WIDTH);
            state.spawn_platform(x, y);
        }

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn spawn_platform(&mut self, x: f32, y: f32) -> u32 {
        let id = self.next_entity_id();
        self.platforms.push(Platform {
            id,
            pos: Vec2::new(x, y),
            width: PLATFORM_WIDTH,
        });
        id
    }

    pub fn spawn_collectible(&mut self, kind: CollectibleKind, x: f32, y: f32) -> u32 {
        let id = self.next_entity_id();
        self.collectibles.push(Collectible {
            id,
            kind,
            pos: Vec2::new(x, y),
            size: COLLECTIBLE_SIZE,
        });
        id
    }

    pub fn spawn_hazard(&mut self, x: f32, y: f32) -> u32 {
        let id = self.next_entity_id();
        self.hazards.push(Hazard {
            id,
            pos: Vec2::new(x, y),
            size: HAZARD_SIZE,
            penalty: HAZARD_PENALTY,
        });
        id
    }

    /// Subtract a penalty, flooring the score at zero
    pub fn apply_penalty(&mut self, penalty: u32) {
        self.score = self.score.saturating_sub(penalty);
    }

    /// Shift the player horizontally (move commands are displacement, not velocity)
    pub fn nudge_player(&mut self, dx: f32) {
        self.player.pos.x += dx;
    }

    /// Ensure live sets are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.platforms.sort_by_key(|p| p.id);
        self.collectibles.sort_by_key(|c| c.id);
        self.hazards.sort_by_key(|h| h.id);
    }
}
