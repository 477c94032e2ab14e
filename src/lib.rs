//! Cloud Hop - A cloud-hopping arcade mini-game
//!
//! Core modules:
//! - `sim`: Simulation (physics, collisions, track generation, game state)
//! - `session`: Session lifecycle (Idle -> Running -> Ended) and frame loop
//! - `economy`: Cooldown gate and coin payout
//! - `input`: Raw input events -> session commands
//! - `present`: Presenter callbacks and the per-frame scene query
//! - `ledger`: JSON-backed economy service
//! - `settings`: Host configuration

pub mod economy;
pub mod input;
pub mod ledger;
pub mod present;
pub mod session;
pub mod settings;
pub mod sim;

pub use economy::{Eligibility, EconomyError, EconomyService, RemainingCooldown};
pub use input::{Command, Key, RawInput};
pub use ledger::Ledger;
pub use present::{Presenter, Scene, Sprite, SpriteKind};
pub use session::{Arcade, FinishedSession, Session};
pub use settings::{Settings, SettingsError};

/// Milliseconds since the Unix epoch
pub type Timestamp = u64;

/// Game configuration constants
pub mod consts {
    /// Reference frame rate the physics constants are tuned for
    pub const REFERENCE_FPS: f32 = 60.0;
    /// Milliseconds per reference frame
    pub const REFERENCE_FRAME_MS: f32 = 1000.0 / REFERENCE_FPS;
    /// Largest normalized step applied in a single frame (stalled host guard)
    pub const MAX_FRAME_SCALE: f32 = 3.0;

    /// Visible area
    pub const VIEW_WIDTH: f32 = 300.0;
    pub const VIEW_HEIGHT: f32 = 400.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 30.0;
    pub const PLAYER_SPAWN_X: f32 = VIEW_WIDTH / 2.0 - PLAYER_SIZE / 2.0;
    pub const PLAYER_SPAWN_Y: f32 = VIEW_HEIGHT - 80.0;
    /// Downward acceleration per reference frame
    pub const GRAVITY: f32 = 0.25;
    /// Vertical velocity set by a jump (negative = up)
    pub const JUMP_IMPULSE: f32 = -10.0;
    /// Horizontal displacement per move command
    pub const MOVE_STEP: f32 = 10.0;

    /// Platform ("cloud") defaults
    pub const PLATFORM_WIDTH: f32 = 50.0;
    /// Height of the landing band at a platform's top surface
    pub const LANDING_BAND: f32 = 20.0;
    /// Vertical spacing between generated platforms
    pub const MIN_GAP: f32 = 80.0;
    pub const MAX_GAP: f32 = 120.0;

    /// Collectible defaults
    pub const COLLECTIBLE_SIZE: f32 = 20.0;
    pub const COLLECTIBLE_LIFT: f32 = 40.0;
    pub const COLLECTIBLE_CHANCE: f64 = 0.7;
    pub const GEM_CHANCE: f64 = 0.1;

    /// Hazard defaults
    pub const HAZARD_SIZE: f32 = 30.0;
    pub const HAZARD_LIFT: f32 = 50.0;
    pub const HAZARD_CHANCE: f64 = 0.3;
    pub const HAZARD_PENALTY: u32 = 5;

    /// Score multiplier (5 seconds at the reference rate)
    pub const MULTIPLIER_FACTOR: u32 = 2;
    pub const MULTIPLIER_FRAMES: u32 = 300;

    /// Minimum time between paid sessions (4 hours)
    pub const COOLDOWN_MS: u64 = 4 * 60 * 60 * 1000;
}

/// Wrap a horizontal position around the view (the world is a cylinder)
#[inline]
pub fn wrap_horizontal(x: f32, width: f32, view_width: f32) -> f32 {
    if x > view_width {
        -width
    } else if x < -width {
        view_width
    } else {
        x
    }
}
