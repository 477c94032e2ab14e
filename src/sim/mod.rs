//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, persistence or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, lands_on};
pub use spawn::{extend_track, highest_platform_y};
pub use state::{
    Collectible, CollectibleKind, Hazard, Multiplier, Platform, Player, SessionState, StepOutcome,
};
pub use tick::{frame_scale, step};
