//! Per-frame simulation step
//!
//! Advances a session by one update call. `dt` is elapsed time in reference
//! frames (1.0 = one frame at 60 fps), so the physics constants read as
//! "per frame" values.

use super::collision::lands_on;
use super::spawn::extend_track;
use super::state::{CollectibleKind, SessionState, StepOutcome};
use crate::consts::*;
use crate::wrap_horizontal;

/// Convert host elapsed time to a normalized step, clamped to
/// [`MAX_FRAME_SCALE`] so a stalled host can't produce one giant step
pub fn frame_scale(elapsed_ms: f64) -> f32 {
    let scale = elapsed_ms as f32 / REFERENCE_FRAME_MS;
    scale.clamp(0.0, MAX_FRAME_SCALE)
}

/// Advance the session by one update call
///
/// Order: multiplier countdown, integrate, scroll, land, pick up, hit
/// hazards, cull, wrap, fall-out check, then extend the track.
pub fn step(state: &mut SessionState, dt: f32) -> StepOutcome {
    state.time_ticks += 1;
    state.multiplier.tick();

    // Semi-implicit Euler
    let prev_bottom = state.player.bottom();
    let player = &mut state.player;
    player.vy += player.gravity * dt;
    player.pos.y += player.vy * dt;

    // Camera: while climbing past the midpoint, hold the player and move the world
    let midpoint = VIEW_HEIGHT / 2.0;
    if state.player.pos.y < midpoint && state.player.vy < 0.0 {
        let scroll = midpoint - state.player.pos.y;
        state.player.pos.y = midpoint;
        for p in &mut state.platforms {
            p.pos.y += scroll;
        }
        for c in &mut state.collectibles {
            c.pos.y += scroll;
        }
        for h in &mut state.hazards {
            h.pos.y += scroll;
        }
    }

    // Landing
    state.player.on_platform = false;
    for platform in &state.platforms {
        if lands_on(&state.player, prev_bottom, platform) {
            state.player.vy = 0.0;
            state.player.pos.y = platform.pos.y - state.player.size.y;
            state.player.on_platform = true;
        }
    }

    // Pickups
    let bounds = state.player.bounds();
    let mut picked = Vec::new();
    state.collectibles.retain(|c| {
        let hit = c.bounds().overlaps(&bounds);
        if hit {
            picked.push((c.id, c.kind));
        }
        !hit
    });
    for (id, kind) in picked {
        match kind {
            CollectibleKind::Coin => {
                let points = state.multiplier.apply(1);
                state.score += points;
                log::debug!("Coin {} collected (+{}), score {}", id, points, state.score);
            }
            CollectibleKind::MultiplierGem => {
                state.multiplier.activate();
                log::debug!("Gem {} collected, multiplier active", id);
            }
        }
    }

    // Hazards
    let mut penalties = Vec::new();
    state.hazards.retain(|h| {
        let hit = h.bounds().overlaps(&bounds);
        if hit {
            penalties.push(h.penalty);
        }
        !hit
    });
    for penalty in penalties {
        state.apply_penalty(penalty);
        log::debug!("Hazard hit (-{}), score {}", penalty, state.score);
    }

    // Cull everything that scrolled past the bottom
    state.platforms.retain(|p| p.pos.y <= VIEW_HEIGHT);
    state.collectibles.retain(|c| c.pos.y <= VIEW_HEIGHT);
    state.hazards.retain(|h| h.pos.y <= VIEW_HEIGHT);

    state.player.pos.x = wrap_horizontal(state.player.pos.x, state.player.size.x, VIEW_WIDTH);

    if state.player.pos.y > VIEW_HEIGHT {
        return StepOutcome::FellOut;
    }

    extend_track(state);
    state.normalize_order();
    StepOutcome::Continue
}
