//! Presentation boundary
//!
//! Push side: [`Presenter`] callbacks for score, session end, refusals and
//! payout failures. Pull side: a [`Scene`] snapshot the host reads once per
//! frame after the physics step and draws however it likes.

use glam::Vec2;
use serde::Serialize;

use crate::consts::{VIEW_HEIGHT, VIEW_WIDTH};
use crate::economy::{EconomyError, RemainingCooldown};
use crate::sim::{CollectibleKind, SessionState};

/// Receives session notifications
pub trait Presenter {
    /// Score changed (also fired with 0 when a session starts)
    fn on_score_changed(&mut self, score: u32);

    /// Session reached its end; fired once, after settlement
    fn on_session_ended(&mut self, final_score: u32, payout: u64);

    /// `start` was refused because the cooldown is still running
    fn on_blocked_by_cooldown(&mut self, hours: u64, minutes: u64);

    /// Payout could not be persisted (non-fatal)
    fn on_payout_failed(&mut self, error: &EconomyError) {
        log::warn!("Payout not saved: {}", error);
    }
}

/// Presenter that only logs; used by headless hosts
#[derive(Debug, Default)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn on_score_changed(&mut self, score: u32) {
        log::debug!("Score: {}", score);
    }

    fn on_session_ended(&mut self, final_score: u32, payout: u64) {
        if payout > 0 {
            log::info!("Game won! Collected {} items and earned {} coins", final_score, payout);
        } else {
            log::info!("Game over! Try again to earn coins");
        }
    }

    fn on_blocked_by_cooldown(&mut self, hours: u64, minutes: u64) {
        log::info!("{}", cooldown_notice(hours, minutes));
    }
}

fn cooldown_notice(hours: u64, minutes: u64) -> String {
    format!(
        "Game is recharging: play again in {}",
        RemainingCooldown { hours, minutes }
    )
}

/// Colors for scene elements (RGBA)
pub mod colors {
    pub const PLATFORM: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const COIN: [f32; 4] = [1.0, 0.84, 0.0, 1.0];
    pub const GEM: [f32; 4] = [0.4, 0.8, 1.0, 1.0];
    pub const HAZARD: [f32; 4] = [0.9, 0.9, 0.9, 1.0];
    pub const PLAYER: [f32; 4] = [1.0, 0.6, 0.7, 1.0];
}

/// What a sprite depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpriteKind {
    Platform,
    Coin,
    Gem,
    Hazard,
    Player,
}

impl SpriteKind {
    pub fn glyph(&self) -> &'static str {
        match self {
            SpriteKind::Platform => "☁️",
            SpriteKind::Coin => "⭐",
            SpriteKind::Gem => "💎",
            SpriteKind::Hazard => "💀",
            SpriteKind::Player => "🐷",
        }
    }

    /// Single-cell stand-in for character grids
    pub fn ascii(&self) -> char {
        match self {
            SpriteKind::Platform => '=',
            SpriteKind::Coin => '*',
            SpriteKind::Gem => '$',
            SpriteKind::Hazard => 'X',
            SpriteKind::Player => '@',
        }
    }

    pub fn color(&self) -> [f32; 4] {
        match self {
            SpriteKind::Platform => colors::PLATFORM,
            SpriteKind::Coin => colors::COIN,
            SpriteKind::Gem => colors::GEM,
            SpriteKind::Hazard => colors::HAZARD,
            SpriteKind::Player => colors::PLAYER,
        }
    }
}

/// A positioned primitive
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sprite {
    pub kind: SpriteKind,
    /// Top-left corner in view space
    pub pos: Vec2,
    pub size: Vec2,
    pub glyph: String,
    pub color: [f32; 4],
}

impl Sprite {
    fn new(kind: SpriteKind, pos: Vec2, size: Vec2) -> Self {
        Self {
            kind,
            pos,
            size,
            glyph: kind.glyph().to_string(),
            color: kind.color(),
        }
    }
}

/// Everything visible in one frame, in draw order (player last)
#[derive(Debug, Clone, Serialize)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub sprites: Vec<Sprite>,
    pub score: u32,
    pub multiplier_active: bool,
    pub multiplier_frames: u32,
}

impl Scene {
    /// Snapshot a running session. `player_glyph` is the cosmetic glyph from
    /// the economy service.
    pub fn from_state(state: &SessionState, player_glyph: &str) -> Self {
        let mut sprites = Vec::with_capacity(
            state.platforms.len() + state.collectibles.len() + state.hazards.len() + 1,
        );

        for p in &state.platforms {
            sprites.push(Sprite::new(SpriteKind::Platform, p.pos, p.bounds().size));
        }
        for c in &state.collectibles {
            let kind = match c.kind {
                CollectibleKind::Coin => SpriteKind::Coin,
                CollectibleKind::MultiplierGem => SpriteKind::Gem,
            };
            sprites.push(Sprite::new(kind, c.pos, Vec2::splat(c.size)));
        }
        for h in &state.hazards {
            sprites.push(Sprite::new(SpriteKind::Hazard, h.pos, Vec2::splat(h.size)));
        }

        let mut player = Sprite::new(SpriteKind::Player, state.player.pos, state.player.size);
        if !player_glyph.is_empty() {
            player.glyph = player_glyph.to_string();
        }
        sprites.push(player);

        Self {
            width: VIEW_WIDTH,
            height: VIEW_HEIGHT,
            sprites,
            score: state.score,
            multiplier_active: state.multiplier.active,
            multiplier_frames: state.multiplier.remaining_frames,
        }
    }

    pub fn player(&self) -> Option<&Sprite> {
        self.sprites.iter().find(|s| s.kind == SpriteKind::Player)
    }

    /// Place every sprite on a `cols` x `rows` character grid
    ///
    /// Sprites partly outside the view are clipped; later sprites overwrite
    /// earlier ones, so the player is always on top.
    pub fn to_ascii(&self, cols: usize, rows: usize) -> String {
        if cols == 0 || rows == 0 {
            return String::new();
        }
        let mut grid = vec![vec![' '; cols]; rows];
        let sx = cols as f32 / self.width;
        let sy = rows as f32 / self.height;

        for sprite in &self.sprites {
            let max = sprite.pos + sprite.size;
            let c0 = (sprite.pos.x * sx).floor().max(0.0) as usize;
            let c1 = ((max.x * sx).ceil().max(0.0) as usize).min(cols);
            let r0 = (sprite.pos.y * sy).floor().max(0.0) as usize;
            let r1 = ((max.y * sy).ceil().max(0.0) as usize).min(rows);
            for row in grid.iter_mut().take(r1).skip(r0) {
                for cell in row.iter_mut().take(c1).skip(c0) {
                    *cell = sprite.kind.ascii();
                }
            }
        }

        grid.into_iter()
            .map(|row| row.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
