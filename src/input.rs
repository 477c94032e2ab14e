//! Input adapter
//!
//! Maps raw host events (keys, pointer) to session commands. Events that
//! don't map to a command are dropped here; commands that arrive while no
//! session is running are dropped by the session layer.

use serde::{Deserialize, Serialize};

use crate::consts::MOVE_STEP;
use crate::sim::SessionState;

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Space,
    ArrowUp,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    /// Parse a DOM-style key name (`" "`, `"ArrowUp"`, ...)
    pub fn from_name(name: &str) -> Self {
        match name {
            " " | "Space" | "Spacebar" => Key::Space,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            _ => Key::Other,
        }
    }
}

/// A raw event from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawInput {
    KeyDown(Key),
    /// Primary pointer press (mouse click / tap)
    PointerDown,
}

/// Session-level command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Jump,
    MoveLeft,
    MoveRight,
}

impl RawInput {
    pub fn command(&self) -> Option<Command> {
        match self {
            RawInput::KeyDown(Key::Space | Key::ArrowUp) | RawInput::PointerDown => {
                Some(Command::Jump)
            }
            RawInput::KeyDown(Key::ArrowLeft) => Some(Command::MoveLeft),
            RawInput::KeyDown(Key::ArrowRight) => Some(Command::MoveRight),
            RawInput::KeyDown(Key::Other) => None,
        }
    }
}

/// Demo player: jumps whenever it can and steers toward the next platform
///
/// While rising it aims for the nearest platform above the player's feet;
/// while falling, for the nearest one below them.
pub fn autopilot(state: &SessionState) -> Option<Command> {
    let player = &state.player;
    if player.on_platform {
        return Some(Command::Jump);
    }

    let feet = player.bottom();
    let rising = player.vy < 0.0;
    let target = state
        .platforms
        .iter()
        .filter(|p| if rising { p.pos.y < feet } else { p.pos.y >= feet })
        .min_by(|a, b| {
            let da = (a.pos.y - feet).abs();
            let db = (b.pos.y - feet).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })?;

    let dx = (target.pos.x + target.width / 2.0) - (player.pos.x + player.size.x / 2.0);
    if dx > MOVE_STEP {
        Some(Command::MoveRight)
    } else if dx < -MOVE_STEP {
        Some(Command::MoveLeft)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_jump_bindings() {
        assert_eq!(RawInput::KeyDown(Key::Space).command(), Some(Command::Jump));
        assert_eq!(RawInput::KeyDown(Key::ArrowUp).command(), Some(Command::Jump));
        assert_eq!(RawInput::PointerDown.command(), Some(Command::Jump));
    }

    #[test]
    fn test_move_bindings() {
        assert_eq!(RawInput::KeyDown(Key::ArrowLeft).command(), Some(Command::MoveLeft));
        assert_eq!(RawInput::KeyDown(Key::ArrowRight).command(), Some(Command::MoveRight));
        assert_eq!(RawInput::KeyDown(Key::Other).command(), None);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name(" "), Key::Space);
        assert_eq!(Key::from_name("ArrowUp"), Key::ArrowUp);
        assert_eq!(Key::from_name("ArrowLeft"), Key::ArrowLeft);
        assert_eq!(Key::from_name("ArrowRight"), Key::ArrowRight);
        assert_eq!(Key::from_name("Enter"), Key::Other);
    }

    #[test]
    fn test_autopilot_jumps_from_platform() {
        let mut state = SessionState::new(1);
        state.player.on_platform = true;
        assert_eq!(autopilot(&state), Some(Command::Jump));
    }

    #[test]
    fn test_autopilot_steers_toward_next_platform_up() {
        let mut state = SessionState::new(1);
        state.platforms.clear();
        state.spawn_platform(250.0, 200.0);
        state.spawn_platform(0.0, 100.0);
        state.player.pos = Vec2::new(0.0, 250.0);
        state.player.vy = -5.0;
        // Nearest platform above the feet is the one at x = 250
        assert_eq!(autopilot(&state), Some(Command::MoveRight));

        state.player.pos.x = 255.0;
        assert_eq!(autopilot(&state), None);
    }

    #[test]
    fn test_autopilot_falling_aims_below() {
        let mut state = SessionState::new(1);
        state.platforms.clear();
        state.spawn_platform(0.0, 350.0);
        state.spawn_platform(250.0, 100.0);
        state.player.pos = Vec2::new(200.0, 250.0);
        state.player.vy = 3.0;
        assert_eq!(autopilot(&state), Some(Command::MoveLeft));
    }
}
