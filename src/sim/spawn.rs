//! Procedural track generation
//!
//! Keeps a platform ahead of the player. Gaps are bounded by
//! [`MIN_GAP`, `MAX_GAP`] so every new platform is reachable with the fixed
//! jump impulse. Collectibles and hazards ride along with independent draws.

use rand::Rng;

use super::state::{CollectibleKind, SessionState};
use crate::consts::*;

/// Y of the highest (smallest y) live platform, or the view bottom if none
pub fn highest_platform_y(state: &SessionState) -> f32 {
    state
        .platforms
        .iter()
        .map(|p| p.pos.y)
        .fold(VIEW_HEIGHT, f32::min)
}

/// Spawn the next platform if the top of the track has come into view
///
/// Emits at most one platform per call. Returns the new platform's ID.
pub fn extend_track(state: &mut SessionState) -> Option<u32> {
    let highest_y = highest_platform_y(state);
    if highest_y <= MIN_GAP {
        return None;
    }

    let gap = state.rng.random_range(MIN_GAP..=MAX_GAP);
    let y = highest_y - gap;
    let x = state.rng.random_range(0.0..=VIEW_WIDTH - PLATFORM_WIDTH);
    let id = state.spawn_platform(x, y);
    log::debug!("Spawned platform {} at ({:.1}, {:.1}), gap {:.1}", id, x, y, gap);

    if state.rng.random_bool(COLLECTIBLE_CHANCE) {
        let kind = if state.rng.random_bool(GEM_CHANCE) {
            CollectibleKind::MultiplierGem
        } else {
            CollectibleKind::Coin
        };
        let cx = state.rng.random_range(0.0..=VIEW_WIDTH - COLLECTIBLE_SIZE);
        state.spawn_collectible(kind, cx, y - COLLECTIBLE_LIFT);
    }

    if state.rng.random_bool(HAZARD_CHANCE) {
        let hx = state.rng.random_range(0.0..=VIEW_WIDTH - HAZARD_SIZE);
        state.spawn_hazard(hx, y - HAZARD_LIFT);
    }

    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_highest_without_platforms_is_view_bottom() {
        let mut state = SessionState::new(5);
        state.platforms.clear();
        assert_eq!(highest_platform_y(&state), VIEW_HEIGHT);
    }

    #[test]
    fn test_empty_track_still_generates() {
        let mut state = SessionState::new(5);
        state.platforms.clear();
        let id = extend_track(&mut state).expect("platform spawned");
        let p = state.platforms.iter().find(|p| p.id == id).unwrap();
        assert!(p.pos.y >= VIEW_HEIGHT - MAX_GAP && p.pos.y <= VIEW_HEIGHT - MIN_GAP);
    }

    #[test]
    fn test_spawns_when_top_is_empty() {
        // Highest platform sits at 190: nothing within MIN_GAP of the top
        let mut state = SessionState::new(11);
        let before = state.platforms.len();
        assert!(extend_track(&mut state).is_some());
        assert_eq!(state.platforms.len(), before + 1);
    }

    #[test]
    fn test_no_spawn_when_top_is_covered() {
        let mut state = SessionState::new(11);
        state.spawn_platform(10.0, MIN_GAP);
        let before = state.platforms.len();
        assert!(extend_track(&mut state).is_none());
        assert_eq!(state.platforms.len(), before);
    }

    #[test]
    fn test_one_platform_per_call() {
        let mut state = SessionState::new(11);
        state.platforms.clear();
        extend_track(&mut state);
        assert_eq!(state.platforms.len(), 1);
    }

    #[test]
    fn test_attachments_sit_above_platform() {
        let mut state = SessionState::new(2024);
        for _ in 0..50 {
            state.platforms.clear();
            state.collectibles.clear();
            state.hazards.clear();
            extend_track(&mut state);

            let y = state.platforms[0].pos.y;
            for c in &state.collectibles {
                assert_eq!(c.pos.y, y - COLLECTIBLE_LIFT);
                assert!(c.pos.x >= 0.0 && c.pos.x <= VIEW_WIDTH - COLLECTIBLE_SIZE);
            }
            for h in &state.hazards {
                assert_eq!(h.pos.y, y - HAZARD_LIFT);
                assert_eq!(h.penalty, HAZARD_PENALTY);
            }
        }
    }

    #[test]
    fn test_spawn_mix_roughly_matches_odds() {
        let mut state = SessionState::new(77);
        let rounds = 2000;
        for _ in 0..rounds {
            state.platforms.clear();
            extend_track(&mut state);
        }
        let coins = state
            .collectibles
            .iter()
            .filter(|c| c.kind == CollectibleKind::Coin)
            .count();
        let gems = state.collectibles.len() - coins;
        let hazards = state.hazards.len();

        // Expected: ~1400 collectibles (~140 gems), ~600 hazards
        assert!((1250..1550).contains(&state.collectibles.len()));
        assert!((80..220).contains(&gems));
        assert!((480..720).contains(&hazards));
    }

    proptest! {
        #[test]
        fn prop_spawn_gap_within_bounds(seed in any::<u64>(), steps in 1usize..40) {
            let mut state = SessionState::new(seed);
            for _ in 0..steps {
                // Scroll the track down so the generator keeps emitting
                for p in &mut state.platforms {
                    p.pos.y += MAX_GAP;
                }
                let previous = highest_platform_y(&state);
                if let Some(id) = extend_track(&mut state) {
                    let p = state.platforms.iter().find(|p| p.id == id).unwrap();
                    let gap = previous - p.pos.y;
                    prop_assert!(gap >= MIN_GAP - 1e-3 && gap <= MAX_GAP + 1e-3);
                    prop_assert!(p.pos.x >= 0.0 && p.pos.x <= VIEW_WIDTH - PLATFORM_WIDTH);
                }
            }
        }
    }
}
