//! Collision detection for axis-aligned boxes
//!
//! Everything in the world is a box in screen space (y grows downward), so
//! pickups and hazards are plain overlap tests. Landing is the only special
//! case: it only counts from above, against the band at a platform's top.

use glam::Vec2;

use super::state::{Platform, Player};
use crate::consts::LANDING_BAND;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap; boxes that only share an edge do not touch
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }

    /// Horizontal extents overlap (strict)
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.min.x < other.max().x && self.max().x > other.min.x
    }
}

/// Check whether the player lands on a platform this step
///
/// `prev_bottom` is the player's bottom edge before this step's integration.
/// The player must be falling and horizontally over the platform, with the
/// bottom edge either inside the landing band or having crossed the top
/// surface during the step (large steps would otherwise tunnel).
pub fn lands_on(player: &Player, prev_bottom: f32, platform: &Platform) -> bool {
    if player.vy <= 0.0 {
        return false;
    }
    if !player.bounds().overlaps_x(&platform.bounds()) {
        return false;
    }

    let top = platform.pos.y;
    let bottom = player.bottom();
    let in_band = bottom > top && bottom < top + LANDING_BAND;
    let crossed = prev_bottom <= top && bottom >= top;
    in_band || crossed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLATFORM_WIDTH;

    fn platform_at(x: f32, y: f32) -> Platform {
        Platform {
            id: 1,
            pos: Vec2::new(x, y),
            width: PLATFORM_WIDTH,
        }
    }

    fn player_at(x: f32, y: f32, vy: f32) -> Player {
        Player {
            pos: Vec2::new(x, y),
            vy,
            ..Default::default()
        }
    }

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        let c = Aabb::new(Vec2::new(20.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_aabb_touching_edges_do_not_overlap() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let right = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        let below = Aabb::new(Vec2::new(0.0, 10.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_lands_when_falling_into_band() {
        let platform = platform_at(100.0, 200.0);
        // Bottom edge at 205, inside the band [200, 220)
        let player = player_at(110.0, 175.0, 2.0);
        assert!(lands_on(&player, 203.0, &platform));
    }

    #[test]
    fn test_no_landing_while_rising() {
        let platform = platform_at(100.0, 200.0);
        let player = player_at(110.0, 175.0, -4.0);
        assert!(!lands_on(&player, 209.0, &platform));

        // vy == 0 is not falling either
        let player = player_at(110.0, 175.0, 0.0);
        assert!(!lands_on(&player, 205.0, &platform));
    }

    #[test]
    fn test_no_landing_beside_platform() {
        let platform = platform_at(100.0, 200.0);
        // Right edge at 100 just touches the platform's left edge
        let player = player_at(70.0, 175.0, 2.0);
        assert!(!lands_on(&player, 203.0, &platform));
    }

    #[test]
    fn test_landing_catches_tunneling() {
        let platform = platform_at(100.0, 200.0);
        // Bottom moved from 190 to 230 in one step, skipping the band
        let player = player_at(110.0, 200.0, 40.0);
        assert!(lands_on(&player, 190.0, &platform));
    }

    #[test]
    fn test_no_landing_below_band() {
        let platform = platform_at(100.0, 200.0);
        // Already well below the surface before the step
        let player = player_at(110.0, 200.0, 3.0);
        assert!(!lands_on(&player, 227.0, &platform));
    }
}
