//! The walking viewpoint.

use std::f32::consts::{PI, TAU};

use glam::Vec2;

use crate::sim::Intents;
use crate::world::Grid;

/// Turn rate, radians per second of held key.
const TURN_RATE: f32 = PI;
/// Walk speed, cells per second.
const WALK_RATE: f32 = 3.0;

/// Player-owned viewpoint: continuous position, heading, distance walked.
///
/// The ray caster reads this and never writes it; all movement goes through
/// [`Player::update`].
#[derive(Clone, Copy, Debug)]
pub struct Player {
    pub pos: Vec2,
    /// Heading in radians, kept in `[0, 2π)`.
    pub direction: f32,
    /// Signed cumulative distance walked; drives the weapon bob.
    pub paces: f32,
}

impl Player {
    pub fn new(pos: Vec2, direction: f32) -> Self {
        Self {
            pos,
            direction: direction.rem_euclid(TAU),
            paces: 0.0,
        }
    }

    /// Turn by `angle` radians, wrapping into `[0, 2π)`.
    pub fn rotate(&mut self, angle: f32) {
        self.direction = (self.direction + angle).rem_euclid(TAU);
    }

    /// Advance `distance` along the heading, sliding along walls: each axis
    /// moves only if the destination cell is not a wall. Off-grid cells
    /// (−1) count as walkable, so the viewpoint may leave the map.
    pub fn walk(&mut self, distance: f32, grid: &Grid) {
        let dx = self.direction.cos() * distance;
        let dy = self.direction.sin() * distance;
        if grid.get(self.pos.x + dx, self.pos.y) <= 0 {
            self.pos.x += dx;
        }
        if grid.get(self.pos.x, self.pos.y + dy) <= 0 {
            self.pos.y += dy;
        }
        self.paces += distance;
    }

    /// Apply one frame of held intents.
    pub fn update(&mut self, intents: Intents, grid: &Grid, dt: f32) {
        if intents.left {
            self.rotate(-TURN_RATE * dt);
        }
        if intents.right {
            self.rotate(TURN_RATE * dt);
        }
        if intents.forward {
            self.walk(WALK_RATE * dt, grid);
        }
        if intents.backward {
            self.walk(-WALK_RATE * dt, grid);
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    #[test]
    fn rotation_wraps_into_the_full_circle() {
        let mut player = Player::new(vec2(1.0, 1.0), 0.1);
        player.rotate(-0.3);
        assert!((player.direction - (TAU - 0.2)).abs() < 1e-5);
        player.rotate(0.3);
        assert!((player.direction - 0.1).abs() < 1e-5);
    }

    #[test]
    fn walls_block_one_axis_at_a_time() {
        let mut grid = Grid::new(4);
        grid.set(2, 1, 1);
        let mut player = Player::new(vec2(1.5, 1.5), 0.0);
        player.walk(1.0, &grid);
        // x-advance lands in the wall cell and is refused, y holds
        assert!((player.pos.x - 1.5).abs() < 1e-5);
        assert!((player.pos.y - 1.5).abs() < 1e-5);
        assert!((player.paces - 1.0).abs() < 1e-5);
    }

    #[test]
    fn open_ground_walks_and_accumulates_paces() {
        let grid = Grid::new(4);
        let mut player = Player::new(vec2(1.5, 1.5), 0.0);
        player.walk(1.0, &grid);
        player.walk(-0.5, &grid);
        assert!((player.pos.x - 2.0).abs() < 1e-5);
        assert!((player.paces - 0.5).abs() < 1e-5);
    }

    #[test]
    fn intents_drive_turn_and_walk() {
        let grid = Grid::new(4);
        let mut player = Player::new(vec2(1.5, 1.5), 0.0);
        let turn = Intents { left: true, ..Intents::default() };
        player.update(turn, &grid, 0.5);
        assert!((player.direction - (TAU - PI * 0.5)).abs() < 1e-4);

        let mut player = Player::new(vec2(1.5, 1.5), 0.0);
        let walk = Intents { forward: true, ..Intents::default() };
        player.update(walk, &grid, 0.5);
        assert!((player.pos.x - 3.0).abs() < 1e-4);
    }

    #[test]
    fn walking_off_the_grid_is_allowed() {
        let grid = Grid::new(4);
        let mut player = Player::new(vec2(0.5, 0.5), PI);
        player.walk(2.0, &grid);
        assert!(player.pos.x < 0.0);
    }
}
