//! Square occupancy grid and its storm lighting.

use glam::Vec2;
use rand::Rng;

use crate::world::ray::{self, CastResult};

/// Chance for any one cell to come up as a wall in [`Grid::randomize`].
const WALL_PROBABILITY: f64 = 0.3;
/// Ambient-light decay, units per second.
const LIGHT_DECAY: f32 = 10.0;
/// Mean seconds between lightning strikes while the sky is dark.
const FLASH_PERIOD: f32 = 5.0;
/// Light level a fresh strike jumps to.
const FLASH_LIGHT: f32 = 2.0;

/// Fixed-size square array of height codes plus the ambient-light scalar.
///
/// Cell values: 0 = passable, >0 = wall (all wall heights currently render
/// one cell tall). Queries outside the grid return the sentinel −1, which is
/// distinct from passable ground: a ray keeps marching through it but never
/// draws it, and the player may walk on it.
pub struct Grid {
    size: usize,
    cells: Vec<u8>,
    light: f32,
}

impl Grid {
    /// Create an all-passable grid of `size` x `size` cells.
    pub fn new(size: usize) -> Self {
        assert!(size >= 1, "grid needs at least one cell");
        Self {
            size,
            cells: vec![0; size * size],
            light: 0.0,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Current ambient light in `[0, 2]`.
    #[inline]
    pub fn light(&self) -> f32 {
        self.light
    }

    /// Height code of the cell containing `(x, y)`, or −1 outside the grid.
    ///
    /// Both coordinates are floored, so any point inside a cell's unit
    /// square samples that cell.
    pub fn get(&self, x: f32, y: f32) -> i32 {
        let limit = self.size as f32;
        let cx = x.floor();
        let cy = y.floor();
        if !(0.0..limit).contains(&cx) || !(0.0..limit).contains(&cy) {
            return -1;
        }
        self.cells[cy as usize * self.size + cx as usize] as i32
    }

    /// Store `height` at cell `(x, y)`. Panics outside the grid.
    pub fn set(&mut self, x: usize, y: usize, height: u8) {
        assert!(x < self.size && y < self.size, "cell ({x}, {y}) outside grid");
        self.cells[y * self.size + x] = height;
    }

    /// Re-roll every cell independently: wall with probability 0.3, else
    /// passable. No connectivity guarantee; a sealed-in viewpoint is an
    /// accepted outcome of the roll, not a defect.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        for cell in &mut self.cells {
            *cell = if rng.gen_bool(WALL_PROBABILITY) { 1 } else { 0 };
        }
    }

    /// Advance the storm lighting by `dt` seconds.
    ///
    /// Two states: while lit, decay linearly towards darkness; while dark,
    /// flash back to full with probability `dt / 5` per call.
    pub fn update<R: Rng>(&mut self, dt: f32, rng: &mut R) {
        if self.light > 0.0 {
            self.light = (self.light - LIGHT_DECAY * dt).max(0.0);
        } else if rng.gen_range(0.0..FLASH_PERIOD) < dt {
            self.light = FLASH_LIGHT;
            tracing::debug!(light = FLASH_LIGHT, "lightning strike");
        }
    }

    /// March a ray from `origin` at `angle`, recording every grid-line
    /// crossing until the first wall or the range limit.
    pub fn cast(&self, origin: Vec2, angle: f32, range: f32) -> CastResult {
        ray::march(self, origin, angle, range)
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::mock::StepRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn get_returns_stored_height_inside_bounds() {
        let mut grid = Grid::new(4);
        grid.set(2, 1, 7);
        assert_eq!(grid.get(2.9, 1.1), 7);
        assert_eq!(grid.get(2.0, 1.0), 7);
        assert_eq!(grid.get(0.5, 0.5), 0);
    }

    #[test]
    fn get_outside_bounds_is_sentinel() {
        let grid = Grid::new(4);
        assert_eq!(grid.get(-0.1, 2.0), -1);
        assert_eq!(grid.get(2.0, -0.1), -1);
        assert_eq!(grid.get(4.0, 2.0), -1);
        assert_eq!(grid.get(2.0, 4.5), -1);
        assert_eq!(grid.get(f32::NAN, 2.0), -1);
    }

    #[test]
    fn randomize_approaches_the_wall_probability() {
        let mut grid = Grid::new(128);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        grid.randomize(&mut rng);
        let walls = grid.cells.iter().filter(|&&c| c > 0).count();
        let fraction = walls as f64 / grid.cells.len() as f64;
        assert!((fraction - 0.3).abs() < 0.02, "wall fraction {fraction}");
    }

    #[test]
    fn light_decays_linearly_and_clamps_at_zero() {
        let mut grid = Grid::new(2);
        // top-of-range rolls, so the flash branch never fires
        let mut rng = StepRng::new(u64::MAX, 0);
        grid.light = 2.0;
        grid.update(0.1, &mut rng);
        assert!((grid.light - 1.0).abs() < 1e-5);
        grid.update(0.1, &mut rng);
        assert_eq!(grid.light, 0.0);
        grid.update(0.1, &mut rng);
        assert_eq!(grid.light, 0.0);
    }

    #[test]
    fn dark_sky_flashes_on_a_lucky_roll() {
        let mut grid = Grid::new(2);
        let mut rng = StepRng::new(0, 0);
        grid.update(0.016, &mut rng);
        assert_eq!(grid.light, 2.0);
    }

    #[test]
    fn dark_sky_without_luck_stays_dark() {
        let mut grid = Grid::new(2);
        let mut rng = StepRng::new(u64::MAX, 0);
        let mut elapsed = 0.0;
        while elapsed < 6.0 {
            grid.update(0.1, &mut rng);
            elapsed += 0.1;
        }
        assert_eq!(grid.light, 0.0);
    }
}
