//! Grid-line ray marching.
//!
//! A ray advances crossing by crossing: from the current position, the next
//! vertical and the next horizontal grid-line crossings are candidates, and
//! the nearer one is taken. Every crossing is recorded rather than just the
//! terminal hit, so the renderer can walk the whole path for overlays.

use glam::{Vec2, vec2};
use smallvec::SmallVec;

use crate::world::Grid;

/// One grid-line crossing recorded while marching a ray outward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayStep {
    /// Crossing point in continuous grid coordinates.
    pub pos: Vec2,
    /// Cumulative distance from the ray origin.
    pub distance: f32,
    /// Height code of the cell just entered (−1 outside the grid).
    pub height: i32,
    /// Directional brightness bucket (0, 1 or 2), derived from which axis
    /// was crossed and the march direction along it.
    pub shading: u8,
    /// Fractional part of the coordinate running along the crossed line,
    /// in `[0, 1)`; the horizontal texture coordinate of the slice.
    pub offset: f32,
}

/// Ordered origin-to-far crossings of one cast. The inline capacity covers
/// the default range without touching the heap.
pub type CastResult = SmallVec<[RayStep; 32]>;

/// Candidate crossing of the next grid line along one axis.
struct Crossing {
    pos: Vec2,
    length2: f32,
}

/// March from `origin` at `angle` until the first wall crossing or until the
/// cumulative distance would exceed `range`.
///
/// The first element is always the origin record (distance 0, height 0). The
/// crossing that would exceed `range` is never appended, so the terminal
/// element is either the wall hit or the last in-range crossing.
pub(crate) fn march(grid: &Grid, origin: Vec2, angle: f32, range: f32) -> CastResult {
    let (sin, cos) = angle.sin_cos();
    let mut steps = CastResult::new();
    steps.push(RayStep {
        pos: origin,
        distance: 0.0,
        height: 0,
        shading: 0,
        offset: 0.0,
    });

    // Each crossing advances a full cell on one axis, so a ray of length
    // `range` makes at most range * (|sin| + |cos|) of them. The cap keeps
    // the degenerate cases finite.
    let cap = (range.max(0.0) * 2.0) as usize + 2;
    let mut pos = origin;
    let mut distance = 0.0;

    for _ in 0..cap {
        let x_cross = next_crossing(sin, cos, pos.x, pos.y, false);
        let y_cross = next_crossing(cos, sin, pos.y, pos.x, true);

        let (crossing, stepped_x) = match (x_cross, y_cross) {
            (Some(x), Some(y)) if x.length2 < y.length2 => (x, true),
            (_, Some(y)) => (y, false),
            (Some(x), None) => (x, true),
            (None, None) => break,
        };

        let step = inspect(grid, &crossing, stepped_x, sin, cos, distance);
        if step.distance > range {
            break;
        }
        let hit_wall = step.height > 0;
        pos = step.pos;
        distance = step.distance;
        steps.push(step);
        if hit_wall {
            break;
        }
    }
    steps
}

/// Next crossing of a grid line perpendicular to the `run` axis, or `None`
/// when the ray never crosses one (zero run).
fn next_crossing(rise: f32, run: f32, x: f32, y: f32, inverted: bool) -> Option<Crossing> {
    if run == 0.0 {
        return None;
    }
    let dx = if run > 0.0 {
        (x + 1.0).floor() - x
    } else {
        (x - 1.0).ceil() - x
    };
    let dy = dx * (rise / run);
    let pos = if inverted {
        vec2(y + dy, x + dx)
    } else {
        vec2(x + dx, y + dy)
    };
    Some(Crossing {
        pos,
        length2: dx * dx + dy * dy,
    })
}

/// Turn a chosen crossing into a full step record: cell sample, cumulative
/// distance, shading bucket and texture offset.
fn inspect(
    grid: &Grid,
    crossing: &Crossing,
    stepped_x: bool,
    sin: f32,
    cos: f32,
    distance: f32,
) -> RayStep {
    // The crossing point sits exactly on a cell boundary; the sign of the
    // direction cosine picks which of the two adjacent cells the ray enters.
    let (shift_x, shift_y) = if stepped_x {
        (if cos < 0.0 { 1.0 } else { 0.0 }, 0.0)
    } else {
        (0.0, if sin < 0.0 { 1.0 } else { 0.0 })
    };
    let height = grid.get(crossing.pos.x - shift_x, crossing.pos.y - shift_y);
    let shading = if stepped_x {
        if cos < 0.0 { 2 } else { 0 }
    } else if sin < 0.0 {
        2
    } else {
        1
    };
    let along = if stepped_x {
        crossing.pos.y
    } else {
        crossing.pos.x
    };
    RayStep {
        pos: crossing.pos,
        distance: distance + crossing.length2.sqrt(),
        height,
        shading,
        offset: along - along.floor(),
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, SQRT_2};

    #[test]
    fn zero_range_yields_only_the_origin() {
        let grid = Grid::new(4);
        let result = grid.cast(vec2(1.5, 1.5), 0.7, 0.0);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].distance, 0.0);
        assert_eq!(result[0].height, 0);
    }

    #[test]
    fn eastward_cast_hits_known_wall() {
        let mut grid = Grid::new(8);
        grid.set(5, 3, 4);
        let result = grid.cast(vec2(2.5, 3.5), 0.0, 10.0);
        let hit = result.last().unwrap();
        assert_eq!(hit.height, 4);
        assert!((hit.distance - 2.5).abs() < 1e-5);
        assert!((hit.offset - 0.5).abs() < 1e-4);
        assert_eq!(hit.shading, 0);
        // origin plus the crossings at x = 3, 4, 5
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn southward_cast_uses_the_horizontal_shading_bucket() {
        let mut grid = Grid::new(8);
        grid.set(2, 4, 1);
        let result = grid.cast(vec2(2.5, 1.5), FRAC_PI_2, 10.0);
        let hit = result.last().unwrap();
        assert_eq!(hit.height, 1);
        assert!((hit.distance - 2.5).abs() < 1e-4);
        assert!((hit.offset - 0.5).abs() < 1e-4);
        assert_eq!(hit.shading, 1);
    }

    #[test]
    fn westward_cast_samples_the_cell_behind_the_line() {
        let mut grid = Grid::new(8);
        grid.set(0, 1, 2);
        let result = grid.cast(vec2(2.5, 1.5), PI, 10.0);
        let hit = result.last().unwrap();
        assert_eq!(hit.height, 2);
        assert!((hit.distance - 1.5).abs() < 1e-4);
        assert_eq!(hit.shading, 2);
    }

    #[test]
    fn diagonal_cast_reaches_a_corner_wall() {
        let mut grid = Grid::new(8);
        // wall up whichever side of the shared corner the tie-break lands on
        grid.set(2, 2, 1);
        grid.set(1, 2, 1);
        grid.set(2, 1, 1);
        let result = grid.cast(vec2(1.5, 1.5), FRAC_PI_4, 10.0);
        let hit = result.last().unwrap();
        assert_eq!(hit.height, 1);
        assert!((hit.distance - SQRT_2 / 2.0).abs() < 1e-3);
    }

    #[test]
    fn open_field_cast_stops_just_past_range() {
        let grid = Grid::new(4);
        let range = 10.0;
        let result = grid.cast(vec2(2.0, 2.0), 0.7, range);
        let last = result.last().unwrap();
        assert!(last.distance <= range);
        assert!(last.distance > range - SQRT_2);
        assert!(result.iter().all(|s| s.height <= 0));
    }

    #[test]
    fn distances_increase_monotonically() {
        let grid = Grid::new(6);
        let result = grid.cast(vec2(3.2, 2.7), 2.1, 8.0);
        for pair in result.windows(2) {
            assert!(pair[1].distance > pair[0].distance);
        }
    }

    #[test]
    fn single_cell_map_is_boundary_limited() {
        let grid = Grid::new(1);
        let result = grid.cast(vec2(0.5, 0.5), 1.234, 10.0);
        let last = result.last().unwrap();
        assert!(result.iter().all(|s| s.height <= 0));
        assert!(last.distance <= 10.0);
        assert!(last.distance > 10.0 - SQRT_2);
    }
}
