//! Pinhole projection of ray hits onto a screen column.

/// Vertical screen extent of one projected slice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub top: f32,
    pub height: f32,
}

/// Project a wall `height` cells tall, seen at `distance` along a ray
/// `angle` radians off view-forward, onto a viewport `viewport_h` pixels
/// tall.
///
/// The distance is first multiplied by `cos(angle)`: rays towards the screen
/// edge travel farther to reach the flat projection plane, and using the raw
/// distance would bow walls outward (fisheye). The `1 / z` term in the
/// vertical centre raises the horizon of near geometry, mimicking a camera
/// held at fixed eye height.
///
/// `distance * cos(angle)` must stay positive. The camera constructor bounds
/// every column angle strictly inside (−π/2, π/2), so this holds for every
/// ray it casts; the result for `z <= 0` is unspecified.
pub fn project(viewport_h: f32, height: f32, angle: f32, distance: f32) -> Projection {
    let z = distance * angle.cos();
    let slice_height = viewport_h * height / z;
    let bottom = viewport_h / 2.0 * (1.0 + 1.0 / z);
    Projection {
        top: bottom - slice_height,
        height: slice_height,
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_3;

    #[test]
    fn unit_wall_at_unit_distance_fills_the_viewport() {
        let p = project(100.0, 1.0, 0.0, 1.0);
        assert!((p.height - 100.0).abs() < 1e-4);
        assert!(p.top.abs() < 1e-4);
    }

    #[test]
    fn doubling_distance_halves_the_slice() {
        let near = project(100.0, 1.0, 0.0, 2.0);
        let far = project(100.0, 1.0, 0.0, 4.0);
        assert!((near.height / far.height - 2.0).abs() < 1e-4);
    }

    #[test]
    fn fisheye_correction_matches_the_forward_ray() {
        // cos(pi/3) = 1/2, so distance 2 off-axis equals distance 1 ahead
        let corrected = project(100.0, 1.0, FRAC_PI_3, 2.0);
        let forward = project(100.0, 1.0, 0.0, 1.0);
        assert!((corrected.height - forward.height).abs() < 1e-3);
        assert!((corrected.top - forward.top).abs() < 1e-3);
    }

    #[test]
    fn horizon_settles_towards_the_midline_with_distance() {
        let near = project(100.0, 1.0, 0.0, 2.0);
        let far = project(100.0, 1.0, 0.0, 8.0);
        // top = vh/2 - vh/(2z) for a unit wall: rises towards 50 from below
        assert!(far.top > near.top);
        assert!(far.top < 50.0);
    }
}
