//! Frame composition: sky, wall columns, weather, weapon.
//!
//! [`Camera`] is the per-frame orchestrator. Each of the `resolution`
//! screen columns gets one ray cast through the grid; the nearest wall
//! crossing is projected and textured, every crossing on the way out feeds
//! the rain overlay, and a shading rectangle darkens with distance unless
//! lightning brightens it back.

use std::f32::consts::TAU;

use rand::Rng;

use crate::assets::Scene;
use crate::renderer::projection::{self, Projection};
use crate::renderer::{DstRect, Rgba, SrcRect, Surface};
use crate::sim::Player;
use crate::world::{CastResult, Grid, NO_TEXTURE, Texture, TextureBank, TextureId};

/// Distance over which walls fade to black while the sky is dark.
const LIGHT_RANGE: f32 = 5.0;
/// Projected cell height of one rain streak.
const RAIN_HEIGHT: f32 = 0.1;
/// Opacity of a single rain mark.
const RAIN_ALPHA: f32 = 0.15;

const BLACK: Rgba = 0xFF_000000;
const WHITE: Rgba = 0xFF_FFFFFF;

/// Configuration mistakes caught at startup, before any frame is drawn.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CameraError {
    /// Zero-area viewports cannot hold a frame.
    #[error("viewport {0}x{1} has no pixels")]
    EmptyViewport(usize, usize),

    /// At least one ray column is needed.
    #[error("resolution of zero columns")]
    NoColumns,

    /// The focal length must keep every column angle inside (−π/2, π/2).
    #[error("focal length {0} does not bound the field of view")]
    BadFocalLength(f32),

    /// Rays need somewhere to go.
    #[error("cast range {0} must be positive and finite")]
    BadRange(f32),
}

/// Per-session view configuration plus the per-frame draw orchestration.
#[derive(Debug)]
pub struct Camera {
    width: f32,
    height: f32,
    resolution: usize,
    /// Screen width of one column; ceil'd at draw time to avoid seams.
    spacing: f32,
    focal_length: f32,
    range: f32,
    /// Viewport-derived factor for sprite sizes and the walk bob.
    scale: f32,
}

impl Camera {
    /// Validate and freeze a view configuration.
    ///
    /// Column angles are `atan2(c/resolution − 1/2, focal_length)`, so any
    /// positive finite focal length keeps them strictly inside
    /// (−π/2, π/2), which in turn keeps every corrected projection distance
    /// positive. Anything else is rejected here, loudly, instead of
    /// surfacing as NaN pixels mid-frame.
    pub fn new(
        width: usize,
        height: usize,
        resolution: usize,
        focal_length: f32,
        range: f32,
    ) -> Result<Self, CameraError> {
        if width == 0 || height == 0 {
            return Err(CameraError::EmptyViewport(width, height));
        }
        if resolution == 0 {
            return Err(CameraError::NoColumns);
        }
        if !focal_length.is_finite() || focal_length <= 0.0 {
            return Err(CameraError::BadFocalLength(focal_length));
        }
        if !range.is_finite() || range <= 0.0 {
            return Err(CameraError::BadRange(range));
        }
        let (w, h) = (width as f32, height as f32);
        Ok(Self {
            width: w,
            height: h,
            resolution,
            spacing: w / resolution as f32,
            focal_length,
            range,
            scale: (w + h) / 1200.0,
        })
    }

    /// Viewport size in pixels, as handed to [`Surface::begin_frame`].
    pub fn viewport(&self) -> (usize, usize) {
        (self.width as usize, self.height as usize)
    }

    /// Draw one complete frame in fixed order: sky, columns, weapon.
    pub fn render<S: Surface, R: Rng>(
        &self,
        surface: &mut S,
        player: &Player,
        grid: &Grid,
        bank: &TextureBank,
        scene: &Scene,
        rng: &mut R,
    ) {
        self.draw_sky(surface, texture(bank, scene.sky), player.direction, grid.light());
        self.draw_columns(surface, player, grid, texture(bank, scene.wall), rng);
        self.draw_weapon(surface, texture(bank, scene.weapon), player.paces);
    }

    /// Panorama panned with the view direction, tiled twice when the seam
    /// would show; lightning brightens the lower half.
    fn draw_sky<S: Surface>(&self, surface: &mut S, sky: &Texture, direction: f32, ambient: f32) {
        let width = sky.w as f32 * (self.height / sky.h as f32) * 2.0;
        let left = direction / TAU * -width;

        surface.blit(
            sky,
            SrcRect::full(sky),
            DstRect { x: left, y: 0.0, w: width, h: self.height },
            1.0,
        );
        if left < width - self.width {
            surface.blit(
                sky,
                SrcRect::full(sky),
                DstRect { x: left + width, y: 0.0, w: width, h: self.height },
                1.0,
            );
        }
        if ambient > 0.0 {
            surface.fill(
                WHITE,
                DstRect {
                    x: 0.0,
                    y: self.height * 0.5,
                    w: self.width,
                    h: self.height * 0.5,
                },
                ambient * 0.1,
            );
        }
    }

    fn draw_columns<S: Surface, R: Rng>(
        &self,
        surface: &mut S,
        player: &Player,
        grid: &Grid,
        wall: &Texture,
        rng: &mut R,
    ) {
        for column in 0..self.resolution {
            let x = column as f32 / self.resolution as f32 - 0.5;
            let angle = x.atan2(self.focal_length);
            let cast = grid.cast(player.pos, player.direction + angle, self.range);
            self.draw_column(surface, column, &cast, angle, grid.light(), wall, rng);
        }
    }

    /// One vertical slice: the nearest wall crossing textured and shaded,
    /// plus rain marks contributed by every crossing, far to near, so the
    /// wall overdraws the drops behind it.
    fn draw_column<S: Surface, R: Rng>(
        &self,
        surface: &mut S,
        column: usize,
        cast: &CastResult,
        angle: f32,
        ambient: f32,
        wall: &Texture,
        rng: &mut R,
    ) {
        let left = (column as f32 * self.spacing).floor();
        let width = self.spacing.ceil();
        let hit = cast.iter().position(|step| step.height > 0);

        for (index, step) in cast.iter().enumerate().rev() {
            if Some(index) == hit {
                let texture_x = (wall.w as f32 * step.offset) as usize;
                let slice = self.project(step.height as f32, angle, step.distance);
                let dst = DstRect { x: left, y: slice.top, w: width, h: slice.height };
                surface.blit(wall, SrcRect::column(wall, texture_x), dst, 1.0);

                let shade = (step.distance + step.shading as f32) / LIGHT_RANGE - ambient;
                surface.fill(BLACK, dst, shade.clamp(0.0, 1.0));
            }

            let mut drops = rng.gen_range(0.0f32..1.0).powi(3) * index as f32;
            if drops > 0.0 {
                let streak = self.project(RAIN_HEIGHT, angle, step.distance);
                loop {
                    drops -= 1.0;
                    if drops <= 0.0 {
                        break;
                    }
                    surface.fill(
                        WHITE,
                        DstRect {
                            x: left,
                            y: rng.gen_range(0.0f32..1.0) * streak.top,
                            w: 1.0,
                            h: streak.height,
                        },
                        RAIN_ALPHA,
                    );
                }
            }
        }
    }

    /// Held-implement sprite, bobbing on two out-of-phase sinusoids driven
    /// by the distance walked.
    fn draw_weapon<S: Surface>(&self, surface: &mut S, weapon: &Texture, paces: f32) {
        let bob_x = (paces * 2.0).cos() * self.scale * 6.0;
        let bob_y = (paces * 4.0).sin() * self.scale * 6.0;
        let left = self.width * 0.66 + bob_x;
        let top = self.height * 0.6 + bob_y;
        surface.blit(
            weapon,
            SrcRect::full(weapon),
            DstRect {
                x: left,
                y: top,
                w: weapon.w as f32 * self.scale,
                h: weapon.h as f32 * self.scale,
            },
            1.0,
        );
    }

    /// Project `height` cells at `distance` onto this viewport.
    fn project(&self, height: f32, angle: f32, distance: f32) -> Projection {
        projection::project(self.height, height, angle, distance)
    }
}

/// Fallback-safe lookup; the bank guarantees the checkerboard at id 0.
fn texture(bank: &TextureBank, id: TextureId) -> &Texture {
    bank.texture(id)
        .unwrap_or_else(|_| bank.texture(NO_TEXTURE).unwrap())
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
