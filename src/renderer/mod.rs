//! Rendering abstraction layer.
//!
//! *The frame composer never touches a pixel buffer directly.* It issues a
//! fixed per-frame sequence of draw operations (textured blits and flat
//! fills with a global alpha) against a type implementing [`Surface`], so
//! back-ends other than [`software::SoftwareSurface`] can be plugged in
//! without changing render logic.

mod camera;
mod projection;
pub mod software;

pub use camera::{Camera, CameraError};
pub use projection::{Projection, project};
pub use software::SoftwareSurface;

use crate::world::Texture;

/// Pixel format of the software frame-buffer (0xAARRGGBB).
pub type Rgba = u32;

/// Source region in texel coordinates.
#[derive(Clone, Copy, Debug)]
pub struct SrcRect {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl SrcRect {
    /// The whole of `tex`.
    pub fn full(tex: &Texture) -> Self {
        Self {
            x: 0,
            y: 0,
            w: tex.w,
            h: tex.h,
        }
    }

    /// A single texel-wide column of `tex` starting at `x`.
    pub fn column(tex: &Texture, x: usize) -> Self {
        Self {
            x: x.min(tex.w.saturating_sub(1)),
            y: 0,
            w: 1,
            h: tex.h,
        }
    }
}

/// Destination rectangle in continuous screen coordinates. May extend past
/// the viewport; implementations clip.
#[derive(Clone, Copy, Debug)]
pub struct DstRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// A render target that accumulates one frame of draw operations.
///
/// `end_frame` **loans** the finished buffer to a caller-supplied closure;
/// window back-ends typically forward it to their `update_with_buffer`.
pub trait Surface {
    /// (Re)allocate internal scratch for the requested resolution and clear it.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Stretch-blit `src` of `tex` into `dst`, nearest-neighbour sampled,
    /// modulated by `alpha` and each texel's own alpha.
    fn blit(&mut self, tex: &Texture, src: SrcRect, dst: DstRect, alpha: f32);

    /// Fill `dst` with a flat colour at opacity `alpha`.
    fn fill(&mut self, color: Rgba, dst: DstRect, alpha: f32);

    /// Finish the frame and loan the buffer to `submit` exactly once.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}
