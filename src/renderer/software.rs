//! ---------------------------------------------------------------------------
//! CPU rasteriser for the [`Surface`] draw operations
//!
//! * Fills an internal `Vec<u32>` frame-buffer in **0xAARRGGBB** format.
//! * Blits are nearest-neighbour; alpha is blended per pixel so the shading
//!   rectangles, rain marks and the lightning band composite over what is
//!   already there.
//! ---------------------------------------------------------------------------

use crate::renderer::{DstRect, Rgba, SrcRect, Surface};
use crate::world::Texture;

/// Colour the scratch buffer is cleared to between frames.
const CLEAR: Rgba = 0xFF_101216;

#[derive(Default)]
pub struct SoftwareSurface {
    scratch: Vec<Rgba>,
    width: usize,
    height: usize,
}

impl Surface for SoftwareSurface {
    fn begin_frame(&mut self, width: usize, height: usize) {
        // (re)allocate if resolution changed
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.scratch.resize(width * height, 0);
        }
        self.scratch.fill(CLEAR);
    }

    fn blit(&mut self, tex: &Texture, src: SrcRect, dst: DstRect, alpha: f32) {
        if alpha <= 0.0 || src.w == 0 || src.h == 0 || dst.w <= 0.0 || dst.h <= 0.0 {
            return;
        }
        let (x0, x1) = span(dst.x, dst.w, self.width);
        let (y0, y1) = span(dst.y, dst.h, self.height);
        for py in y0..y1 {
            let v = ((py as f32 + 0.5 - dst.y) / dst.h * src.h as f32) as usize;
            let sy = (src.y + v.min(src.h - 1)).min(tex.h - 1);
            for px in x0..x1 {
                let u = ((px as f32 + 0.5 - dst.x) / dst.w * src.w as f32) as usize;
                let sx = (src.x + u.min(src.w - 1)).min(tex.w - 1);
                let texel = tex.texel(sx, sy);
                let a = alpha * ((texel >> 24) & 0xFF) as f32 / 255.0;
                let idx = py * self.width + px;
                self.scratch[idx] = mix(self.scratch[idx], texel, a);
            }
        }
    }

    fn fill(&mut self, color: Rgba, dst: DstRect, alpha: f32) {
        if alpha <= 0.0 || dst.w <= 0.0 || dst.h <= 0.0 {
            return;
        }
        let a = alpha.min(1.0);
        let (x0, x1) = span(dst.x, dst.w, self.width);
        let (y0, y1) = span(dst.y, dst.h, self.height);
        for py in y0..y1 {
            for px in x0..x1 {
                let idx = py * self.width + px;
                self.scratch[idx] = mix(self.scratch[idx], color, a);
            }
        }
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.scratch, self.width, self.height);
    }
}

/// Pixel range `[lo, hi)` covered by an edge at `start` extending `len`,
/// clipped to `limit`.
fn span(start: f32, len: f32, limit: usize) -> (usize, usize) {
    let lo = start.floor().clamp(0.0, limit as f32) as usize;
    let hi = (start + len).ceil().clamp(0.0, limit as f32) as usize;
    (lo, hi)
}

/// Per-channel linear blend of `src` over `dst` at opacity `a`.
/// Output alpha is forced opaque; the frame-buffer itself never fades.
#[inline]
fn mix(dst: Rgba, src: Rgba, a: f32) -> Rgba {
    if a <= 0.0 {
        return dst;
    }
    if a >= 1.0 {
        return 0xFF00_0000 | (src & 0x00FF_FFFF);
    }
    let lerp = |shift: u32| {
        let d = ((dst >> shift) & 0xFF) as f32;
        let s = ((src >> shift) & 0xFF) as f32;
        (((s * a + d * (1.0 - a)) as u32) & 0xFF) << shift
    };
    0xFF00_0000 | lerp(16) | lerp(8) | lerp(0)
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    fn fresh(w: usize, h: usize) -> SoftwareSurface {
        let mut surface = SoftwareSurface::default();
        surface.begin_frame(w, h);
        surface
    }

    fn pixel(surface: &mut SoftwareSurface, x: usize, y: usize) -> Rgba {
        let mut out = 0;
        surface.end_frame(|fb, w, _| out = fb[y * w + x]);
        out
    }

    #[test]
    fn opaque_blit_copies_texels() {
        let mut surface = fresh(4, 4);
        let tex = Texture::solid(2, 2, 0xFF_C04040);
        surface.blit(
            &tex,
            SrcRect::full(&tex),
            DstRect { x: 0.0, y: 0.0, w: 4.0, h: 4.0 },
            1.0,
        );
        assert_eq!(pixel(&mut surface, 0, 0), 0xFF_C04040);
        assert_eq!(pixel(&mut surface, 3, 3), 0xFF_C04040);
    }

    #[test]
    fn transparent_texels_leave_the_background() {
        let mut surface = fresh(4, 4);
        let tex = Texture::solid(2, 2, 0x00_C04040);
        surface.blit(
            &tex,
            SrcRect::full(&tex),
            DstRect { x: 0.0, y: 0.0, w: 4.0, h: 4.0 },
            1.0,
        );
        assert_eq!(pixel(&mut surface, 1, 1), CLEAR);
    }

    #[test]
    fn single_column_blit_stretches_vertically() {
        let mut surface = fresh(4, 4);
        let mut tex = Texture::solid(2, 2, 0xFF_00FF00);
        tex.pixels[0] = 0xFF_0000FF; // left column, top
        tex.pixels[2] = 0xFF_0000FF; // left column, bottom
        surface.blit(
            &tex,
            SrcRect::column(&tex, 0),
            DstRect { x: 0.0, y: 0.0, w: 4.0, h: 4.0 },
            1.0,
        );
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(pixel(&mut surface, x, y), 0xFF_0000FF);
            }
        }
    }

    #[test]
    fn fill_blends_towards_the_colour() {
        let mut surface = fresh(2, 2);
        surface.fill(
            0xFF_FFFFFF,
            DstRect { x: 0.0, y: 0.0, w: 2.0, h: 2.0 },
            0.5,
        );
        let px = pixel(&mut surface, 0, 0);
        let red = (px >> 16) & 0xFF;
        // halfway between the clear colour's 0x10 and white
        assert!((0x80..=0x90).contains(&red), "red channel {red:#x}");
    }

    #[test]
    fn off_screen_rects_are_clipped_not_fatal() {
        let mut surface = fresh(4, 4);
        let tex = Texture::solid(2, 2, 0xFF_FFFFFF);
        surface.fill(
            0xFF_FFFFFF,
            DstRect { x: -10.0, y: -10.0, w: 5.0, h: 5.0 },
            1.0,
        );
        surface.blit(
            &tex,
            SrcRect::full(&tex),
            DstRect { x: 100.0, y: 100.0, w: 8.0, h: 8.0 },
            1.0,
        );
        assert_eq!(pixel(&mut surface, 3, 3), CLEAR);
    }

    #[test]
    fn end_frame_loans_the_buffer() {
        let mut surface = fresh(3, 2);
        let mut seen = (0, 0, 0);
        surface.end_frame(|fb, w, h| seen = (fb.len(), w, h));
        assert_eq!(seen, (6, 3, 2));
    }
}
