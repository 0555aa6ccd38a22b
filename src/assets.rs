//! Built-in procedural stand-ins for shipped image assets.
//!
//! Decoding image files is a collaborator concern, so the binaries
//! synthesize their textures at startup instead: a brick wall, a storm-cloud
//! panorama and the held knife sprite. Same idea as the texture bank's
//! checkerboard fallback, just a few steps further.

use rand::Rng;

use crate::world::{Texture, TextureBank, TextureError, TextureId};

/// Texture handles the frame composer needs every frame.
#[derive(Clone, Copy, Debug)]
pub struct Scene {
    pub sky: TextureId,
    pub wall: TextureId,
    pub weapon: TextureId,
}

/// Register the built-in textures and return their handles.
pub fn install_builtin<R: Rng>(
    bank: &mut TextureBank,
    rng: &mut R,
) -> Result<Scene, TextureError> {
    let sky = bank.insert("SKY", storm_panorama(rng))?;
    let wall = bank.insert("WALL", brick_wall(rng))?;
    let weapon = bank.insert("KNIFE", knife_sprite())?;
    Ok(Scene { sky, wall, weapon })
}

/// Staggered brick courses with per-brick shade jitter.
fn brick_wall<R: Rng>(rng: &mut R) -> Texture {
    const W: usize = 64;
    const H: usize = 64;
    const BRICK_W: usize = 16;
    const BRICK_H: usize = 8;
    const MORTAR: u32 = 0xFF_3A342E;

    let cols = W / BRICK_W + 1;
    let rows = H / BRICK_H;
    let shades: Vec<u32> = (0..cols * rows)
        .map(|_| shade(0xFF_8A5A40, rng.gen_range(-18..=18)))
        .collect();

    let mut pixels = vec![0u32; W * H];
    for y in 0..H {
        let course = y / BRICK_H;
        let shift = (course % 2) * (BRICK_W / 2);
        for x in 0..W {
            let brick = (x + shift) / BRICK_W;
            let in_mortar = (x + shift) % BRICK_W == 0 || y % BRICK_H == 0;
            pixels[y * W + x] = if in_mortar {
                MORTAR
            } else {
                shades[course * cols + brick]
            };
        }
    }
    Texture { w: W, h: H, pixels }
}

/// Dark zenith fading into a murky horizon, roughened with noise so the
/// panorama reads as cloud cover rather than a clean gradient.
fn storm_panorama<R: Rng>(rng: &mut R) -> Texture {
    const W: usize = 512;
    const H: usize = 192;
    let mut pixels = vec![0u32; W * H];
    let mut drift = 0.0f32;
    for y in 0..H {
        let t = y as f32 / H as f32;
        let r = 18.0 + 52.0 * t;
        let g = 22.0 + 58.0 * t;
        let b = 34.0 + 72.0 * t;
        for x in 0..W {
            let ripple = rng.gen_range(-6.0..6.0) + drift;
            pixels[y * W + x] = argb(r + ripple, g + ripple, b + ripple);
        }
        drift = (drift + rng.gen_range(-0.5..0.5)).clamp(-10.0, 10.0);
    }
    Texture { w: W, h: H, pixels }
}

/// Tapering blade over a straight grip, on a fully transparent ground.
fn knife_sprite() -> Texture {
    const W: usize = 96;
    const H: usize = 96;
    const STEEL: u32 = 0xFF_B8BEC6;
    const EDGE: u32 = 0xFF_E6EAEE;
    const GRIP: u32 = 0xFF_5A4632;

    let mut pixels = vec![0u32; W * H];
    let centre = 48.0;
    for y in 0..H {
        for x in 0..W {
            let fx = x as f32;
            let colour = if (8..56).contains(&y) {
                let half = 1.0 + (y - 8) as f32 * 0.15;
                if (fx - centre).abs() <= half {
                    Some(if fx < centre { EDGE } else { STEEL })
                } else {
                    None
                }
            } else if (56..88).contains(&y) {
                if (fx - centre).abs() <= 5.0 { Some(GRIP) } else { None }
            } else {
                None
            };
            if let Some(c) = colour {
                pixels[y * W + x] = c;
            }
        }
    }
    Texture { w: W, h: H, pixels }
}

fn shade(argb: u32, delta: i32) -> u32 {
    let ch = |v: u32| ((v as i32 + delta).clamp(0, 255)) as u32;
    0xFF00_0000
        | (ch((argb >> 16) & 0xFF) << 16)
        | (ch((argb >> 8) & 0xFF) << 8)
        | ch(argb & 0xFF)
}

fn argb(r: f32, g: f32, b: f32) -> u32 {
    let ch = |v: f32| v.clamp(0.0, 255.0) as u32;
    0xFF00_0000 | (ch(r) << 16) | (ch(g) << 8) | ch(b)
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
