//! Overhead debug viewer: the grid, the player and one frame's ray fan.
//!
//! ```bash
//! cargo run --bin topdown -- [seed]
//! ```
//!
//! Arrow keys steer the same player the 3D view uses; every frame the full
//! column fan is cast and drawn as lines, which makes range limits and
//! wall sampling easy to eyeball.

use glam::vec2;
use minifb::{Key, Window, WindowOptions};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use raincast::{
    sim::{FrameClock, Intents, Player},
    world::Grid,
};

const WIDTH: usize = 640;
const HEIGHT: usize = 640;
const RAYS: usize = 90;
const FOCAL: f32 = 0.8;
const RANGE: f32 = 14.0;

const BACKGROUND: u32 = 0xFF_101216;
const WALL: u32 = 0xFF_5A5F66;
const RAY_OPEN: u32 = 0xFF_2E4A6E;
const RAY_HIT: u32 = 0xFF_C9A227;

fn main() -> anyhow::Result<()> {
    let seed = std::env::args()
        .nth(1)
        .map(|s| s.parse())
        .transpose()?
        .unwrap_or(0);
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut grid = Grid::new(32);
    grid.randomize(&mut rng);
    let mut player = Player::new(vec2(15.5, 15.5), 0.0);

    let cell = WIDTH as f32 / grid.size() as f32;
    let mut buffer = vec![BACKGROUND; WIDTH * HEIGHT];

    let mut win = Window::new("raincast map", WIDTH, HEIGHT, WindowOptions::default())?;
    win.set_target_fps(60);
    let mut clock = FrameClock::start();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let Some(dt) = clock.tick() else {
            win.update();
            continue;
        };

        let intents = Intents {
            left: win.is_key_down(Key::Left),
            right: win.is_key_down(Key::Right),
            forward: win.is_key_down(Key::Up),
            backward: win.is_key_down(Key::Down),
        };
        grid.update(dt, &mut rng);
        player.update(intents, &grid, dt);

        buffer.fill(BACKGROUND);
        draw_cells(&mut buffer, &grid, cell);
        draw_ray_fan(&mut buffer, &grid, &player, cell);

        win.update_with_buffer(&buffer, WIDTH, HEIGHT)?;
    }
    Ok(())
}

fn draw_cells(buf: &mut [u32], grid: &Grid, cell: f32) {
    for cy in 0..grid.size() {
        for cx in 0..grid.size() {
            if grid.get(cx as f32 + 0.5, cy as f32 + 0.5) > 0 {
                let x0 = (cx as f32 * cell) as usize;
                let y0 = (cy as f32 * cell) as usize;
                let x1 = (((cx + 1) as f32 * cell) as usize).min(WIDTH);
                let y1 = (((cy + 1) as f32 * cell) as usize).min(HEIGHT);
                for y in y0..y1 {
                    for x in x0..x1 {
                        buf[y * WIDTH + x] = WALL;
                    }
                }
            }
        }
    }
}

fn draw_ray_fan(buf: &mut [u32], grid: &Grid, player: &Player, cell: f32) {
    let to_screen = |p: glam::Vec2| -> (i32, i32) { ((p.x * cell) as i32, (p.y * cell) as i32) };
    let (px, py) = to_screen(player.pos);

    for ray in 0..RAYS {
        let x = ray as f32 / RAYS as f32 - 0.5;
        let angle = x.atan2(FOCAL);
        let cast = grid.cast(player.pos, player.direction + angle, RANGE);
        if let Some(last) = cast.last() {
            let colour = if last.height > 0 { RAY_HIT } else { RAY_OPEN };
            let (hx, hy) = to_screen(last.pos);
            draw_line(buf, WIDTH, HEIGHT, px, py, hx, hy, colour);
        }
    }
}

/// Integer Bresenham line-drawing algorithm.
fn draw_line(
    buf: &mut [u32],
    w: usize,
    h: usize,
    mut x0: i32,
    mut y0: i32,
    x1: i32,
    y1: i32,
    colour: u32,
) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if (0..w as i32).contains(&x0) && (0..h as i32).contains(&y0) {
            buf[y0 as usize * w + x0 as usize] = colour;
        }
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            if x0 == x1 {
                break;
            }
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            if y0 == y1 {
                break;
            }
            err += dx;
            y0 += sy;
        }
    }
}
