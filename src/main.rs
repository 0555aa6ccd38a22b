//! First-person walk through a rain-lashed grid maze.
//!
//! ```bash
//! cargo run --release
//! ```
//!
//! Arrows or WASD to turn and walk, Escape quits. The map is rolled fresh
//! every session; pass `--seed` to get the same maze twice.

use std::time::{Duration, Instant};

use clap::Parser;
use glam::vec2;
use minifb::{Key, Window, WindowOptions};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing_subscriber::EnvFilter;

use raincast::{
    assets,
    renderer::{Camera, SoftwareSurface, Surface},
    sim::{FrameClock, Intents, Player},
    world::{Grid, TextureBank},
};

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Viewport width in pixels
    #[arg(long, default_value_t = 960)]
    width: usize,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 600)]
    height: usize,

    /// Number of ray columns (lower is faster and blockier)
    #[arg(long, default_value_t = 320)]
    resolution: usize,

    /// Focal length; smaller values widen the field of view
    #[arg(long, default_value_t = 0.8)]
    focal: f32,

    /// Ray range in cells
    #[arg(long, default_value_t = 14.0)]
    range: f32,

    /// Side length of the square map
    #[arg(long, default_value_t = 32)]
    map_size: usize,

    /// Seed for map generation and weather; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();

    let filter = if opts.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    anyhow::ensure!(opts.map_size >= 1, "map size must be at least 1");

    let mut rng = match opts.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    let mut bank = TextureBank::default_with_checker();
    let scene = assets::install_builtin(&mut bank, &mut rng)?;

    let mut grid = Grid::new(opts.map_size);
    grid.randomize(&mut rng);

    let mut player = Player::new(vec2(15.3, -1.2), std::f32::consts::PI * 0.3);
    let camera = Camera::new(
        opts.width,
        opts.height,
        opts.resolution,
        opts.focal,
        opts.range,
    )?;
    let mut surface = SoftwareSurface::default();

    tracing::info!(
        map = opts.map_size,
        resolution = opts.resolution,
        focal = opts.focal,
        "entering the storm"
    );

    let mut win = Window::new("raincast", opts.width, opts.height, WindowOptions::default())?;
    win.set_target_fps(60);

    let mut clock = FrameClock::start();

    // render-time accounting, reported every few seconds
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_report = Instant::now();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let Some(dt) = clock.tick() else {
            // stall frame: keep the window responsive, skip the simulation
            win.update();
            continue;
        };

        let intents = read_intents(&win);
        grid.update(dt, &mut rng);
        player.update(intents, &grid, dt);

        let t0 = Instant::now();
        let (w, h) = camera.viewport();
        surface.begin_frame(w, h);
        camera.render(&mut surface, &player, &grid, &bank, &scene, &mut rng);
        let mut submitted = Ok(());
        surface.end_frame(|fb, fw, fh| submitted = win.update_with_buffer(fb, fw, fh));
        submitted?;

        acc_time += t0.elapsed();
        acc_frames += 1;
        if last_report.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            tracing::debug!("avg render {avg_ms:.2} ms ({:.1} FPS)", 1000.0 / avg_ms);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_report = Instant::now();
        }
    }
    Ok(())
}

/// Fold the held keys into the four-intent snapshot, read once per frame.
fn read_intents(win: &Window) -> Intents {
    Intents {
        left: win.is_key_down(Key::Left) || win.is_key_down(Key::A),
        right: win.is_key_down(Key::Right) || win.is_key_down(Key::D),
        forward: win.is_key_down(Key::Up) || win.is_key_down(Key::W),
        backward: win.is_key_down(Key::Down) || win.is_key_down(Key::S),
    }
}
