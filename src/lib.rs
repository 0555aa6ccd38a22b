//! raincast: a first-person grid-raycasting renderer with a storm on top.
//!
//! A 2D occupancy grid and a moving viewpoint become a pseudo-3D image the
//! classic way: one ray per screen column, marched grid-line by grid-line
//! through the map, its first wall crossing projected into a textured
//! vertical slice. Rain streaks and lightning flashes are layered over the
//! same cast results every frame.
//!
//! Crate layout:
//! * [`world`] – occupancy grid, ray marching, texture bank
//! * [`renderer`] – projection, frame composition, software rasteriser
//! * [`sim`] – player movement, input intents, frame pacing
//! * [`assets`] – procedural built-in textures

pub mod assets;
pub mod renderer;
pub mod sim;
pub mod world;
