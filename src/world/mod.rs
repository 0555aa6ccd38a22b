mod grid;
mod ray;
mod texture;

pub use grid::Grid;
pub use ray::{CastResult, RayStep};
pub use texture::{NO_TEXTURE, Texture, TextureBank, TextureError, TextureId};
