mod clock;
mod controls;
mod player;

pub use clock::{FrameClock, MAX_FRAME_SECONDS};
pub use controls::Intents;
pub use player::Player;
