// Keyboard input, latched per player

mod action;
mod latch;

pub use action::{action_for_key, Action, PLAYER_COUNT};
pub use latch::{InputLatch, PadState};
