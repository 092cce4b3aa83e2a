//! Built-in worlds.

pub mod castle;

pub use castle::{CASTLE_NAME, build_castle};
