//! Terminal input module.
//!
//! Maps `crossterm` key events into [`InputCommand`]s: game actions for the
//! simulation plus the driver-level commands (pause, save, load) that never
//! reach the core. Quitting is checked separately with [`should_quit`].

pub mod map;

pub use recycle_tetris_types as types;

pub use map::{handle_key_event, should_quit, InputCommand};
