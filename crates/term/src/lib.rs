//! Terminal "game renderer" module.
//!
//! Renders a [`GameSnapshot`](recycle_tetris_core::GameSnapshot) into a small
//! framebuffer of styled character cells, then flushes that framebuffer to
//! the terminal as a diff against the previous frame.
//!
//! The view is pure and unit-tested; only [`TerminalRenderer`] touches the
//! terminal.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use recycle_tetris_core as core;
pub use recycle_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, HudView, Viewport};
pub use renderer::{encode_frame_into, ChangedRuns, Run, TerminalRenderer};
