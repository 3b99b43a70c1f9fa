//! Recycle Tetris (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `recycle_tetris::{core,save,achievements,input,term,types}`
//! and owns the environment [`config`] used by the binary.

pub mod config;

pub use recycle_tetris_achievements as achievements;
pub use recycle_tetris_core as core;
pub use recycle_tetris_input as input;
pub use recycle_tetris_save as save;
pub use recycle_tetris_term as term;
pub use recycle_tetris_types as types;
