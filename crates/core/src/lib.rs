//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on UI, persistence, or I/O, making it:
//!
//! - **Deterministic**: Same seed (or scripted [`RandomSource`]) produces identical games
//! - **Testable**: Comprehensive unit tests for all game rules
//! - **Portable**: Can run in any environment (terminal, headless, tests)
//! - **Total**: Illegal commands are rejected as no-ops, never as errors
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 board of cells with occupancy, category and falling-piece markings
//! - [`game_state`]: Complete game state including falling piece, hold, scoring, animation
//! - [`pieces`]: Tetromino shape table and piece values
//! - [`rng`]: Random source seam and deterministic LCG
//! - [`scoring`]: Uniform-line scoring, levels and drop speed
//! - [`particles`]: Cosmetic recycle-effect particles
//! - [`animation`]: Line-clear animation state machine
//! - [`snapshot`]: Plain-value snapshot used for rendering and persistence
//!
//! # Game Rules
//!
//! - **Categories**: Every piece is made of one recyclable material (paper, plastic, metal, glass, organic)
//! - **Uniform lines**: A full row of one category scores, counts as recycled and animates before vanishing
//! - **Mixed lines**: A full row of mixed categories vanishes immediately and scores nothing
//! - **Combo**: Two or more uniform lines in one freeze raise the combo counter and the multiplier
//! - **Hold**: Bank the falling piece once per spawn
//! - **No wall kicks**: Rotations that do not fit in place are rejected
//!
//! # Example
//!
//! ```
//! use recycle_tetris_core::GameState;
//! use recycle_tetris_types::GameAction;
//!
//! // The first piece is falling as soon as the game exists
//! let mut game = GameState::new(12345);
//! assert!(game.active().is_some());
//!
//! // Apply game actions
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! // A single piece never completes a row
//! assert_eq!(game.score(), 0);
//! assert_eq!(game.board().cells().iter().filter(|c| c.occupied).count(), 4);
//! ```
//!
//! # Timing
//!
//! The core has no clock. The driver calls:
//! - [`GameState::update`](game_state::GameState::update) every 16ms frame (particles)
//! - [`GameState::move_down`](game_state::GameState::move_down) every
//!   [`drop_interval_ticks`] frames (gravity, or one animation step while a line clears)

pub mod animation;
pub mod board;
pub mod game_state;
pub mod particles;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use recycle_tetris_types as types;

// Re-export commonly used types for convenience
pub use animation::LineClearAnimation;
pub use board::{Board, Cell};
pub use game_state::GameState;
pub use particles::Particle;
pub use pieces::{get_shape, Piece, QueuedPiece};
pub use rng::{RandomSource, ScriptedRng, SimpleRng};
pub use scoring::{calculate_level, calculate_line_score, drop_interval_ticks, ScoreResult};
pub use snapshot::GameSnapshot;
